use crate::error::SyncError;
use crate::vault::{Node, Vault};

/// Reject identical folders. Pure; runs before anything touches the vault.
pub fn check_distinct(source: &str, output: &str) -> Result<(), SyncError> {
    if source == output {
        return Err(SyncError::SameFolder(source.to_string()));
    }
    Ok(())
}

/// Require `path` to resolve to a folder in `vault` and return its tree.
pub fn require_folder(vault: &impl Vault, path: &str) -> Result<Node, SyncError> {
    match vault.node(path).map_err(|e| SyncError::io(path, e))? {
        Some(node) if node.is_folder() => Ok(node),
        _ => Err(SyncError::InvalidFolder(path.to_string())),
    }
}
