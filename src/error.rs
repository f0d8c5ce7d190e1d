use thiserror::Error;

/// Failure of a sync run. Every variant aborts the whole run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("folder '{0}' does not exist")]
    InvalidFolder(String),

    #[error("source and output folders must differ (both are '{0}')")]
    SameFolder(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Stable code for JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFolder(_) => "invalid_folder",
            Self::SameFolder(_) => "same_folder",
            Self::Io { .. } => "io_error",
        }
    }

    /// Whether the error comes from the folder arguments rather than from
    /// the notes themselves. Re-running won't help with these.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidFolder(_) | Self::SameFolder(_))
    }
}
