//! Storage abstraction for the notes the sync reads and writes.
//!
//! A vault is a tree of folders and files addressed by `/`-separated paths
//! relative to its root (see [`crate::paths`]). Callers pass normalized
//! paths.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File {
        path: String,
        name: String,
        extension: String,
    },
    Folder {
        path: String,
        children: Vec<Node>,
    },
}

impl Node {
    fn file(path: String) -> Self {
        let name = paths::file_name(&path).to_string();
        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
            _ => String::new(),
        };
        Node::File {
            path,
            name,
            extension,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::File { path, .. } | Node::Folder { path, .. } => path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }
}

pub trait Vault {
    /// Resolve `path` to a node. Folders come back with their whole subtree.
    /// Returns `None` when nothing exists at `path`.
    fn node(&self, path: &str) -> io::Result<Option<Node>>;

    fn read(&self, path: &str) -> io::Result<String>;

    /// Write `content` to `path`, creating the file if needed.
    fn write(&self, path: &str, content: &str) -> io::Result<()>;

    fn delete(&self, path: &str) -> io::Result<()>;
}

/// A vault backed by a directory on disk. Hidden entries (names starting
/// with `.`, e.g. `.obsidian` or `.git`) are left out of the tree.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> io::Result<PathBuf> {
        if path.split('/').any(|seg| seg == "..") {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path '{path}' escapes the vault"),
            ));
        }
        Ok(self.root.join(path))
    }

    fn load_folder(&self, path: &str, dir: &Path) -> io::Result<Node> {
        let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());

        let mut children = Vec::new();
        for entry in entries {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!("skipping non UTF-8 name in {}", dir.display());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let child_path = paths::join(path, &name);
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                children.push(self.load_folder(&child_path, &entry.path())?);
            } else if file_type.is_file() {
                children.push(Node::file(child_path));
            } else if file_type.is_symlink() {
                // Linked folders are not followed.
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => children.push(Node::file(child_path)),
                    Ok(_) => {}
                    Err(e) => warn!("skipping unreadable link {child_path}: {e}"),
                }
            }
        }

        Ok(Node::Folder {
            path: path.to_string(),
            children,
        })
    }
}

impl Vault for FsVault {
    fn node(&self, path: &str) -> io::Result<Option<Node>> {
        let full = self.full_path(path)?;
        let meta = match fs::metadata(&full) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        if meta.is_dir() {
            self.load_folder(path, &full).map(Some)
        } else {
            Ok(Some(Node::file(path.to_string())))
        }
    }

    fn read(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.full_path(path)?)
    }

    fn write(&self, path: &str, content: &str) -> io::Result<()> {
        fs::write(self.full_path(path)?, content)
    }

    fn delete(&self, path: &str) -> io::Result<()> {
        fs::remove_file(self.full_path(path)?)
    }
}

/// A vault held entirely in memory. Folders are implied by the files below
/// them or created explicitly with [`MemoryVault::add_folder`].
#[derive(Debug, Default)]
pub struct MemoryVault {
    files: RefCell<BTreeMap<String, String>>,
    folders: RefCell<BTreeSet<String>>,
    mutations: Cell<usize>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, path: &str) {
        let path = paths::normalize(path);
        let mut folders = self.folders.borrow_mut();
        let mut prefix = String::new();
        for seg in path.split('/').filter(|s| !s.is_empty()) {
            prefix = paths::join(&prefix, seg);
            folders.insert(prefix.clone());
        }
    }

    /// Insert a file without counting it as a mutation.
    pub fn add_file(&self, path: &str, content: &str) {
        let path = paths::normalize(path);
        if let Some((parent, _)) = path.rsplit_once('/') {
            self.add_folder(parent);
        }
        self.files.borrow_mut().insert(path, content.to_string());
    }

    /// Content of the file at `path`, if any.
    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(&paths::normalize(path)).cloned()
    }

    /// Number of writes and deletes performed through [`Vault`].
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    fn parent_of(path: &str) -> &str {
        path.rsplit_once('/').map(|(p, _)| p).unwrap_or("")
    }

    fn build_folder(&self, path: &str) -> Node {
        let sub_folders: Vec<String> = self
            .folders
            .borrow()
            .iter()
            .filter(|f| Self::parent_of(f) == path && f.as_str() != path)
            .cloned()
            .collect();
        let files: Vec<String> = self
            .files
            .borrow()
            .keys()
            .filter(|f| Self::parent_of(f) == path)
            .cloned()
            .collect();

        let mut children: Vec<Node> = sub_folders
            .iter()
            .map(|f| self.build_folder(f))
            .chain(files.into_iter().map(Node::file))
            .collect();
        children.sort_by(|a, b| paths::file_name(a.path()).cmp(paths::file_name(b.path())));

        Node::Folder {
            path: path.to_string(),
            children,
        }
    }
}

impl Vault for MemoryVault {
    fn node(&self, path: &str) -> io::Result<Option<Node>> {
        if self.files.borrow().contains_key(path) {
            return Ok(Some(Node::file(path.to_string())));
        }
        if path.is_empty() || self.folders.borrow().contains(path) {
            return Ok(Some(self.build_folder(path)));
        }
        Ok(None)
    }

    fn read(&self, path: &str) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no file at '{path}'"))
        })
    }

    fn write(&self, path: &str, content: &str) -> io::Result<()> {
        let parent = Self::parent_of(path);
        if !parent.is_empty() && !self.folders.borrow().contains(parent) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no folder at '{parent}'"),
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }

    fn delete(&self, path: &str) -> io::Result<()> {
        if self.files.borrow_mut().remove(path).is_none() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no file at '{path}'"),
            ));
        }
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }
}
