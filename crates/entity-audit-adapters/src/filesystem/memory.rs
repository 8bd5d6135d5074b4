//! In-memory filesystem adapter for tests and dry runs.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use entity_audit_core::{
    application::{ApplicationError, ports::Filesystem},
    error::AuditResult,
};

use super::LocalFilesystem;

/// In-memory filesystem.
///
/// With a backing [`LocalFilesystem`] it acts as a write overlay: reads fall
/// through to disk for files not written yet, and writes never leave memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    backing: Option<LocalFilesystem>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay on top of the local disk.
    pub fn overlay(backing: LocalFilesystem) -> Self {
        Self {
            backing: Some(backing),
            ..Self::default()
        }
    }

    /// Seed a file (testing helper). Parent directories are created.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path, content.into());
        }
        self
    }

    /// Read a file's content from memory only.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Files held in memory, in path order.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> AuditResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StateLockError)?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> AuditResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StateLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            let known = inner.directories.contains(parent)
                || self.backing.is_some_and(|disk| disk.exists(parent));
            if !parent.as_os_str().is_empty() && !known {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> AuditResult<String> {
        if let Some(content) = self.read_file(path) {
            return Ok(content);
        }
        match &self.backing {
            Some(disk) => disk.read_to_string(path),
            None => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "File not found".into(),
            }
            .into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let in_memory = self
            .inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false);
        in_memory || self.backing.is_some_and(|disk| disk.exists(path))
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}
