//! Storage backends for the catalog. Paths are relative to the catalog root
//! (the directory that contains `data/`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// Read/write access to catalog files.
pub trait CatalogStore {
    /// Contents of a file, or `None` if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, CatalogError>;

    /// Create or replace a file, creating parent directories as needed.
    fn write(&mut self, path: &Path, contents: &[u8]) -> Result<(), CatalogError>;

    /// Size of an existing file.
    fn size(&self, path: &Path) -> Option<u64>;

    /// Human-readable location of a path, for messages.
    fn display(&self, path: &Path) -> String {
        path.display().to_string()
    }

    fn exists(&self, path: &Path) -> bool {
        self.size(path).is_some()
    }

    fn read_string(&self, path: &Path) -> Result<Option<String>, CatalogError> {
        self.read(path)?
            .map(|bytes| {
                String::from_utf8(bytes).map_err(|e| {
                    CatalogError::io(
                        self.display(path),
                        std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                    )
                })
            })
            .transpose()
    }
}

/// The real filesystem under a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl CatalogStore for FsStore {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, CatalogError> {
        let full = self.resolve(path);
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CatalogError::io(full.display(), e)),
        }
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> Result<(), CatalogError> {
        let full = self.resolve(path);
        if std::fs::read(&full).is_ok_and(|existing| existing == contents) {
            log::debug!("Unchanged: {}", full.display());
            return Ok(());
        }
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent.display(), e))?;
        }

        // Write atomically
        let mut tmp_name = full.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = full.with_file_name(tmp_name);
        std::fs::write(&tmp, contents).map_err(|e| CatalogError::io(tmp.display(), e))?;
        std::fs::rename(&tmp, &full).map_err(|e| CatalogError::io(full.display(), e))?;
        log::debug!("Wrote {} ({} bytes)", full.display(), contents.len());
        Ok(())
    }

    fn size(&self, path: &Path) -> Option<u64> {
        std::fs::metadata(self.resolve(path))
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len())
    }

    fn display(&self, path: &Path) -> String {
        self.resolve(path).display().to_string()
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All files, sorted by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, Vec<u8>> {
        &self.files
    }

    /// Number of `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl CatalogStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, CatalogError> {
        Ok(self.files.get(path).cloned())
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> Result<(), CatalogError> {
        self.writes += 1;
        self.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn size(&self, path: &Path) -> Option<u64> {
        self.files.get(path).map(|b| b.len() as u64)
    }
}
