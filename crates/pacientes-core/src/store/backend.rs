//! Storage backends for the record store.
//!
//! The persisted form is a single document holding the JSON array of all
//! patients; backends only read and overwrite that document whole.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Whole-document key-value storage.
pub trait StorageBackend: Send {
    /// Read the full payload, `None` when nothing has been stored yet.
    fn read(&self) -> io::Result<Option<String>>;

    /// Overwrite the full payload.
    fn write(&mut self, payload: &str) -> io::Result<()>;
}

/// File-backed storage: the document lives at a single path.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, payload: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)
    }
}

/// In-memory storage (for testing).
#[derive(Default)]
pub struct MemoryBackend {
    payload: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with a pre-existing payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> io::Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("patients.json"));

        assert_eq!(backend.read().unwrap(), None);
        backend.write("[]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_backend_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("data/nested/patients.json"));
        backend.write("[]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.read().unwrap(), None);
        backend.write("[1]").unwrap();
        backend.write("[2]").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("[2]"));
    }
}
