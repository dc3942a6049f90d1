//! Durable key-value substrates the store document can live in.

use std::{
    io,
    path::{Path, PathBuf},
};

use crate::domain::Config;

/// A place to keep the serialized store document.
///
/// A backend holds exactly one document under one well-known key.
pub trait Backend {
    /// Read the stored document as raw bytes.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet. The bytes are not
    /// checked; decoding is left to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the substrate exists but cannot be read.
    fn load(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the stored document.
    ///
    /// Either the whole document is stored or the previous one is left in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn persist(&mut self, document: &str) -> io::Result<()>;
}

/// Keeps the document in a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// A backend writing to `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The backend for the store rooted at `root`, named by the configured
    /// store key.
    #[must_use]
    pub fn for_root(root: &Path, config: &Config) -> Self {
        Self::new(config.store_path(root))
    }

    /// The file the document is kept in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn load(&self) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn persist(&mut self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write beside the target and rename over it so a reader never sees
        // a half-written document.
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, document)?;
        std::fs::rename(&staging, &self.path)
    }
}

/// Keeps the document in memory.
///
/// Nothing outlives the value; used for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBackend {
    document: Option<String>,
}

impl MemoryBackend {
    /// An empty backend.
    #[must_use]
    pub const fn new() -> Self {
        Self { document: None }
    }

    /// A backend already holding `document`.
    #[must_use]
    pub const fn with_document(document: String) -> Self {
        Self {
            document: Some(document),
        }
    }

    /// The currently stored document.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.document.clone().map(String::into_bytes))
    }

    fn persist(&mut self, document: &str) -> io::Result<()> {
        self.document = Some(document.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_reports_absent_document() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(tmp.path().join("store.json"));
        assert_eq!(backend.load().unwrap(), None);
    }

    #[test]
    fn file_backend_round_trips_and_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("store.json");
        let mut backend = FileBackend::new(path.clone());

        backend.persist("{\"users\":{}}").unwrap();
        backend.persist("{\"users\":{\"a\":1}}").unwrap();

        assert_eq!(
            backend.load().unwrap().as_deref(),
            Some(b"{\"users\":{\"a\":1}}".as_slice())
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_backend_returns_bytes_unchecked() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("store.json");
        std::fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();

        let backend = FileBackend::new(path);

        assert_eq!(backend.load().unwrap(), Some(vec![0xff, 0xfe, b'{', b'}']));
    }

    #[test]
    fn file_backend_uses_configured_key() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = FileBackend::for_root(tmp.path(), &Config::default());
        assert_eq!(backend.path(), tmp.path().join("unimatch_db_v1.json"));
    }

    #[test]
    fn memory_backend_keeps_last_document() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.load().unwrap(), None);

        backend.persist("one").unwrap();
        backend.persist("two").unwrap();

        assert_eq!(backend.document(), Some("two"));
    }
}
