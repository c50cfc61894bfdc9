use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{PluginError, PluginResult};

/// Text file access used by plugins.
///
/// All implementations must:
/// - return the full contents on read, or an error (missing files are errors);
/// - replace the full contents on write;
/// - propagate every I/O failure, never retry or swallow it.
pub trait ManifestStore: Send + Sync {
    /// Read the whole file at `path` as UTF-8 text.
    fn read(&self, path: &Path) -> PluginResult<String>;

    /// Replace the contents of the file at `path`.
    fn write(&self, path: &Path, contents: &str) -> PluginResult<()>;
}

/// Store backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsManifestStore;

impl ManifestStore for FsManifestStore {
    fn read(&self, path: &Path) -> PluginResult<String> {
        fs::read_to_string(path).map_err(|source| PluginError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, contents: &str) -> PluginResult<()> {
        fs::write(path, contents).map_err(|source| PluginError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory store that counts reads and writes.
///
/// Intended for tests and dry runs.
#[derive(Default)]
pub struct InMemoryManifestStore {
    files: RwLock<HashMap<PathBuf, String>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    read_only: bool,
}

impl InMemoryManifestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes fail with `PermissionDenied`.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Seed (or overwrite) a file without counting it as a write.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files
            .write()
            .expect("lock poisoned")
            .insert(path.into(), contents.into());
    }

    /// Current contents of `path`, if present.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.read().expect("lock poisoned").get(path).cloned()
    }

    /// Number of successful reads served.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful writes applied.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ManifestStore for InMemoryManifestStore {
    fn read(&self, path: &Path) -> PluginResult<String> {
        let files = self.files.read().expect("lock poisoned");
        let contents = files.get(path).cloned().ok_or_else(|| PluginError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(contents)
    }

    fn write(&self, path: &Path, contents: &str) -> PluginResult<()> {
        if self.read_only {
            return Err(PluginError::Write {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only store"),
            });
        }
        self.files
            .write()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Podfile");
        fs::write(&path, "use_expo_modules!\n").unwrap();

        let store = FsManifestStore;
        assert_eq!(store.read(&path).unwrap(), "use_expo_modules!\n");
        store.write(&path, "replaced").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn fs_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsManifestStore.read(&dir.path().join("Podfile")).unwrap_err();
        match err {
            PluginError::Read { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn fs_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("Podfile");
        assert!(matches!(
            FsManifestStore.write(&path, "x"),
            Err(PluginError::Write { .. })
        ));
    }

    #[test]
    fn memory_counts_reads_and_writes() {
        let store = InMemoryManifestStore::new();
        store.insert("/p/Podfile", "a");
        assert_eq!(store.read_count(), 0);
        assert_eq!(store.read(Path::new("/p/Podfile")).unwrap(), "a");
        store.write(Path::new("/p/Podfile"), "b").unwrap();
        assert_eq!(store.read_count(), 1);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get(Path::new("/p/Podfile")).as_deref(), Some("b"));
    }

    #[test]
    fn memory_missing_and_read_only() {
        let store = InMemoryManifestStore::read_only();
        assert!(store.read(Path::new("/nope")).is_err());
        assert!(store.write(Path::new("/nope"), "x").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
