use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use kidcon_types::{Result, Status, StatusCode};
use parking_lot::Mutex;

/// Host file-store collaborator for bucket files.
///
/// Capability set: exists, read, write (full overwrite), and create with a
/// timestamp header line. The header write is kept as its own primitive; it
/// is the host environment's "print timestamp into a new file" call.
pub trait FileStore: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of `path` as text.
    fn read(&self, path: &Path) -> Result<String>;

    /// Overwrite `path` with `contents` in full.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Create the file at `path` holding a single formatted-timestamp line.
    fn create_with_stamp(&self, path: &Path, stamp: &str) -> Result<()>;
}

/// File store backed by the local filesystem.
///
/// Overwrites go through a temp file and rename so a failed write never
/// leaves a half-written bucket behind.
pub struct LocalFileStore;

impl LocalFileStore {
    fn atomic_write(&self, path: &Path, contents: &str) -> Result<()> {
        let dir = path.parent().unwrap_or(Path::new("."));
        let tmp_path = dir.join(format!(".tmp.{}", std::process::id()));
        std::fs::write(&tmp_path, contents).map_err(|e| {
            Status::with_message(
                StatusCode::IO_ERROR,
                format!("write {}: {}", tmp_path.display(), e),
            )
        })?;
        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            Status::with_message(
                StatusCode::IO_ERROR,
                format!("rename into {}: {}", path.display(), e),
            )
        })
    }
}

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            Status::with_message(
                StatusCode::IO_ERROR,
                format!("read {}: {}", path.display(), e),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.atomic_write(path, contents)
    }

    fn create_with_stamp(&self, path: &Path, stamp: &str) -> Result<()> {
        self.atomic_write(path, &format!("{}\n", stamp))
    }
}

/// In-memory file store for tests and inspection.
pub struct MemFileStore {
    files: Mutex<HashMap<PathBuf, String>>,
    fail_writes: AtomicBool,
}

impl MemFileStore {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail, simulating a store that rejects
    /// writes (out of quota, read-only, ...).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Current contents of `path`, if present.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().get(path).cloned()
    }

    /// Number of stored files.
    pub fn file_count(&self) -> usize {
        self.files.lock().len()
    }

    /// Remove `path`, simulating a concurrent deletion.
    pub fn remove(&self, path: &Path) {
        self.files.lock().remove(path);
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(Status::with_message(
                StatusCode::IO_ERROR,
                format!("write {}: store rejected write", path.display()),
            ));
        }
        Ok(())
    }
}

impl Default for MemFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for MemFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files.lock().get(path).cloned().ok_or_else(|| {
            Status::with_message(
                StatusCode::IO_ERROR,
                format!("read {}: no such file", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.check_writable(path)?;
        self.files.lock().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_with_stamp(&self, path: &Path, stamp: &str) -> Result<()> {
        self.check_writable(path)?;
        self.files
            .lock()
            .insert(path.to_path_buf(), format!("{}\n", stamp));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_local_store_roundtrip() {
        let dir = std::env::temp_dir().join("kidcon-test-local-store");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let store = LocalFileStore;
        let path = dir.join("14.txt");

        assert!(!store.exists(&path));
        store.write(&path, "hello\n").unwrap();
        assert!(store.exists(&path));
        assert_eq!(store.read(&path).unwrap(), "hello\n");

        // Overwrite replaces in full.
        store.write(&path, "world\n").unwrap();
        assert_eq!(store.read(&path).unwrap(), "world\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_local_store_create_with_stamp() {
        let dir = std::env::temp_dir().join("kidcon-test-local-stamp");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let store = LocalFileStore;
        let path = dir.join("09.txt");
        store.create_with_stamp(&path, "Thu Aug  6 09:00:00 2026").unwrap();
        assert_eq!(store.read(&path).unwrap(), "Thu Aug  6 09:00:00 2026\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_local_store_missing_dir_is_io_error() {
        let store = LocalFileStore;
        let path = std::env::temp_dir()
            .join("kidcon-test-no-such-dir")
            .join("14.txt");
        let err = store.write(&path, "x").unwrap_err();
        assert_eq!(err.code(), StatusCode::IO_ERROR);
    }

    #[test]
    fn test_mem_store_read_missing() {
        let store = MemFileStore::new();
        let err = store.read(Path::new("/b/14.txt")).unwrap_err();
        assert_eq!(err.code(), StatusCode::IO_ERROR);
    }

    #[test]
    fn test_mem_store_fail_writes() {
        let store = MemFileStore::new();
        store.write(Path::new("/b/14.txt"), "ok").unwrap();

        store.set_fail_writes(true);
        let err = store.write(Path::new("/b/14.txt"), "nope").unwrap_err();
        assert_eq!(err.code(), StatusCode::IO_ERROR);
        // Failed write left the previous contents alone.
        assert_eq!(store.contents(Path::new("/b/14.txt")).unwrap(), "ok");
    }
}
