use std::path::PathBuf;
use std::sync::Arc;

use kidcon_types::{LocalTime, Result};
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::file_store::FileStore;

/// Appends text fragments to hour-bucketed files under a directory prefix.
///
/// The bucket for an append is `prefix/HH.txt`, where `HH` is the two-digit
/// hour of the clock at call time. A bucket is created lazily on the first
/// append within its hour: the file comes into existence holding a
/// timestamp header line, and the first fragment write then replaces the
/// whole file, so the header never survives the first append. Buckets are
/// keyed by hour only; the same hour on different days lands in the same
/// file unless the caller rotates `prefix` externally.
///
/// Appends on one appender are serialized by an internal mutex. Writers in
/// other processes are not, and can still lose an update to the
/// read-modify-write sequence.
pub struct LogBucketAppender {
    prefix: PathBuf,
    clock: Arc<dyn Clock>,
    store: Arc<dyn FileStore>,
    write_lock: Mutex<()>,
}

impl LogBucketAppender {
    pub fn new(prefix: impl Into<PathBuf>, clock: Arc<dyn Clock>, store: Arc<dyn FileStore>) -> Self {
        Self {
            prefix: prefix.into(),
            clock,
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The bucket path an append would target at instant `t`.
    pub fn bucket_path_at(&self, t: &LocalTime) -> PathBuf {
        self.prefix.join(format!("{}.txt", t.hour_label()))
    }

    /// Append `fragment` to the current hour's bucket.
    ///
    /// No separator is added; the bucket accumulates exactly the
    /// concatenation of appended fragments. Exactly one file is created or
    /// mutated per call.
    pub fn append(&self, fragment: &str) -> Result<()> {
        let _guard = self.write_lock.lock();

        let now = self.clock.now();
        let path = self.bucket_path_at(&now);

        if self.store.exists(&path) {
            let mut contents = self.store.read(&path)?;
            contents.push_str(fragment);
            self.store.write(&path, &contents)?;
        } else {
            tracing::debug!(path = %path.display(), "creating hour bucket");
            self.store.create_with_stamp(&path, &now.header_stamp())?;
            self.store.write(&path, fragment)?;
        }

        Ok(())
    }
}
