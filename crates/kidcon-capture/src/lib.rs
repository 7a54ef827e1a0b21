pub mod bucket;
pub mod clock;
pub mod config;
pub mod file_store;

pub use bucket::LogBucketAppender;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CaptureConfig;
pub use file_store::{FileStore, LocalFileStore, MemFileStore};
