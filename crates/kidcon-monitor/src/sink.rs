use kidcon_capture::LogBucketAppender;
use kidcon_types::Result;
use parking_lot::Mutex;

/// Caller-facing log channel. Receives complete report lines; their format
/// is owned by the reporter, not the sink.
pub trait LogSink: Send + Sync {
    fn emit(&self, line: &str) -> Result<()>;
}

/// Emits report lines to the informational log channel.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &str) -> Result<()> {
        tracing::info!("{}", line);
        Ok(())
    }
}

/// Routes report lines into an hour-bucket appender, one line per fragment.
pub struct BucketSink {
    appender: LogBucketAppender,
}

impl BucketSink {
    pub fn new(appender: LogBucketAppender) -> Self {
        Self { appender }
    }
}

impl LogSink for BucketSink {
    fn emit(&self, line: &str) -> Result<()> {
        self.appender.append(&format!("{}\n", line))
    }
}

/// Buffers emitted lines in memory for tests.
pub struct MemSink {
    lines: Mutex<Vec<String>>,
}

impl MemSink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Default for MemSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemSink {
    fn emit(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
