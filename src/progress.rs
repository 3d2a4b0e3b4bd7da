use std::fmt::Debug;
use std::sync::Arc;

/// Type of log event, used for styling messages in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    /// General informational message.
    Info,
    /// Nothing to do for this item (already on disk, empty thread).
    Skip,
    /// File was downloaded.
    Success,
    /// An error occurred for a specific thread or file.
    Error,
}

/// Receives progress from the download queue.
///
/// The main progress counts threads; download tasks track the bytes of a single file.
pub trait ProgressListener: Send + Sync + Debug {
    /// Sets the total number of threads that will be processed.
    fn set_main_total(&self, total: u64);
    /// Signals that one thread has been processed.
    fn main_tick(&self);
    /// Signals that every thread has been processed.
    fn main_done(&self);

    /// Adds a new task tracking the download of a single file.
    ///
    /// `total_size` is the size advertised by the server, if any.
    fn add_download_task(
        &self,
        name: String,
        total_size: Option<u64>,
    ) -> Box<dyn DownloadProgressUpdater>;

    /// Logs a categorized status line about `target` (a board, a thread or a file).
    fn log_event(&self, log_type: LogType, target: &str, message: &str);
}

/// Updates the progress of a single file download.
pub trait DownloadProgressUpdater: Send + Sync + Debug {
    /// Sets the number of bytes written so far.
    fn set_progress(&self, bytes_downloaded: u64);
    /// Signals that this download is finished, successfully or not.
    fn finish(&self);
}

#[derive(Debug, Clone)]
pub struct NoOpProgressListener;

impl ProgressListener for NoOpProgressListener {
    fn set_main_total(&self, _total: u64) {}
    fn main_tick(&self) {}
    fn main_done(&self) {}
    fn add_download_task(
        &self,
        _name: String,
        _total_size: Option<u64>,
    ) -> Box<dyn DownloadProgressUpdater> {
        Box::new(NoOpDownloadProgressUpdater)
    }
    fn log_event(&self, _log_type: LogType, _target: &str, _message: &str) {}
}

#[derive(Debug, Clone)]
pub struct NoOpDownloadProgressUpdater;

impl DownloadProgressUpdater for NoOpDownloadProgressUpdater {
    fn set_progress(&self, _bytes_downloaded: u64) {}
    fn finish(&self) {}
}

pub type SharedProgressListener = Arc<dyn ProgressListener>;

/// Returns a shared instance of a `NoOpProgressListener`.
pub fn no_op_progress_listener() -> SharedProgressListener {
    Arc::new(NoOpProgressListener)
}
