//! Sequential download queue: walks a board or a single thread and saves every attachment
//! under `<output>/<root>/<board>/<thread>/`.
//!
//! # Example usage
//!
//! ```no_run
//! use chan_downloader::imageboards::queue::{Queue, QueueOpts};
//! use chan_downloader::imageboards::ServerConfig;
//! use chan_downloader::requests::HttpFetcher;
//! use std::path::PathBuf;
//!
//! async fn download_board() {
//!     let server = ServerConfig::default();
//!     let fetcher = HttpFetcher::new(&server).unwrap();
//!
//!     let opts = QueueOpts {
//!         verbose: false,
//!         output: PathBuf::from("."),
//!     };
//!
//!     let queue = Queue::new(server, fetcher, opts, None);
//!
//!     // Every thread of /tech/, one after another
//!     let summary = queue.download("tech", None).await;
//!
//!     println!("{} files downloaded", summary.downloaded);
//! }
//! ```
use colored::Colorize;
use log::{debug, error};
use std::path::PathBuf;

use self::error::QueueError;
use self::summary::Summary;
use super::extractors::ChanExtractor;
use super::{generate_thread_path, ServerConfig};
use crate::progress::{no_op_progress_listener, LogType, SharedProgressListener};
use crate::requests::Fetcher;
use crate::thread_target;

pub mod error;
mod folder;
pub mod summary;

/// Result of a single file fetch that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was written to disk.
    Downloaded,
    /// The file was already on disk, nothing was requested.
    AlreadyPresent,
}

/// Options for the queue's output.
#[derive(Debug, Clone)]
pub struct QueueOpts {
    /// Also report files that were already on disk and the full thread list of a board.
    pub verbose: bool,
    /// Directory the site's root folder is created in.
    pub output: PathBuf,
}

impl Default for QueueOpts {
    fn default() -> Self {
        Self {
            verbose: false,
            output: PathBuf::from("."),
        }
    }
}

/// Struct where all the downloading takes place.
pub struct Queue<F: Fetcher> {
    server: ServerConfig,
    fetcher: F,
    verbose: bool,
    output: PathBuf,
    progress_listener: SharedProgressListener,
}

impl<F: Fetcher> Queue<F> {
    /// Set up the queue for download
    pub fn new(
        server: ServerConfig,
        fetcher: F,
        options: QueueOpts,
        progress_listener: Option<SharedProgressListener>,
    ) -> Self {
        Self {
            server,
            fetcher,
            verbose: options.verbose,
            output: options.output,
            progress_listener: progress_listener.unwrap_or_else(no_op_progress_listener),
        }
    }

    #[inline]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Downloads a single thread if one is given, the whole board otherwise.
    pub async fn download(&self, board: &str, thread: Option<u64>) -> Summary {
        let summary = match thread {
            Some(thread) => {
                self.progress_listener.set_main_total(1);
                let summary = self.process_thread(board, thread).await;
                self.progress_listener.main_tick();
                summary
            }
            None => self.process_board(board).await,
        };

        self.progress_listener.main_done();
        summary
    }

    /// Processes every thread of `board`, in the order the board lists them.
    pub async fn process_board(&self, board: &str) -> Summary {
        let target = format!("/{}/", board);
        self.progress_listener
            .log_event(LogType::Info, &target, "getting thread list");

        let threads = match ChanExtractor::new(&self.fetcher, &self.server)
            .list_threads(board)
            .await
        {
            Ok(threads) => threads,
            Err(err) => {
                debug!("Skipping board {}: {}", target, err);
                return Summary::default();
            }
        };

        if self.verbose {
            self.progress_listener
                .log_event(LogType::Info, &target, &format!("threads: {:?}", threads));
        }

        self.progress_listener.set_main_total(threads.len() as u64);

        let mut summary = Summary::default();
        for thread in threads {
            summary += self.process_thread(board, thread).await;
            self.progress_listener.main_tick();
        }

        summary
    }

    /// Downloads every attachment of one thread that is not already on disk.
    pub async fn process_thread(&self, board: &str, thread: u64) -> Summary {
        let target = thread_target!(board, thread);
        self.progress_listener
            .log_event(LogType::Info, &target, "getting image list");

        let files = match ChanExtractor::new(&self.fetcher, &self.server)
            .list_files(board, thread)
            .await
        {
            Ok(files) if !files.is_empty() => files,
            Ok(_) => {
                self.no_files(&target);
                return Summary::skipped_thread();
            }
            Err(err) => {
                debug!("Skipping thread {}: {}", target, err);
                self.no_files(&target);
                return Summary::skipped_thread();
            }
        };

        let folder = generate_thread_path(&self.output, &self.server, board, thread);
        if let Err(error) = tokio::fs::create_dir_all(&folder).await {
            let err = QueueError::DirCreationError {
                message: error.to_string(),
            };
            error!("{}: {}", folder.display(), err);
            self.progress_listener
                .log_event(LogType::Error, &target, &err.to_string());
            return Summary::skipped_thread();
        }

        let mut summary = Summary::default();
        for file in &files {
            let outcome = self.fetch_file(&folder, board, file).await;
            let file_target = format!("{}/{}", target, file.file_name());

            match &outcome {
                Ok(FetchOutcome::Downloaded) => self.progress_listener.log_event(
                    LogType::Success,
                    &file_target,
                    "fetched",
                ),
                Ok(FetchOutcome::AlreadyPresent) => {
                    if self.verbose {
                        self.progress_listener.log_event(
                            LogType::Skip,
                            &file_target,
                            "already exists",
                        )
                    }
                }
                Err(err) => {
                    error!("Failed to download {}: {}", file_target, err);
                    self.progress_listener
                        .log_event(LogType::Error, &file_target, &err.to_string())
                }
            }

            summary.record(&outcome);
        }

        debug!(
            "Thread {}: {} fetched, {} present, {} failed",
            target.bold(),
            summary.downloaded,
            summary.already_present,
            summary.failed_files
        );
        summary
    }

    fn no_files(&self, target: &str) {
        self.progress_listener
            .log_event(LogType::Skip, target, "No image or thread found");
    }
}
