//! # Chan Downloader
//!
//! chan_downloader is a CLI utility to download every file attachment of a chan-style
//! imageboard board or thread into `./<site>/<board>/<thread>/`.
//!
//! Threads and files are processed one at a time. Files already on disk are never
//! requested again, so a board can be re-run to pick up only what is new.
pub mod cli;
pub mod imageboards;
pub mod progress;
pub mod progress_bars;
pub mod requests;

#[cfg(test)]
pub(crate) mod test_helpers;

// Export the site description and the download queue
pub use imageboards::queue::{summary::Summary, FetchOutcome, Queue, QueueOpts};
pub use imageboards::ServerConfig;

pub use imageboards::post::FileDescriptor;

pub use requests::{Fetcher, HttpFetcher};
