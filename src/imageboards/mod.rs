//! Remote site description and the building blocks used to walk it.
//!
//! A chan-style imageboard exposes a read-only JSON API on one host and serves
//! attachments from a separate media host. Attachments may live in one of two
//! storage locations: the current content-addressed `file_store` or the legacy
//! per-board `src` directory.
use log::debug;
use std::path::{Path, PathBuf};

pub mod extractors;
pub mod macros;
pub mod post;
pub mod queue;

pub(crate) const DEFAULT_CLI_UA: &str =
    concat!("Rust Chan Downloader/", env!("CARGO_PKG_VERSION"));

/// Everything needed to talk to one imageboard and lay its files out on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Human readable name, only used for display.
    pub pretty_name: String,
    /// Base URL of the JSON API, without a trailing slash.
    pub api_url: String,
    /// Base URL of the media host, without a trailing slash.
    pub media_url: String,
    pub client_user_agent: String,
    /// Name of the top level folder files are saved under.
    pub root_folder: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            pretty_name: String::from("8chan"),
            api_url: String::from("https://8ch.net"),
            media_url: String::from("https://media.8ch.net"),
            client_user_agent: String::from(DEFAULT_CLI_UA),
            root_folder: String::from("8ch"),
        }
    }
}

impl ServerConfig {
    /// Paged index of every thread in `board`.
    #[inline]
    pub fn thread_list_url(&self, board: &str) -> String {
        format!("{}/{}/threads.json", self.api_url, board)
    }

    /// Full post list of a single thread.
    #[inline]
    pub fn post_list_url(&self, board: &str, thread: u64) -> String {
        format!("{}/{}/res/{}.json", self.api_url, board, thread)
    }

    /// Current, content-addressed location of an attachment.
    #[inline]
    pub fn file_url(&self, address: &str) -> String {
        format!("{}/file_store/{}", self.media_url, address)
    }

    /// Legacy per-board location of an attachment.
    #[inline]
    pub fn legacy_file_url(&self, board: &str, address: &str) -> String {
        format!("{}/{}/src/{}", self.media_url, board, address)
    }
}

/// Returns the folder a thread's files are saved to: `<main_path>/<root>/<board>/<thread>`.
///
/// ```rust
/// use chan_downloader::imageboards::{generate_thread_path, ServerConfig};
/// use std::path::{Path, PathBuf};
///
/// let path = generate_thread_path(Path::new("."), &ServerConfig::default(), "tech", 1234);
///
/// assert_eq!(PathBuf::from("./8ch/tech/1234"), path);
/// ```
#[inline]
pub fn generate_thread_path(
    main_path: &Path,
    server: &ServerConfig,
    board: &str,
    thread: u64,
) -> PathBuf {
    let out = main_path
        .join(&server.root_folder)
        .join(board)
        .join(thread.to_string());
    debug!("Target dir: {}", out.display());
    out
}
