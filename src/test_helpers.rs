//! Doubles shared by the unit tests: an in-memory [`Fetcher`] and a recording [`ProgressListener`].
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::imageboards::ServerConfig;
use crate::progress::{DownloadProgressUpdater, LogType, NoOpDownloadProgressUpdater, ProgressListener};
use crate::requests::{FetchError, Fetcher, RemoteBody};

/// Size the mock splits streamed bodies into, deliberately not a multiple of the write chunk.
const MOCK_CHUNK: usize = 700;

pub(crate) fn test_server() -> ServerConfig {
    ServerConfig {
        api_url: String::from("http://api.test"),
        media_url: String::from("http://media.test"),
        ..ServerConfig::default()
    }
}

enum MockBody {
    Complete(Vec<u8>),
    /// Yields the bytes, then fails.
    Broken(Vec<u8>),
}

/// Serves canned bodies by URL and answers 404 for everything else.
#[derive(Default)]
pub(crate) struct MockFetcher {
    bodies: HashMap<String, MockBody>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl AsRef<[u8]>) -> Self {
        self.bodies
            .insert(url.into(), MockBody::Complete(body.as_ref().to_vec()));
        self
    }

    pub fn with_broken_body(mut self, url: impl Into<String>, partial: impl AsRef<[u8]>) -> Self {
        self.bodies
            .insert(url.into(), MockBody::Broken(partial.as_ref().to_vec()));
        self
    }

    /// Every URL requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn lookup(&self, url: &str) -> Result<&MockBody, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.bodies.get(url).ok_or(FetchError::BadStatus {
            status: StatusCode::NOT_FOUND,
        })
    }
}

fn split(body: &[u8]) -> Vec<Result<Bytes, FetchError>> {
    // Leading empty chunk, as some servers send one.
    let mut chunks = vec![Ok(Bytes::new())];
    chunks.extend(
        body.chunks(MOCK_CHUNK)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk))),
    );
    chunks
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        match self.lookup(url)? {
            MockBody::Complete(body) => Ok(Bytes::copy_from_slice(body)),
            MockBody::Broken(_) => Err(FetchError::BadStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }),
        }
    }

    async fn fetch_stream(&self, url: &str) -> Result<RemoteBody, FetchError> {
        let (content_length, chunks) = match self.lookup(url)? {
            MockBody::Complete(body) => (Some(body.len() as u64), split(body)),
            MockBody::Broken(partial) => {
                let mut chunks = split(partial);
                chunks.push(Err(FetchError::BadStatus {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }));
                (None, chunks)
            }
        };

        Ok(RemoteBody {
            content_length,
            stream: stream::iter(chunks).boxed(),
        })
    }
}

/// Keeps every event it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingListener {
    events: Mutex<Vec<(LogType, String, String)>>,
    main_total: Mutex<Option<u64>>,
    ticks: Mutex<u64>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<(LogType, String, String)> {
        self.events.lock().unwrap().clone()
    }

    /// Events of one kind, as `target message` lines.
    pub fn lines(&self, log_type: LogType) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(kind, _, _)| *kind == log_type)
            .map(|(_, target, message)| format!("{} {}", target, message))
            .collect()
    }

    pub fn main_total(&self) -> Option<u64> {
        *self.main_total.lock().unwrap()
    }

    pub fn ticks(&self) -> u64 {
        *self.ticks.lock().unwrap()
    }
}

impl ProgressListener for RecordingListener {
    fn set_main_total(&self, total: u64) {
        *self.main_total.lock().unwrap() = Some(total);
    }

    fn main_tick(&self) {
        *self.ticks.lock().unwrap() += 1;
    }

    fn main_done(&self) {}

    fn add_download_task(
        &self,
        _name: String,
        _total_size: Option<u64>,
    ) -> Box<dyn DownloadProgressUpdater> {
        Box::new(NoOpDownloadProgressUpdater)
    }

    fn log_event(&self, log_type: LogType, target: &str, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((log_type, target.to_string(), message.to_string()));
    }
}
