//! HTTP plumbing shared by the extractor and the download queue.
//!
//! Every request goes through the [`Fetcher`] trait. Failures are logged here, with the
//! offending URL, and handed back as a [`FetchError`] so callers only decide what to skip.
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::imageboards::extractors::error::ExtractorError;
use crate::imageboards::ServerConfig;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Connection Error: {source}")]
    ConnectionError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Server returned status {status}")]
    BadStatus { status: StatusCode },
}

/// A response body that has not been read yet.
pub struct RemoteBody {
    /// Size advertised by the server, if any.
    pub content_length: Option<u64>,
    pub stream: BoxStream<'static, Result<Bytes, FetchError>>,
}

/// Issues GET requests against the imageboard.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the whole body of `url` into memory.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;

    /// Starts fetching `url` and returns the body as a stream to be consumed by the caller.
    async fn fetch_stream(&self, url: &str) -> Result<RemoteBody, FetchError>;
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(server: &ServerConfig) -> Result<Self, FetchError> {
        let client = crate::client!(server);
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}", url);
        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus { status });
        }

        Ok(res)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let body = match self.get(url).await {
            Ok(res) => res.bytes().await.map_err(FetchError::from),
            Err(err) => Err(err),
        };

        body.map_err(|err| log_failure(url, err))
    }

    async fn fetch_stream(&self, url: &str) -> Result<RemoteBody, FetchError> {
        let res = self.get(url).await.map_err(|err| log_failure(url, err))?;

        Ok(RemoteBody {
            content_length: res.content_length(),
            stream: res.bytes_stream().map_err(FetchError::from).boxed(),
        })
    }
}

fn log_failure(url: &str, err: FetchError) -> FetchError {
    error!("Problem when getting: {}", url);
    error!("{}", err);
    err
}

/// Parses a buffered response body as JSON.
pub fn decode_json<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, ExtractorError> {
    serde_json::from_slice(body).map_err(|source| {
        error!("Problem decoding response from {}", url);
        error!("{}", source);
        ExtractorError::Decode {
            url: url.to_string(),
            source,
        }
    })
}
