use thiserror::Error;

use crate::requests::FetchError;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Imageboard returned an invalid response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}
