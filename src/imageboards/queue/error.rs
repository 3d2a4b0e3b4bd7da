use std::io;

use thiserror::Error;

use crate::requests::FetchError;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to create destination directory. error: {message}")]
    DirCreationError { message: String },

    #[error("File not found in current or legacy storage")]
    RemoteFileNotFound,

    #[error("Error while fetching chunk: {source}")]
    ChunkDownloadFail { source: FetchError },
}
