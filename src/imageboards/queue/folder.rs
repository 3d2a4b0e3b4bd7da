use futures::StreamExt;
use log::debug;
use std::path::Path;
use tokio::fs::{remove_file, try_exists, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::error::QueueError;
use super::{FetchOutcome, Queue};
use crate::imageboards::post::FileDescriptor;
use crate::progress::DownloadProgressUpdater;
use crate::requests::{Fetcher, RemoteBody};

/// Bodies are written and flushed in pieces of at most this many bytes.
const CHUNK_SIZE: usize = 1024;

impl<F: Fetcher> Queue<F> {
    /// Saves `file` into `folder` unless a file with that name is already there.
    ///
    /// The current storage location is tried first, then the legacy one. If neither has the
    /// file, nothing is written and [`QueueError::RemoteFileNotFound`] is returned.
    pub async fn fetch_file(
        &self,
        folder: &Path,
        board: &str,
        file: &FileDescriptor,
    ) -> Result<FetchOutcome, QueueError> {
        let output = folder.join(file.file_name());

        if try_exists(&output).await? {
            debug!("{} already exists", output.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let body = self.open_remote(board, file).await?;
        self.save(body, &output, file).await?;

        Ok(FetchOutcome::Downloaded)
    }

    async fn open_remote(
        &self,
        board: &str,
        file: &FileDescriptor,
    ) -> Result<RemoteBody, QueueError> {
        let current = self.server.file_url(&file.address);
        if let Ok(body) = self.fetcher.fetch_stream(&current).await {
            return Ok(body);
        }

        let legacy = self.server.legacy_file_url(board, &file.address);
        debug!("Falling back to {}", legacy);
        self.fetcher
            .fetch_stream(&legacy)
            .await
            .map_err(|_| QueueError::RemoteFileNotFound)
    }

    async fn save(
        &self,
        body: RemoteBody,
        output: &Path,
        file: &FileDescriptor,
    ) -> Result<(), QueueError> {
        debug!("Creating destination file {:?}", output);
        let mut out = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(output)
            .await?;

        let dl_updater = self
            .progress_listener
            .add_download_task(file.file_name(), body.content_length);

        let result = write_chunks(&mut out, body, dl_updater.as_ref()).await;
        dl_updater.finish();

        if result.is_err() {
            // A partial file would pass for a finished one on the next run.
            if let Err(error) = remove_file(output).await {
                debug!("Failed to remove partial file {:?}: {}", output, error);
            }
        }

        result
    }
}

/// Copies `body` into `out`, one flushed piece of at most [`CHUNK_SIZE`] bytes at a time.
async fn write_chunks<W: AsyncWrite + Unpin>(
    out: &mut W,
    mut body: RemoteBody,
    dl_updater: &dyn DownloadProgressUpdater,
) -> Result<(), QueueError> {
    let mut downloaded_bytes = 0;

    while let Some(item) = body.stream.next().await {
        let chunk = item.map_err(|source| QueueError::ChunkDownloadFail { source })?;

        // Empty chunks produce no pieces.
        for piece in chunk.chunks(CHUNK_SIZE) {
            out.write_all(piece).await?;
            out.flush().await?;
            downloaded_bytes += piece.len() as u64;
            dl_updater.set_progress(downloaded_bytes);
        }
    }

    out.flush().await?;
    debug!("Wrote {} bytes", downloaded_bytes);
    Ok(())
}
