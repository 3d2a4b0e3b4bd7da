//! Walks the imageboard's JSON API: board to threads, thread to files.
use log::debug;

use self::error::ExtractorError;
use super::post::{FileDescriptor, PostList, ThreadPage};
use super::ServerConfig;
use crate::requests::{decode_json, Fetcher};

pub mod error;

pub struct ChanExtractor<'a, F: Fetcher> {
    fetcher: &'a F,
    server: &'a ServerConfig,
}

impl<'a, F: Fetcher> ChanExtractor<'a, F> {
    pub fn new(fetcher: &'a F, server: &'a ServerConfig) -> Self {
        Self { fetcher, server }
    }

    /// Every thread id of `board`, in the order the board lists them (page by page).
    pub async fn list_threads(&self, board: &str) -> Result<Vec<u64>, ExtractorError> {
        let url = self.server.thread_list_url(board);
        let pages: Vec<ThreadPage> = self.get_json(&url).await?;

        let threads: Vec<u64> = pages
            .into_iter()
            .flat_map(|page| page.threads.into_iter().map(|thread| thread.no))
            .collect();

        debug!("Found {} threads in /{}/", threads.len(), board);
        Ok(threads)
    }

    /// Every attachment of a thread, in post order, primary file before extra files.
    pub async fn list_files(
        &self,
        board: &str,
        thread: u64,
    ) -> Result<Vec<FileDescriptor>, ExtractorError> {
        let url = self.server.post_list_url(board, thread);
        let list: PostList = self.get_json(&url).await?;

        let files = list.files();

        debug!(
            "Thread /{}/{}: {} posts, {} files",
            board,
            thread,
            list.posts.len(),
            files.len()
        );
        Ok(files)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ExtractorError> {
        let body = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| ExtractorError::Fetch {
                url: url.to_string(),
                source,
            })?;

        decode_json(url, &body)
    }
}
