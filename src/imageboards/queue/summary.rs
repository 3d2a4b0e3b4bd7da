use std::ops::AddAssign;

use super::FetchOutcome;

/// Tally of what a run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: u64,
    pub already_present: u64,
    pub failed_files: u64,
    /// Threads that could not be read or had no files.
    pub skipped_threads: u64,
}

impl Summary {
    pub(crate) fn skipped_thread() -> Self {
        Self {
            skipped_threads: 1,
            ..Self::default()
        }
    }

    pub(crate) fn record<E>(&mut self, outcome: &Result<FetchOutcome, E>) {
        match outcome {
            Ok(FetchOutcome::Downloaded) => self.downloaded += 1,
            Ok(FetchOutcome::AlreadyPresent) => self.already_present += 1,
            Err(_) => self.failed_files += 1,
        }
    }

    /// Number of files the run looked at.
    #[inline]
    pub fn total_files(&self) -> u64 {
        self.downloaded + self.already_present + self.failed_files
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        self.downloaded += rhs.downloaded;
        self.already_present += rhs.already_present;
        self.failed_files += rhs.failed_files;
        self.skipped_threads += rhs.skipped_threads;
    }
}
