//! Models for the thread index and post list JSON, and the [`FileDescriptor`]s derived from them.
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// One downloadable attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Original file name plus extension. Used as the local file name.
    pub name: String,
    /// Remote storage key plus extension. Identical in both storage locations.
    pub address: String,
}

impl FileDescriptor {
    /// Local file name with path separators neutralized, so a remote name can never escape
    /// the thread folder.
    pub fn file_name(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                c => c,
            })
            .collect();

        match name.as_str() {
            "" | "." | ".." => format!("_{}", name),
            _ => name,
        }
    }
}

/// A single page of `threads.json`.
#[derive(Debug, Deserialize)]
pub struct ThreadPage {
    #[serde(default)]
    pub threads: Vec<ThreadStub>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadStub {
    pub no: u64,
}

/// Body of `res/<thread>.json`.
#[derive(Debug, Deserialize)]
pub struct PostList {
    #[serde(default, deserialize_with = "tolerant_list")]
    pub posts: Vec<ChanPost>,
}

/// Reads an optional field, treating a value of the wrong type as absent.
fn tolerant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Reads a list entry by entry, dropping the entries that do not fit `T`.
fn tolerant_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        other => {
            warn!("Expected a list, got {}", other);
            Vec::new()
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Skipping malformed entry: {}", err);
                None
            }
        })
        .collect())
}

/// The remote storage key. Newer boards hand out hashes, older ones a numeric timestamp.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StorageKey {
    Text(String),
    Number(u64),
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKey::Text(key) => f.write_str(key),
            StorageKey::Number(key) => write!(f, "{}", key),
        }
    }
}

/// Attachment fields as they appear on a post or inside `extra_files`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    #[serde(default, deserialize_with = "tolerant")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "tolerant")]
    pub ext: Option<String>,
    #[serde(default, deserialize_with = "tolerant")]
    pub tim: Option<StorageKey>,
}

impl Attachment {
    /// Whether the entry declares a file at all.
    #[inline]
    pub fn has_file(&self) -> bool {
        self.ext.as_deref().map_or(false, |ext| !ext.is_empty())
    }

    /// Builds the descriptor, or `None` if a required field is missing or malformed.
    pub fn descriptor(&self) -> Option<FileDescriptor> {
        let ext = self.ext.as_deref()?;
        let filename = self.filename.as_deref()?;
        let tim = self.tim.as_ref()?;

        Some(FileDescriptor {
            name: format!("{}{}", filename, ext),
            address: format!("{}{}", tim, ext),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChanPost {
    #[serde(default, deserialize_with = "tolerant")]
    pub no: Option<u64>,
    #[serde(flatten)]
    pub attachment: Attachment,
    #[serde(default, deserialize_with = "tolerant_list")]
    pub extra_files: Vec<Attachment>,
}

impl ChanPost {
    /// Every file attached to this post, primary first.
    ///
    /// Attachments missing one of their fields are skipped.
    pub fn files(&self) -> Vec<FileDescriptor> {
        let mut files = Vec::with_capacity(1 + self.extra_files.len());

        let primary = Some(&self.attachment).filter(|a| a.has_file());

        for attachment in primary.into_iter().chain(&self.extra_files) {
            match attachment.descriptor() {
                Some(file) => files.push(file),
                None => warn!(
                    "Post {:?} has an attachment with missing fields: {:?}",
                    self.no, attachment
                ),
            }
        }

        files
    }
}

impl PostList {
    /// Flattens the files of every post, in post order.
    pub fn files(&self) -> Vec<FileDescriptor> {
        self.posts.iter().flat_map(ChanPost::files).collect()
    }
}
