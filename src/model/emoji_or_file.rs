use chrono::{DateTime, Utc};

/// Icon or cover of a page, database or callout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmojiOrFile {
    Emoji(String),
    /// A hosted (`file`) or linked (`external`) image. Hosted URLs expire.
    File {
        url: String,
        expiry_time: Option<DateTime<Utc>>,
    },
    Unknown {
        type_name: String,
    },
}

impl EmojiOrFile {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        EmojiOrFile::Emoji(emoji.into())
    }

    pub fn external(url: impl Into<String>) -> Self {
        EmojiOrFile::File {
            url: url.into(),
            expiry_time: None,
        }
    }
}

/// A file attached to a `files` property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    pub name: String,
    pub url: Option<String>,
}
