use super::emoji_or_file::EmojiOrFile;
use super::property_spec::PropertySpec;
use super::reference::Reference;
use super::rich_text::RichTextList;
use crate::types::DatabaseId;
use chrono::{DateTime, Utc};

/// A database and its column definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: DatabaseId,
    pub parent: Reference,
    pub created: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
    pub title: RichTextList,
    pub icon: Option<EmojiOrFile>,
    pub cover: Option<EmojiOrFile>,
    pub url: Option<String>,
    pub property_specs: Vec<PropertySpec>,
}

impl Database {
    pub fn property_spec(&self, id_or_name: &str) -> Option<&PropertySpec> {
        self.property_specs
            .iter()
            .find(|s| s.name == id_or_name)
            .or_else(|| self.property_specs.iter().find(|s| s.id == id_or_name))
    }
}
