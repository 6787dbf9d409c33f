use super::emoji_or_file::EmojiOrFile;
use super::property_value::{PropertyData, PropertyValue};
use super::reference::Reference;
use super::rich_text::RichTextList;
use crate::types::PageId;
use chrono::{DateTime, Utc};

/// A page, either standalone or a row of a database.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub parent: Reference,
    pub created: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
    pub archived: bool,
    pub icon: Option<EmojiOrFile>,
    pub cover: Option<EmojiOrFile>,
    pub url: Option<String>,
    /// In server order
    pub property_values: Vec<PropertyValue>,
}

impl Page {
    /// The page title: the value of its single `title` property.
    pub fn title(&self) -> Option<&RichTextList> {
        self.property_values.iter().find_map(|p| match &p.value {
            PropertyData::Title(title) => Some(title),
            _ => None,
        })
    }

    /// Look up a property value by name, falling back to its ID.
    pub fn property(&self, id_or_name: &str) -> Option<&PropertyValue> {
        self.property_values
            .iter()
            .find(|p| p.name == id_or_name)
            .or_else(|| self.property_values.iter().find(|p| p.id == id_or_name))
    }
}
