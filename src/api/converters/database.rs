// src/api/converters/database.rs

use super::date::TimestampConverter;
use super::emoji_or_file::EmojiOrFileConverter;
use super::page::insert_emoji_or_file;
use super::property_spec::{property_specs_to_api, PropertySpecConverter};
use super::reference::ReferenceConverter;
use super::rich_text::{rich_text_to_json, RichTextListConverter};
use crate::api::converter::ApiConverter;
use crate::api::wire::{encode, ApiDatabase};
use crate::error::ConversionError;
use crate::model::{Database, EmojiOrFile, PropertySpecList, Reference, RichTextList};
use crate::types::{DatabaseId, PageId};
use serde_json::{Map, Value};

pub struct DatabaseConverter;

impl ApiConverter for DatabaseConverter {
    type Api = ApiDatabase;
    type Model = Database;
    const NAME: &'static str = "DatabaseConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiDatabase) -> Result<Database, ConversionError> {
        Ok(Database {
            id: DatabaseId::from_wire(api.id),
            parent: ReferenceConverter.api_to_model(api.parent)?,
            created: TimestampConverter.api_to_model(api.created_time)?,
            last_edited: TimestampConverter.api_to_model(api.last_edited_time)?,
            title: RichTextListConverter.api_to_model(api.title)?,
            icon: api
                .icon
                .map(|icon| EmojiOrFileConverter.api_to_model(icon))
                .transpose()?,
            cover: api
                .cover
                .map(|cover| EmojiOrFileConverter.api_to_model(cover))
                .transpose()?,
            url: api.url,
            property_specs: PropertySpecConverter
                .api_to_model_list(api.properties.into_values().collect())?,
        })
    }
}

/// A database is always created inside a page.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseCreateParameters {
    pub parent_page_id: PageId,
    pub title: RichTextList,
    pub icon: Option<EmojiOrFile>,
    pub cover: Option<EmojiOrFile>,
    pub properties: PropertySpecList,
}

pub struct DatabaseCreateConverter;

impl ApiConverter for DatabaseCreateConverter {
    type Api = Value;
    type Model = DatabaseCreateParameters;
    const NAME: &'static str = "DatabaseCreateConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &DatabaseCreateParameters) -> Result<Value, ConversionError> {
        let parent = Reference::Page(model.parent_page_id.clone());
        let mut body = Map::new();
        body.insert(
            "parent".to_string(),
            encode(&ReferenceConverter.model_to_api(&parent)?, "reference")?,
        );
        body.insert("title".to_string(), rich_text_to_json(&model.title)?);
        insert_emoji_or_file(&mut body, "icon", model.icon.as_ref())?;
        insert_emoji_or_file(&mut body, "cover", model.cover.as_ref())?;
        body.insert(
            "properties".to_string(),
            property_specs_to_api(model.properties.specs())?,
        );
        Ok(Value::Object(body))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseUpdateParameters {
    pub title: Option<RichTextList>,
    pub properties: Option<PropertySpecList>,
}

pub struct DatabaseUpdateConverter;

impl ApiConverter for DatabaseUpdateConverter {
    type Api = Value;
    type Model = DatabaseUpdateParameters;
    const NAME: &'static str = "DatabaseUpdateConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &DatabaseUpdateParameters) -> Result<Value, ConversionError> {
        let mut body = Map::new();
        if let Some(title) = &model.title {
            body.insert("title".to_string(), rich_text_to_json(title)?);
        }
        if let Some(properties) = &model.properties {
            body.insert(
                "properties".to_string(),
                property_specs_to_api(properties.specs())?,
            );
        }
        Ok(Value::Object(body))
    }
}
