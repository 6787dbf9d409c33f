// src/api/converters/page.rs
//! Pages, and the bodies of page create and update requests.

use super::block::BlockOutConverter;
use super::date::TimestampConverter;
use super::emoji_or_file::EmojiOrFileConverter;
use super::property_value::{property_values_to_api, PropertyDataConverter};
use super::reference::ReferenceConverter;
use crate::api::converter::ApiConverter;
use crate::api::wire::{encode, ApiPage};
use crate::error::ConversionError;
use crate::model::{
    EmojiOrFile, MutableBlockList, Page, PropertyValue, PropertyValueList, Reference,
};
use crate::types::PageId;
use serde_json::{Map, Value};

pub struct PageConverter;

impl ApiConverter for PageConverter {
    type Api = ApiPage;
    type Model = Page;
    const NAME: &'static str = "PageConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiPage) -> Result<Page, ConversionError> {
        let mut property_values = Vec::with_capacity(api.properties.len());
        for (name, mut value) in api.properties {
            let id = std::mem::take(&mut value.id);
            property_values.push(PropertyValue {
                id,
                name,
                value: PropertyDataConverter.api_to_model(value)?,
            });
        }

        Ok(Page {
            id: PageId::from_wire(api.id),
            parent: ReferenceConverter.api_to_model(api.parent)?,
            created: TimestampConverter.api_to_model(api.created_time)?,
            last_edited: TimestampConverter.api_to_model(api.last_edited_time)?,
            archived: api.archived,
            icon: api
                .icon
                .map(|icon| EmojiOrFileConverter.api_to_model(icon))
                .transpose()?,
            cover: api
                .cover
                .map(|cover| EmojiOrFileConverter.api_to_model(cover))
                .transpose()?,
            url: api.url,
            property_values,
        })
    }
}

/// Encodes an optional icon or cover into `body[key]`.
pub(crate) fn insert_emoji_or_file(
    body: &mut Map<String, Value>,
    key: &str,
    value: Option<&EmojiOrFile>,
) -> Result<(), ConversionError> {
    if let Some(value) = value {
        let api = EmojiOrFileConverter.model_to_api(value)?;
        body.insert(key.to_string(), encode(&api, "icon")?);
    }
    Ok(())
}

/// Everything needed to create a page under a database or another page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCreateParameters {
    pub parent: Reference,
    pub properties: PropertyValueList,
    pub content: Option<MutableBlockList>,
    pub icon: Option<EmojiOrFile>,
    pub cover: Option<EmojiOrFile>,
}

pub struct PageCreateConverter;

impl ApiConverter for PageCreateConverter {
    type Api = Value;
    type Model = PageCreateParameters;
    const NAME: &'static str = "PageCreateConverter";
    const ENCODES: bool = true;

    fn model_to_api(&self, model: &PageCreateParameters) -> Result<Value, ConversionError> {
        let mut body = Map::new();
        body.insert(
            "parent".to_string(),
            encode(&ReferenceConverter.model_to_api(&model.parent)?, "reference")?,
        );
        body.insert(
            "properties".to_string(),
            property_values_to_api(model.properties.values())?,
        );
        if let Some(content) = &model.content {
            body.insert(
                "children".to_string(),
                Value::Array(BlockOutConverter.model_to_api_list(content.blocks())?),
            );
        }
        insert_emoji_or_file(&mut body, "icon", model.icon.as_ref())?;
        insert_emoji_or_file(&mut body, "cover", model.cover.as_ref())?;
        Ok(Value::Object(body))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageUpdateParameters {
    pub properties: PropertyValueList,
    pub archived: Option<bool>,
}

pub struct PageUpdateConverter;

impl ApiConverter for PageUpdateConverter {
    type Api = Value;
    type Model = PageUpdateParameters;
    const NAME: &'static str = "PageUpdateConverter";
    const ENCODES: bool = true;

    /// `properties` is left out of archive-only updates.
    fn model_to_api(&self, model: &PageUpdateParameters) -> Result<Value, ConversionError> {
        let mut body = Map::new();
        if !model.properties.is_empty() || model.archived.is_none() {
            body.insert(
                "properties".to_string(),
                property_values_to_api(model.properties.values())?,
            );
        }
        if let Some(archived) = model.archived {
            body.insert("archived".to_string(), Value::Bool(archived));
        }
        Ok(Value::Object(body))
    }
}
