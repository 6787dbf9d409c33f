// src/api/wire.rs
//! Wire shapes of the Notion API, as serde structs.
//!
//! Tagged unions are read as `{type, <type>: payload}`: the discriminator is
//! a plain field and the payload stays in a flattened map until a converter
//! takes it out by the type name. Structs that are also sent back derive
//! `Serialize` and skip absent optionals.

use crate::error::ConversionError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Removes the payload keyed by `key` and decodes it.
pub(crate) fn take_payload<T: DeserializeOwned>(
    payload: &mut Map<String, Value>,
    family: &'static str,
    key: &str,
) -> Result<T, ConversionError> {
    let value = payload
        .remove(key)
        .ok_or_else(|| ConversionError::MissingField {
            family,
            field: key.to_string(),
        })?;
    serde_json::from_value(value).map_err(|source| ConversionError::Malformed { family, source })
}

/// Decodes a whole response body.
pub(crate) fn decode<T: DeserializeOwned>(
    value: Value,
    family: &'static str,
) -> Result<T, ConversionError> {
    serde_json::from_value(value).map_err(|source| ConversionError::Malformed { family, source })
}

/// Serializes a wire struct into a request body fragment.
pub(crate) fn encode<T: Serialize>(
    value: &T,
    family: &'static str,
) -> Result<Value, ConversionError> {
    serde_json::to_value(value).map_err(|source| ConversionError::Malformed { family, source })
}

// ---------------------------------------------------------------------------
// Rich text
// ---------------------------------------------------------------------------

fn default_color() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAnnotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiText {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<ApiLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEquation {
    pub expression: String,
}

/// `{id}` object, as in page and database mentions and relation values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiIdRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMention {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ApiUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<ApiIdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<ApiIdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<ApiDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRichText {
    #[serde(rename = "type")]
    pub kind: String,
    /// Computed by the server; never sent.
    #[serde(default, skip_serializing)]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing)]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ApiAnnotations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<ApiText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<ApiMention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<ApiEquation>,
}

// ---------------------------------------------------------------------------
// Users, dates, references, files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPerson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub id: String,
    /// Absent on partial users
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<ApiPerson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDate {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReference {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiExternal {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEmojiOrFile {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<ApiFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ApiExternal>,
}

/// Entry of a `files` property value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiFileRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file: Option<ApiFile>,
    #[serde(default)]
    pub external: Option<ApiExternal>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSelectOption {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub has_children: bool,
    /// Everything else, including the sub-object keyed by `kind`
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// The union of the fields block sub-objects carry. Each block type reads
/// the ones it needs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiBlockContent {
    /// `text` on older API versions
    #[serde(default, alias = "text")]
    pub rich_text: Vec<ApiRichText>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub icon: Option<ApiEmojiOrFile>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub caption: Vec<ApiRichText>,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiPropertySpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiNumberSpec {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSelectSpec {
    #[serde(default)]
    pub options: Vec<ApiSelectOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiFormulaSpec {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiDualProperty {
    #[serde(default)]
    pub synced_property_name: Option<String>,
    #[serde(default)]
    pub synced_property_id: Option<String>,
}

/// Older API versions put the synced property at the top level, newer ones
/// under `dual_property`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRelationSpec {
    pub database_id: String,
    #[serde(default)]
    pub synced_property_name: Option<String>,
    #[serde(default)]
    pub synced_property_id: Option<String>,
    #[serde(default)]
    pub dual_property: Option<ApiDualProperty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRollupSpec {
    #[serde(default)]
    pub relation_property_name: Option<String>,
    #[serde(default)]
    pub relation_property_id: Option<String>,
    #[serde(default)]
    pub rollup_property_name: Option<String>,
    #[serde(default)]
    pub rollup_property_id: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
}

/// A page property value. Rollup array items share the shape without an ID.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiPropertyValue {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiFormulaValue {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub number: Option<f64>,
    #[serde(default)]
    pub boolean: Option<bool>,
    #[serde(default)]
    pub date: Option<ApiDate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRollupValue {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub number: Option<f64>,
    #[serde(default)]
    pub date: Option<ApiDate>,
    #[serde(default)]
    pub array: Vec<ApiPropertyValue>,
}

// ---------------------------------------------------------------------------
// Pages, databases, listings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiPage {
    pub id: String,
    pub created_time: String,
    pub last_edited_time: String,
    #[serde(default)]
    pub archived: bool,
    pub parent: ApiReference,
    #[serde(default)]
    pub icon: Option<ApiEmojiOrFile>,
    #[serde(default)]
    pub cover: Option<ApiEmojiOrFile>,
    #[serde(default)]
    pub url: Option<String>,
    /// Keyed by property name, in server order
    #[serde(default)]
    pub properties: IndexMap<String, ApiPropertyValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiDatabase {
    pub id: String,
    pub created_time: String,
    pub last_edited_time: String,
    pub parent: ApiReference,
    #[serde(default)]
    pub title: Vec<ApiRichText>,
    #[serde(default)]
    pub icon: Option<ApiEmojiOrFile>,
    #[serde(default)]
    pub cover: Option<ApiEmojiOrFile>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, ApiPropertySpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResultPage<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Informational; `next_cursor` alone drives pagination.
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiOAuthToken {
    pub access_token: String,
    pub workspace_id: String,
    #[serde(default)]
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub workspace_icon: Option<String>,
    pub bot_id: String,
}
