// src/model/mod.rs
//! The typed domain model.
//!
//! Plain value types: the converters in [`crate::api`] build them from wire
//! JSON and turn them back into request bodies. The `*List` builders
//! accumulate outbound content.

mod block;
mod block_list;
pub mod blocks;
mod common;
mod database;
mod date;
mod emoji_or_file;
mod oauth;
mod page;
mod pagination;
mod property_spec;
mod property_value;
pub mod query;
mod reference;
mod rich_text;
mod user;

pub use block::Block;
pub use block_list::MutableBlockList;
pub use blocks::*;
pub use common::{BlockCommon, Children};
pub use database::Database;
pub use date::{DateOrDateRange, DateOrDateTime};
pub use emoji_or_file::{EmojiOrFile, FileRef};
pub use oauth::{
    extract_code_and_state_from_redirect_uri, user_prompt_uri, OAuthCodeAndState,
    OAuthCredentials, OAuthGetAccessTokenResult,
};
pub use page::Page;
pub use pagination::{Pagination, ResultPage};
pub use property_spec::{
    NumberFormat, PropertySpec, PropertySpecKind, PropertySpecList, RollupFunction, SelectOption,
};
pub use property_value::{
    FormulaValue, PropertyData, PropertyValue, PropertyValueList, RollupValue,
};
pub use query::{
    DatabaseQuery, DatabaseQueryPropertyFilter, DatabaseQuerySort, PropertyFilter, PropertySort,
    SortDirection,
};
pub use reference::Reference;
pub use rich_text::{Annotations, Mention, RichText, RichTextKind, RichTextList};
pub use user::{User, UserKind};
