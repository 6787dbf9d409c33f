// src/api/converters/mod.rs
//! One converter family per model area.
//!
//! Decoding converters take the serde wire structs from [`super::wire`];
//! request bodies are produced as `serde_json::Value` by the `*Out*`,
//! `*Create*` and `*Update*` converters.

mod block;
mod color;
mod database;
mod date;
mod emoji_or_file;
mod oauth;
mod page;
mod pagination;
mod property_spec;
mod property_value;
mod query;
mod reference;
mod rich_text;
mod user;

pub use block::{BlockConverter, BlockOutConverter};
pub use color::ColorConverter;
pub use database::{
    DatabaseConverter, DatabaseCreateConverter, DatabaseCreateParameters, DatabaseUpdateConverter,
    DatabaseUpdateParameters,
};
pub use date::{DateRangeConverter, DateStringConverter, TimestampConverter};
pub use emoji_or_file::EmojiOrFileConverter;
pub use oauth::OAuthTokenConverter;
pub use page::{
    PageConverter, PageCreateConverter, PageCreateParameters, PageUpdateConverter,
    PageUpdateParameters,
};
pub use pagination::ResultPageConverter;
pub use property_spec::{
    PropertySpecConverter, PropertySpecOutConverter, SelectOptionConverter,
    SelectOptionSpecOutConverter,
};
pub use property_value::{
    FormulaValueConverter, PropertyDataConverter, PropertyValueOutConverter, RollupValueConverter,
};
pub use query::{
    DatabaseQueryConverter, DatabaseQuerySortConverter, PropertyFilterConverter,
    PropertySortConverter,
};
pub use reference::ReferenceConverter;
pub use rich_text::{
    AnnotationsConverter, MentionConverter, RichTextConverter, RichTextListConverter,
};
pub use user::UserConverter;
