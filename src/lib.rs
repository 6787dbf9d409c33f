// src/lib.rs
//! notionkit: a typed client for the Notion REST API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `NotionClientError`, `ConversionError`, `ValidationError`
//! - **Configuration**: `ClientConfiguration`, `HttpConfiguration`, `RetryPolicy`
//! - **Domain model**: `Page`, `Database`, `Block`, `PropertyValue`, `RichTextList`, etc.
//! - **Domain types**: `PageId`, `BlockId`, `DatabaseId`, `UserId`, `ApiKey`, `Color`
//! - **API client**: `NotionClient`, the `Transport` seam and the converters

pub mod api;
pub mod config;
pub mod constants;
mod error;
mod error_recovery;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ConversionError, Direction, NotionClientError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Authentication, ClientConfiguration, HttpConfiguration, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, Children, Database, DatabaseQuery, DatabaseQueryPropertyFilter,
    DatabaseQuerySort, DateOrDateRange, DateOrDateTime, EmojiOrFile, FileRef, FormulaValue,
    MutableBlockList, NumberFormat, OAuthCodeAndState, OAuthCredentials,
    OAuthGetAccessTokenResult, Page, Pagination, PropertyData, PropertyFilter, PropertySort,
    PropertySpec, PropertySpecKind, PropertySpecList, PropertyValue, PropertyValueList, Reference,
    ResultPage, RichText, RichTextList, RollupFunction, RollupValue, SelectOption, SortDirection,
    User, UserKind,
};

// --- Block Types ---
pub use crate::model::blocks::{
    BookmarkBlock, BulletedListItemBlock, CalloutBlock, ChildDatabaseBlock, ChildPageBlock,
    CodeBlock, DividerBlock, EmbedBlock, EquationBlock, Heading1Block, Heading2Block,
    Heading3Block, NumberedListItemBlock, ParagraphBlock, QuoteBlock, TableOfContentsBlock,
    TextBlockContent, ToDoBlock, ToggleBlock, UnknownTypeBlock,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, Color, DatabaseId, PageId, UserId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{ApiConverter, ApiRequest, NotionClient, Transport, TransportError};
