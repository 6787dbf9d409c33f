// src/api/mod.rs
//! Notion API interaction: the converter layer between wire JSON and the
//! domain model, and the client facade that drives it.
//!
//! Requests go through the [`Transport`] seam, so everything above the
//! HTTP layer can be exercised with a scripted transport.

mod block_tree;
pub mod client;
pub mod converter;
pub mod converters;
mod errors;
mod simple_pagination;
pub mod transport;
pub mod wire;

pub use client::{Blocks, Databases, NotionClient, OAuth, Pages, Search, Users};
pub use converter::ApiConverter;
pub use simple_pagination::fetch_all_pages_simple;
pub use transport::{
    ApiRequest, HttpMethod, RequestAuth, ReqwestTransport, Transport, TransportError,
};
