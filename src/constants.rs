// src/constants.rs
//! Constants that define how the client talks to the Notion API.
//!
//! Each constant is named for the concept it constrains. Reading them should
//! tell you which API this client speaks and how it pages, retries and
//! reports failures.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Root of every REST endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// The `Notion-Version` header sent with every request. The wire shapes in
/// `api::wire` follow this version.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Where users are sent to grant an OAuth integration access.
pub const NOTION_OAUTH_AUTHORIZE_URL: &str = "https://api.notion.com/v1/oauth/authorize";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking listings and block trees.
pub const NOTION_API_PAGE_SIZE: usize = 100;

pub const DEFAULT_USER_AGENT: &str = concat!("notionkit/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Retries
// ---------------------------------------------------------------------------

/// A single attempt: the transport does not retry unless configured to.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

pub const DEFAULT_RETRY_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Cap for the doubling backoff delay.
pub const DEFAULT_RETRY_MAX_DELAY: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error reporting
// ---------------------------------------------------------------------------

/// Error code reported when a failed response has no readable error body.
pub const UNEXPECTED_ERROR_CODE: &str = "unexpected";

/// Prefix of the message reported alongside `UNEXPECTED_ERROR_CODE`.
pub const UNEXPECTED_ERROR_MESSAGE_PREFIX: &str = "Unexpected error: ";

/// `details` of a request error whose envelope carried none.
pub const EMPTY_ERROR_DETAILS: &str = "{}";
