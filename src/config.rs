// src/config.rs
use crate::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INITIAL_DELAY, DEFAULT_RETRY_MAX_DELAY,
    DEFAULT_USER_AGENT, NOTION_API_BASE_URL, NOTION_API_VERSION,
};
use crate::error::NotionClientError;
use crate::types::{ApiKey, ValidatedUrl};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Everything a [`NotionClient`](crate::api::NotionClient) needs.
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    pub authentication: Authentication,
    pub http: HttpConfiguration,
}

/// The token sent as `Authorization: Bearer`. May be absent for a client
/// that is only used to exchange OAuth codes.
#[derive(Debug, Clone, Default)]
pub struct Authentication {
    pub access_token: Option<ApiKey>,
}

#[derive(Debug, Clone)]
pub struct HttpConfiguration {
    pub base_url: ValidatedUrl,
    pub notion_version: String,
    /// `None` leaves requests without a timeout
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

/// Backoff for rate-limited and 5xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_RETRY_INITIAL_DELAY,
            max_delay: DEFAULT_RETRY_MAX_DELAY,
        }
    }
}

impl Default for HttpConfiguration {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            notion_version: NOTION_API_VERSION.to_string(),
            timeout: None,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl HttpConfiguration {
    fn default_base_url() -> ValidatedUrl {
        ValidatedUrl::parse(NOTION_API_BASE_URL).expect("Default base URL should be valid")
    }
}

impl ClientConfiguration {
    pub fn new(access_token: ApiKey) -> Self {
        Self {
            authentication: Authentication {
                access_token: Some(access_token),
            },
            http: HttpConfiguration::default(),
        }
    }

    /// A configuration without a token, for OAuth code exchange only.
    pub fn unauthenticated() -> Self {
        Self {
            authentication: Authentication::default(),
            http: HttpConfiguration::default(),
        }
    }

    /// Reads `NOTION_API_KEY` and, when set, `NOTION_BASE_URL`.
    pub fn from_env() -> Result<Self, NotionClientError> {
        let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
            NotionClientError::client("NOTION_API_KEY environment variable not set")
        })?;

        let mut config = Self::new(ApiKey::new(api_key_str)?);
        if let Ok(base_url) = std::env::var("NOTION_BASE_URL") {
            config.http.base_url = ValidatedUrl::parse(&base_url)?;
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.http.retry = retry;
        self
    }
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Attempts per request for rate-limited and 5xx responses
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show one user
    User { id: String },
    /// List every user of the workspace
    Users,
    /// Show a page and its properties
    Page { id: String },
    /// Show a database and its columns
    Database { id: String },
    /// List every row of a database
    Query { id: String },
    /// List the blocks under a page or block
    Blocks {
        id: String,
        /// Fetch nested children too
        #[arg(short, long, default_value_t = false)]
        recursive: bool,
    },
    /// Search pages, or databases with --databases
    Search {
        query: Option<String>,
        #[arg(long, default_value_t = false)]
        databases: bool,
    },
    /// Print the OAuth consent URL for a public integration
    OauthUrl {
        #[arg(long)]
        client_id: String,
        #[arg(long)]
        redirect_uri: String,
        #[arg(long)]
        state: String,
    },
}

/// Resolved CLI configuration, validated and ready to build a client.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub command: Command,
    pub client: ClientConfiguration,
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves CLI input and environment. `oauth-url` needs no token.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, NotionClientError> {
        let client = match cli.command {
            Command::OauthUrl { .. } => ClientConfiguration::unauthenticated(),
            _ => ClientConfiguration::from_env()?,
        };
        let mut client = client.with_retry(RetryPolicy {
            max_attempts: cli.max_attempts,
            ..RetryPolicy::default()
        });
        if let Some(seconds) = cli.timeout {
            client = client.with_timeout(Duration::from_secs(seconds));
        }

        Ok(CliConfig {
            command: cli.command,
            client,
            verbose: cli.verbose,
        })
    }
}
