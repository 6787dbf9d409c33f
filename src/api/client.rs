// src/api/client.rs
//! The client facade.
//!
//! `NotionClient` groups the endpoints by resource the way the API
//! reference does: `client.pages().get_page(..)`,
//! `client.blocks().get_all_block_list_recursively(..)`. Each call builds an
//! [`ApiRequest`], hands it to the shared [`Transport`], classifies failures
//! and converts the response into the domain model.

use super::block_tree::fetch_block_tree;
use super::converter::ApiConverter;
use super::converters::{
    BlockConverter, BlockOutConverter, DatabaseConverter, DatabaseCreateConverter,
    DatabaseCreateParameters, DatabaseQueryConverter, DatabaseQuerySortConverter,
    DatabaseUpdateConverter, DatabaseUpdateParameters, OAuthTokenConverter, PageConverter,
    PageCreateConverter, PageCreateParameters, PageUpdateConverter, PageUpdateParameters,
    PropertySortConverter, ResultPageConverter, UserConverter,
};
use super::errors::classify;
use super::simple_pagination::fetch_all_pages_simple;
use super::transport::{ApiRequest, ReqwestTransport, Transport};
use super::wire::{decode, ApiBlock, ApiDatabase, ApiOAuthToken, ApiPage, ApiResultPage, ApiUser};
use crate::config::ClientConfiguration;
use crate::constants::{NOTION_API_PAGE_SIZE, NOTION_OAUTH_AUTHORIZE_URL};
use crate::error::{NotionClientError, Result};
use crate::model::{
    self, Block, Database, DatabaseQuery, DatabaseQuerySort, EmojiOrFile, MutableBlockList,
    OAuthCodeAndState, OAuthCredentials, OAuthGetAccessTokenResult, Page, Pagination,
    PropertySort, PropertySpecList, PropertyValueList, Reference, ResultPage, RichTextList, User,
};
use crate::types::{BlockId, DatabaseId, PageId, UserId};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State shared by the facade and the tasks of a recursive block fetch.
pub(crate) struct ClientCore {
    transport: Arc<dyn Transport>,
    closed: AtomicBool,
}

impl ClientCore {
    /// Issues a request and decodes the response body as `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        family: &'static str,
    ) -> Result<T> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(NotionClientError::Closed);
        }
        let body = self.transport.execute(request).await.map_err(classify)?;
        Ok(decode(body, family)?)
    }

    pub(crate) async fn get_block_list(
        &self,
        parent_id: &BlockId,
        pagination: Option<Pagination>,
    ) -> Result<ResultPage<Block>> {
        let request = paginated(
            ApiRequest::get(format!("blocks/{}/children", parent_id)),
            pagination,
        );
        let api: ApiResultPage<ApiBlock> = self.call(request, "block list").await?;
        Ok(ResultPageConverter(BlockConverter).api_to_model(api)?)
    }

    pub(crate) async fn get_all_block_list(&self, parent_id: &BlockId) -> Result<Vec<Block>> {
        fetch_all_pages_simple(|pagination| self.get_block_list(parent_id, pagination)).await
    }
}

/// Adds `page_size` and, when resuming, `start_cursor` to a GET request.
fn paginated(request: ApiRequest, pagination: Option<Pagination>) -> ApiRequest {
    let request = request.with_query("page_size", NOTION_API_PAGE_SIZE.to_string());
    match pagination {
        Some(pagination) => request.with_query("start_cursor", pagination.start_cursor),
        None => request,
    }
}

/// Adds `page_size` and, when resuming, `start_cursor` to a POST body.
fn paginated_body(mut body: Map<String, Value>, pagination: Option<Pagination>) -> Value {
    body.insert("page_size".to_string(), json!(NOTION_API_PAGE_SIZE));
    if let Some(pagination) = pagination {
        body.insert(
            "start_cursor".to_string(),
            Value::String(pagination.start_cursor),
        );
    }
    Value::Object(body)
}

/// A Notion API client.
///
/// Cheap to share behind an `Arc`; every call goes through the same
/// transport. After [`close`](Self::close) every call fails with
/// [`NotionClientError::Closed`].
pub struct NotionClient {
    core: Arc<ClientCore>,
}

impl NotionClient {
    /// Builds a client with the production reqwest transport.
    pub fn new(config: &ClientConfiguration) -> Result<Self> {
        let transport = ReqwestTransport::new(
            &config.http,
            config.authentication.access_token.as_ref(),
        )?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Builds a client over any transport, e.g. a scripted one in tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            core: Arc::new(ClientCore {
                transport,
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub fn users(&self) -> Users<'_> {
        Users { core: &self.core }
    }

    pub fn databases(&self) -> Databases<'_> {
        Databases { core: &self.core }
    }

    pub fn pages(&self) -> Pages<'_> {
        Pages { core: &self.core }
    }

    pub fn blocks(&self) -> Blocks<'_> {
        Blocks { core: &self.core }
    }

    pub fn search(&self) -> Search<'_> {
        Search { core: &self.core }
    }

    pub fn oauth(&self) -> OAuth<'_> {
        OAuth { core: &self.core }
    }

    /// Releases the client. Calls already in flight finish normally.
    pub fn close(&self) {
        if !self.core.closed.swap(true, Ordering::SeqCst) {
            log::debug!("Notion client closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.core.closed.load(Ordering::SeqCst)
    }
}

pub struct Users<'a> {
    core: &'a ClientCore,
}

impl Users<'_> {
    pub async fn get_user(&self, id: &UserId) -> Result<User> {
        let api: ApiUser = self
            .core
            .call(ApiRequest::get(format!("users/{}", id)), "user")
            .await?;
        Ok(UserConverter.api_to_model(api)?)
    }

    pub async fn get_user_list(&self, pagination: Option<Pagination>) -> Result<ResultPage<User>> {
        let request = paginated(ApiRequest::get("users"), pagination);
        let api: ApiResultPage<ApiUser> = self.core.call(request, "user list").await?;
        Ok(ResultPageConverter(UserConverter).api_to_model(api)?)
    }

    /// Every user of the workspace, across all pages.
    pub async fn get_all_user_list(&self) -> Result<Vec<User>> {
        fetch_all_pages_simple(|pagination| self.get_user_list(pagination)).await
    }
}

pub struct Databases<'a> {
    core: &'a ClientCore,
}

impl Databases<'_> {
    pub async fn get_database(&self, id: &DatabaseId) -> Result<Database> {
        let api: ApiDatabase = self
            .core
            .call(ApiRequest::get(format!("databases/{}", id)), "database")
            .await?;
        Ok(DatabaseConverter.api_to_model(api)?)
    }

    pub async fn get_database_list(
        &self,
        pagination: Option<Pagination>,
    ) -> Result<ResultPage<Database>> {
        let request = paginated(ApiRequest::get("databases"), pagination);
        let api: ApiResultPage<ApiDatabase> = self.core.call(request, "database list").await?;
        Ok(ResultPageConverter(DatabaseConverter).api_to_model(api)?)
    }

    /// One page of rows. The body carries `filter` and `sorts` only when
    /// they are non-empty.
    pub async fn query_database(
        &self,
        id: &DatabaseId,
        query: Option<&DatabaseQuery>,
        sort: Option<&DatabaseQuerySort>,
        pagination: Option<Pagination>,
    ) -> Result<ResultPage<Page>> {
        let mut body = Map::new();
        if let Some(filter) = query
            .map(|query| DatabaseQueryConverter.model_to_api(query))
            .transpose()?
            .flatten()
        {
            body.insert("filter".to_string(), filter);
        }
        if let Some(sort) = sort.filter(|sort| !sort.is_empty()) {
            body.insert(
                "sorts".to_string(),
                Value::Array(DatabaseQuerySortConverter.model_to_api(sort)?),
            );
        }

        let request = ApiRequest::post(
            format!("databases/{}/query", id),
            paginated_body(body, pagination),
        );
        let api: ApiResultPage<ApiPage> = self.core.call(request, "page list").await?;
        Ok(ResultPageConverter(PageConverter).api_to_model(api)?)
    }

    /// Every row matching `query`, across all pages.
    pub async fn query_database_all(
        &self,
        id: &DatabaseId,
        query: Option<&DatabaseQuery>,
        sort: Option<&DatabaseQuerySort>,
    ) -> Result<Vec<Page>> {
        fetch_all_pages_simple(|pagination| self.query_database(id, query, sort, pagination)).await
    }

    pub async fn create_database(
        &self,
        parent_page_id: &PageId,
        title: impl Into<RichTextList>,
        icon: Option<EmojiOrFile>,
        cover: Option<EmojiOrFile>,
        properties: PropertySpecList,
    ) -> Result<Database> {
        let params = DatabaseCreateParameters {
            parent_page_id: parent_page_id.clone(),
            title: title.into(),
            icon,
            cover,
            properties,
        };
        let body = DatabaseCreateConverter.model_to_api(&params)?;
        let api: ApiDatabase = self
            .core
            .call(ApiRequest::post("databases", body), "database")
            .await?;
        Ok(DatabaseConverter.api_to_model(api)?)
    }

    pub async fn update_database(
        &self,
        id: &DatabaseId,
        title: Option<RichTextList>,
        properties: Option<PropertySpecList>,
    ) -> Result<Database> {
        let body = DatabaseUpdateConverter.model_to_api(&DatabaseUpdateParameters {
            title,
            properties,
        })?;
        let api: ApiDatabase = self
            .core
            .call(ApiRequest::patch(format!("databases/{}", id), body), "database")
            .await?;
        Ok(DatabaseConverter.api_to_model(api)?)
    }
}

pub struct Pages<'a> {
    core: &'a ClientCore,
}

impl Pages<'_> {
    pub async fn get_page(&self, id: &PageId) -> Result<Page> {
        let api: ApiPage = self
            .core
            .call(ApiRequest::get(format!("pages/{}", id)), "page")
            .await?;
        Ok(PageConverter.api_to_model(api)?)
    }

    async fn create_page(&self, params: PageCreateParameters) -> Result<Page> {
        let body = PageCreateConverter.model_to_api(&params)?;
        let api: ApiPage = self
            .core
            .call(ApiRequest::post("pages", body), "page")
            .await?;
        Ok(PageConverter.api_to_model(api)?)
    }

    /// Adds a row to a database.
    pub async fn create_page_in_database(
        &self,
        database_id: &DatabaseId,
        properties: PropertyValueList,
        content: Option<MutableBlockList>,
        icon: Option<EmojiOrFile>,
        cover: Option<EmojiOrFile>,
    ) -> Result<Page> {
        self.create_page(PageCreateParameters {
            parent: Reference::Database(database_id.clone()),
            properties,
            content,
            icon,
            cover,
        })
        .await
    }

    /// Creates a sub-page. Its only property is the title.
    pub async fn create_page_in_page(
        &self,
        page_id: &PageId,
        title: impl Into<RichTextList>,
        content: Option<MutableBlockList>,
        icon: Option<EmojiOrFile>,
        cover: Option<EmojiOrFile>,
    ) -> Result<Page> {
        self.create_page(PageCreateParameters {
            parent: Reference::Page(page_id.clone()),
            properties: PropertyValueList::new().title("title", title),
            content,
            icon,
            cover,
        })
        .await
    }

    pub async fn update_page(&self, id: &PageId, properties: PropertyValueList) -> Result<Page> {
        self.patch_page(
            id,
            PageUpdateParameters {
                properties,
                archived: None,
            },
        )
        .await
    }

    pub async fn set_page_archived(&self, id: &PageId, archived: bool) -> Result<Page> {
        self.patch_page(
            id,
            PageUpdateParameters {
                properties: PropertyValueList::new(),
                archived: Some(archived),
            },
        )
        .await
    }

    async fn patch_page(&self, id: &PageId, params: PageUpdateParameters) -> Result<Page> {
        let body = PageUpdateConverter.model_to_api(&params)?;
        let api: ApiPage = self
            .core
            .call(ApiRequest::patch(format!("pages/{}", id), body), "page")
            .await?;
        Ok(PageConverter.api_to_model(api)?)
    }
}

pub struct Blocks<'a> {
    core: &'a Arc<ClientCore>,
}

impl Blocks<'_> {
    /// One page of direct children. Children of the returned blocks are
    /// not fetched.
    pub async fn get_block_list(
        &self,
        parent_id: &BlockId,
        pagination: Option<Pagination>,
    ) -> Result<ResultPage<Block>> {
        self.core.get_block_list(parent_id, pagination).await
    }

    /// Every direct child, across all pages.
    pub async fn get_all_block_list(&self, parent_id: &BlockId) -> Result<Vec<Block>> {
        self.core.get_all_block_list(parent_id).await
    }

    /// The whole subtree under `parent_id`, with every block that has
    /// children holding them as `Children::Fetched`.
    pub async fn get_all_block_list_recursively(&self, parent_id: &BlockId) -> Result<Vec<Block>> {
        log::info!("Fetching block tree under {}", parent_id);
        let blocks = fetch_block_tree(Arc::clone(self.core), parent_id.clone()).await?;
        log::info!(
            "Fetched {} blocks under {}",
            blocks.iter().map(Block::subtree_len).sum::<usize>(),
            parent_id
        );
        Ok(blocks)
    }

    pub async fn append_block_list(
        &self,
        parent_id: &BlockId,
        blocks: &MutableBlockList,
    ) -> Result<()> {
        let children = BlockOutConverter.model_to_api_list(blocks.blocks())?;
        let request = ApiRequest::patch(
            format!("blocks/{}/children", parent_id),
            json!({ "children": children }),
        );
        self.core
            .call::<Value>(request, "block list")
            .await
            .map(|_| ())
    }
}

pub struct Search<'a> {
    core: &'a ClientCore,
}

impl Search<'_> {
    fn body(
        object: &str,
        query: Option<&str>,
        sort: Option<&PropertySort>,
        pagination: Option<Pagination>,
    ) -> Result<Value> {
        let mut body = Map::new();
        if let Some(query) = query {
            body.insert("query".to_string(), Value::String(query.to_string()));
        }
        if let Some(sort) = sort {
            body.insert("sort".to_string(), PropertySortConverter.model_to_api(sort)?);
        }
        body.insert(
            "filter".to_string(),
            json!({ "property": "object", "value": object }),
        );
        Ok(paginated_body(body, pagination))
    }

    pub async fn search_pages(
        &self,
        query: Option<&str>,
        sort: Option<&PropertySort>,
        pagination: Option<Pagination>,
    ) -> Result<ResultPage<Page>> {
        let body = Self::body("page", query, sort, pagination)?;
        let api: ApiResultPage<ApiPage> = self
            .core
            .call(ApiRequest::post("search", body), "page list")
            .await?;
        Ok(ResultPageConverter(PageConverter).api_to_model(api)?)
    }

    pub async fn search_databases(
        &self,
        query: Option<&str>,
        sort: Option<&PropertySort>,
        pagination: Option<Pagination>,
    ) -> Result<ResultPage<Database>> {
        let body = Self::body("database", query, sort, pagination)?;
        let api: ApiResultPage<ApiDatabase> = self
            .core
            .call(ApiRequest::post("search", body), "database list")
            .await?;
        Ok(ResultPageConverter(DatabaseConverter).api_to_model(api)?)
    }
}

pub struct OAuth<'a> {
    core: &'a ClientCore,
}

impl OAuth<'_> {
    /// The consent URI to send the user to.
    pub fn user_prompt_uri(
        &self,
        credentials: &OAuthCredentials,
        unique_state: &str,
    ) -> Result<String> {
        model::user_prompt_uri(NOTION_OAUTH_AUTHORIZE_URL, credentials, unique_state).map_err(
            |e| NotionClientError::Client {
                message: "Could not build the OAuth consent URI".to_string(),
                source: Some(Box::new(e)),
            },
        )
    }

    pub fn extract_code_and_state_from_redirect_uri(
        &self,
        redirect_uri: &str,
    ) -> Option<OAuthCodeAndState> {
        model::extract_code_and_state_from_redirect_uri(redirect_uri)
    }

    /// Exchanges an authorization code for an access token, authenticating
    /// with the client credentials instead of a bearer token.
    pub async fn get_access_token(
        &self,
        credentials: &OAuthCredentials,
        code: &str,
    ) -> Result<OAuthGetAccessTokenResult> {
        let request = ApiRequest::post(
            "oauth/token",
            json!({
                "grant_type": "authorization_code",
                "code": code,
                "redirect_uri": credentials.redirect_uri,
            }),
        )
        .with_basic_auth(&credentials.client_id, &credentials.client_secret);
        let api: ApiOAuthToken = self.core.call(request, "oauth token").await?;
        Ok(OAuthTokenConverter.api_to_model(api)?)
    }
}
