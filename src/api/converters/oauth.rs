// src/api/converters/oauth.rs

use crate::api::converter::ApiConverter;
use crate::api::wire::ApiOAuthToken;
use crate::error::ConversionError;
use crate::model::OAuthGetAccessTokenResult;

pub struct OAuthTokenConverter;

impl ApiConverter for OAuthTokenConverter {
    type Api = ApiOAuthToken;
    type Model = OAuthGetAccessTokenResult;
    const NAME: &'static str = "OAuthTokenConverter";
    const DECODES: bool = true;

    fn api_to_model(&self, api: ApiOAuthToken) -> Result<OAuthGetAccessTokenResult, ConversionError> {
        Ok(OAuthGetAccessTokenResult {
            access_token: api.access_token,
            workspace_id: api.workspace_id,
            workspace_name: api.workspace_name,
            workspace_icon: api.workspace_icon,
            bot_id: api.bot_id,
        })
    }
}
