// src/model/oauth.rs
//! Data shapes of the OAuth authorization-code flow.
//!
//! Only URL construction and parsing live here; the browser redirect
//! itself is up to the caller.

use url::Url;

/// Credentials of a public integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Query parameters the authorization server appends to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCodeAndState {
    pub code: String,
    pub state: String,
}

/// Result of exchanging an authorization code for an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthGetAccessTokenResult {
    pub access_token: String,
    pub workspace_id: String,
    pub workspace_name: Option<String>,
    pub workspace_icon: Option<String>,
    pub bot_id: String,
}

/// The URI to send the user to so they can grant access.
///
/// `unique_state` comes back unchanged in the redirect and should be
/// checked by the caller.
pub fn user_prompt_uri(
    authorize_url: &str,
    credentials: &OAuthCredentials,
    unique_state: &str,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(authorize_url)?;
    url.query_pairs_mut()
        .append_pair("client_id", &credentials.client_id)
        .append_pair("redirect_uri", &credentials.redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("owner", "user")
        .append_pair("state", unique_state);
    Ok(url.into())
}

/// Pull `code` and `state` out of the URI the user was redirected to.
///
/// Returns `None` when either is missing or the URI does not parse, e.g.
/// when the user denied access.
pub fn extract_code_and_state_from_redirect_uri(redirect_uri: &str) -> Option<OAuthCodeAndState> {
    let url = Url::parse(redirect_uri).ok()?;
    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(OAuthCodeAndState {
        code: code?,
        state: state?,
    })
}
