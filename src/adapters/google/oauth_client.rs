//! Google OAuth2 client - Implementation of `AuthorizationServer`.
//!
//! Builds consent URLs and talks to the token endpoint with form-encoded
//! `authorization_code` and `refresh_token` grants.
//!
//! # Configuration
//!
//! ```ignore
//! let client = GoogleOAuthClient::new(&config.oauth)?;
//! let url = client.authorization_url(&CorrelationToken::new("list_events")?);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use secrecy::{ExposeSecret, Secret};

use crate::config::OAuthConfig;
use crate::domain::authorization::{CorrelationToken, Credential};
use crate::domain::foundation::Timestamp;
use crate::ports::{AuthorizationError, AuthorizationServer};

use super::wire::{TokenErrorResponse, TokenResponse};
use super::{body_snippet, parse_url, GoogleClientError};

/// OAuth2 authorization-code client for Google.
pub struct GoogleOAuthClient {
    client: Client,
    client_id: String,
    client_secret: Secret<String>,
    redirect_url: String,
    auth_url: Url,
    token_url: Url,
    scopes: Vec<String>,
}

impl GoogleOAuthClient {
    /// Creates a client from configuration.
    ///
    /// Fails if a configured URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &OAuthConfig) -> Result<Self, GoogleClientError> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
            auth_url: parse_url(&config.auth_url)?,
            token_url: parse_url(&config.token_url)?,
            scopes: config.scopes_list(),
        })
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> Result<Response, AuthorizationError> {
        self.client
            .post(self.token_url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthorizationError::Transport(format!("request timed out: {}", e))
                } else if e.is_connect() {
                    AuthorizationError::Transport(format!("connection failed: {}", e))
                } else {
                    AuthorizationError::Transport(e.to_string())
                }
            })
    }

    /// Parses the token endpoint response into a credential.
    async fn parse_token_response(&self, response: Response) -> Result<Credential, AuthorizationError> {
        let status = response.status();

        if status.is_success() {
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| AuthorizationError::Decode(e.to_string()))?;
            return Ok(token.into_credential(Timestamp::now()));
        }

        let body = response.text().await.unwrap_or_default();
        match (status.as_u16(), serde_json::from_str::<TokenErrorResponse>(&body)) {
            (400 | 401, Ok(error)) => Err(AuthorizationError::InvalidGrant(error.describe())),
            (code, _) => Err(AuthorizationError::Provider {
                status: code,
                message: body_snippet(&body),
            }),
        }
    }
}

#[async_trait]
impl AuthorizationServer for GoogleOAuthClient {
    fn authorization_url(&self, state: &CorrelationToken) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", state.as_str());
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, AuthorizationError> {
        let response = self
            .post_form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_url.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
            ])
            .await?;

        self.parse_token_response(response).await
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthorizationError> {
        let refresh_token = credential
            .refresh_token()
            .ok_or(AuthorizationError::NoRefreshToken)?;

        let response = self
            .post_form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
            ])
            .await?;

        let refreshed = self.parse_token_response(response).await?;
        Ok(refreshed.inheriting_refresh_token(credential))
    }
}
