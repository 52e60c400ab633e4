use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use user_lib::provider::{
    GroupRepresentation, IdentityProviderError, IdentityProviderTrait, NewProviderUser,
    ProviderUser, RoleRepresentation,
};

use super::config::KeycloakConfig;
use super::models::TokenResponse;

/// Token with expiration tracking
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn new(token: String, expires_in: u64) -> Self {
        // Refresh 30 seconds before the token actually expires
        let buffer = 30;
        let expires_in = if expires_in > buffer {
            expires_in - buffer
        } else {
            expires_in
        };
        Self {
            access_token: token,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        }
    }

    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

pub(crate) fn transport(err: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::Transport(err.to_string())
}

/// Turn a non-success response into a status-carrying error.
pub(crate) async fn status_error(response: Response) -> IdentityProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    IdentityProviderError::Status { status, body }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, IdentityProviderError> {
    response
        .json::<T>()
        .await
        .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))
}

/// Keycloak Admin REST API adapter, authenticated as a service account.
pub struct KeycloakClient {
    config: Arc<KeycloakConfig>,
    http: Client,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl KeycloakClient {
    pub fn new(config: Arc<KeycloakConfig>) -> Result<Self, IdentityProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            config,
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Get a valid access token, refreshing if necessary
    async fn get_token(&self) -> Result<String, IdentityProviderError> {
        if !self.is_configured() {
            return Err(IdentityProviderError::NotConfigured);
        }

        {
            let token_guard = self.token.read().await;
            if let Some(ref cached) = *token_guard {
                if cached.is_valid() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let new_token = self.fetch_token().await?;
        let token_string = new_token.access_token.clone();

        {
            let mut token_guard = self.token.write().await;
            *token_guard = Some(CachedToken::new(new_token.access_token, new_token.expires_in));
        }

        Ok(token_string)
    }

    async fn fetch_token(&self) -> Result<TokenResponse, IdentityProviderError> {
        tracing::debug!(realm = %self.config.auth_realm, "requesting service account token");

        let response = self
            .http
            .post(self.config.token_url())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret()),
            ])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityProviderError::Token(format!(
                "status {}: {}",
                status, body
            )));
        }

        read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, IdentityProviderError> {
        let token = self.get_token().await?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK => read_json(response).await,
            _ => Err(status_error(response).await),
        }
    }
}

#[async_trait]
impl IdentityProviderTrait for KeycloakClient {
    async fn create_user(
        &self,
        realm: &str,
        user: &NewProviderUser,
    ) -> Result<Option<String>, IdentityProviderError> {
        let token = self.get_token().await?;

        let response = self
            .http
            .post(self.config.admin_users_url(realm))
            .bearer_auth(&token)
            .json(user)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => {
                // Keycloak returns the new user's id as the last Location segment
                let user_id = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|location| location.rsplit('/').next())
                    .filter(|id| !id.is_empty())
                    .map(str::to_string);

                if user_id.is_none() {
                    tracing::warn!(realm = %realm, status = %status, "user created without a location header");
                }
                Ok(user_id)
            }
            _ => Err(status_error(response).await),
        }
    }

    async fn get_user(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<ProviderUser, IdentityProviderError> {
        self.get_json(self.config.admin_user_url(realm, user_id)).await
    }

    async fn get_realm_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<Vec<RoleRepresentation>, IdentityProviderError> {
        self.get_json(self.config.realm_role_mappings_url(realm, user_id))
            .await
    }

    async fn get_user_groups(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<Vec<GroupRepresentation>, IdentityProviderError> {
        self.get_json(self.config.user_groups_url(realm, user_id)).await
    }

    async fn search_users_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> Result<Vec<ProviderUser>, IdentityProviderError> {
        let token = self.get_token().await?;

        let response = self
            .http
            .get(self.config.admin_users_url(realm))
            .bearer_auth(&token)
            .query(&[("username", username), ("exact", "true")])
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK => read_json(response).await,
            _ => Err(status_error(response).await),
        }
    }

    async fn delete_user(&self, realm: &str, user_id: &str) -> Result<(), IdentityProviderError> {
        let token = self.get_token().await?;

        let response = self
            .http
            .delete(self.config.admin_user_url(realm, user_id))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            _ => Err(status_error(response).await),
        }
    }
}
