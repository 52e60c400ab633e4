use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use super::config::KeycloakConfig;
use super::models::IntrospectionResponse;
use crate::middleware::authentication::{AuthError, Authenticator, Principal};

/// Validates caller tokens against the realm's introspection endpoint.
pub struct KeycloakTokenIntrospector {
    config: Arc<KeycloakConfig>,
    http: Client,
}

impl KeycloakTokenIntrospector {
    pub fn new(config: Arc<KeycloakConfig>) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl Authenticator for KeycloakTokenIntrospector {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let response = self
            .http
            .post(self.config.introspection_url())
            .form(&[
                ("token", token),
                ("token_type_hint", "access_token"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Unavailable(format!(
                "introspection returned {}",
                response.status()
            )));
        }

        let introspection = response
            .json::<IntrospectionResponse>()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        if !introspection.active {
            return Err(AuthError::InvalidToken);
        }

        let username = introspection
            .username()
            .map(str::to_string)
            .ok_or(AuthError::MissingUsername)?;

        Ok(Principal::new(username, introspection.into_roles()))
    }
}
