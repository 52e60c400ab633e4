use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::env_or;
use crate::constants::{
    KEYCLOAK_AUTH_REALM, KEYCLOAK_CLIENT_ID, KEYCLOAK_CLIENT_SECRET, KEYCLOAK_REALM,
    KEYCLOAK_TIMEOUT_SECS, KEYCLOAK_URL,
};

const DEFAULT_KEYCLOAK_URL: &str = "http://localhost:18080";
const DEFAULT_KEYCLOAK_REALM: &str = "ITM";
const DEFAULT_KEYCLOAK_CLIENT_ID: &str = "backend-resources";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub struct KeycloakConfig {
    pub base_url: String,
    /// Realm whose users are managed
    pub realm: String,
    /// Realm the service client authenticates against
    pub auth_realm: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub timeout: Duration,
}

impl KeycloakConfig {
    pub fn new(
        base_url: impl Into<String>,
        realm: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let realm = realm.into();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_realm: realm.clone(),
            realm,
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var(KEYCLOAK_URL).unwrap_or_else(|_| DEFAULT_KEYCLOAK_URL.to_string());
        let realm =
            std::env::var(KEYCLOAK_REALM).unwrap_or_else(|_| DEFAULT_KEYCLOAK_REALM.to_string());
        let client_id = std::env::var(KEYCLOAK_CLIENT_ID)
            .unwrap_or_else(|_| DEFAULT_KEYCLOAK_CLIENT_ID.to_string());
        let client_secret = std::env::var(KEYCLOAK_CLIENT_SECRET).unwrap_or_default();

        let mut config = Self::new(base_url, realm, client_id, client_secret);
        if let Ok(auth_realm) = std::env::var(KEYCLOAK_AUTH_REALM) {
            config.auth_realm = auth_realm;
        }
        config.timeout = Duration::from_secs(env_or(KEYCLOAK_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS));
        config
    }

    pub fn token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url, self.auth_realm
        )
    }

    pub fn introspection_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token/introspect",
            self.base_url, self.realm
        )
    }

    pub fn admin_users_url(&self, realm: &str) -> String {
        format!("{}/admin/realms/{}/users", self.base_url, realm)
    }

    pub fn admin_user_url(&self, realm: &str, user_id: &str) -> String {
        format!("{}/admin/realms/{}/users/{}", self.base_url, realm, user_id)
    }

    pub fn realm_role_mappings_url(&self, realm: &str, user_id: &str) -> String {
        format!("{}/role-mappings/realm", self.admin_user_url(realm, user_id))
    }

    pub fn user_groups_url(&self, realm: &str, user_id: &str) -> String {
        format!("{}/groups", self.admin_user_url(realm, user_id))
    }

    pub fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    pub fn is_configured(&self) -> bool {
        !self.client_secret.expose_secret().is_empty()
    }
}
