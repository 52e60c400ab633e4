use serde::Deserialize;

/// Token response from Keycloak
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// RFC 7662 introspection response, with the Keycloak realm role claim
#[derive(Debug, Deserialize)]
pub struct IntrospectionResponse {
    pub active: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl IntrospectionResponse {
    pub fn username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.preferred_username.as_deref())
            .filter(|u| !u.is_empty())
    }

    pub fn into_roles(self) -> Vec<String> {
        self.realm_access.map(|a| a.roles).unwrap_or_default()
    }
}
