use serde::{Deserialize, Serialize};

/// User profile as returned by the Keycloak Admin API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub email_verified: bool,
}

/// Realm or client role record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub composite: bool,
    #[serde(default)]
    pub client_role: bool,
}

impl RoleRepresentation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Group the user is a member of
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRepresentation {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

impl GroupRepresentation {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: Some(format!("/{name}")),
            name,
            id: None,
        }
    }
}

/// Request body for creating a user in the identity provider
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProviderUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub enabled: bool,
    pub credentials: Vec<ProviderCredential>,
}

impl std::fmt::Debug for NewProviderUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewProviderUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("enabled", &self.enabled)
            .field("credentials", &self.credentials.len())
            .finish()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredential {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub value: String,
    pub temporary: bool,
}

impl ProviderCredential {
    pub fn password(value: impl Into<String>) -> Self {
        Self {
            credential_type: "password".to_string(),
            value: value.into(),
            temporary: false,
        }
    }
}
