use async_trait::async_trait;

use crate::provider::errors::IdentityProviderError;
use crate::provider::models::{
    GroupRepresentation, NewProviderUser, ProviderUser, RoleRepresentation,
};

/// Administrative operations of the identity provider, scoped by realm.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Creates the user and returns the id embedded in the response location, if any.
    async fn create_user(
        &self,
        realm: &str,
        user: &NewProviderUser,
    ) -> Result<Option<String>, IdentityProviderError>;

    async fn get_user(&self, realm: &str, user_id: &str) -> Result<ProviderUser, IdentityProviderError>;

    /// Realm-level role mappings only; client roles are not included.
    async fn get_realm_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<Vec<RoleRepresentation>, IdentityProviderError>;

    async fn get_user_groups(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<Vec<GroupRepresentation>, IdentityProviderError>;

    async fn search_users_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> Result<Vec<ProviderUser>, IdentityProviderError>;

    async fn delete_user(&self, realm: &str, user_id: &str) -> Result<(), IdentityProviderError>;
}
