use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{UserRequest, UserResponse};
use crate::errors_service::UserServiceError;
use crate::mapper::to_user_response;
use crate::provider::models::{NewProviderUser, ProviderCredential};
use crate::provider::traits::IdentityProviderTrait;

fn new_provider_user(request: &UserRequest) -> NewProviderUser {
    NewProviderUser {
        username: request.username.clone(),
        email: request.email.clone(),
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        enabled: true,
        credentials: vec![ProviderCredential::password(request.password.clone())],
    }
}

/// User management on top of an identity provider, bound to one realm.
#[derive(Clone)]
pub struct UserService {
    provider: Arc<dyn IdentityProviderTrait>,
    realm: String,
}

impl UserService {
    pub fn new(provider: Arc<dyn IdentityProviderTrait>, realm: impl Into<String>) -> Self {
        Self {
            provider,
            realm: realm.into(),
        }
    }

    /// Create the user in the identity provider.
    /// Provider failures keep the status the provider reported (500 if none).
    pub async fn create_user(&self, request: &UserRequest) -> Result<(), UserServiceError> {
        let payload = new_provider_user(request);

        match self.provider.create_user(&self.realm, &payload).await {
            Ok(created_id) => {
                tracing::info!(
                    realm = %self.realm,
                    username = %request.username,
                    user_id = created_id.as_deref().unwrap_or("unknown"),
                    "user created"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    realm = %self.realm,
                    username = %request.username,
                    error = %e,
                    "identity provider rejected user creation"
                );
                Err(UserServiceError::from_provider(e))
            }
        }
    }

    /// Fetch the profile, then realm roles, then groups, and map them.
    /// Any failure, including an unknown id, is reported as a lookup error.
    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<UserResponse, UserServiceError> {
        let id = user_id.to_string();

        let user = self
            .provider
            .get_user(&self.realm, &id)
            .await
            .map_err(|e| self.lookup_failed(&id, "profile", e))?;

        let roles = self
            .provider
            .get_realm_role_mappings(&self.realm, &id)
            .await
            .map_err(|e| self.lookup_failed(&id, "role mappings", e))?;

        let groups = self
            .provider
            .get_user_groups(&self.realm, &id)
            .await
            .map_err(|e| self.lookup_failed(&id, "groups", e))?;

        Ok(to_user_response(&user, &roles, &groups))
    }

    fn lookup_failed(
        &self,
        user_id: &str,
        what: &str,
        err: crate::provider::IdentityProviderError,
    ) -> UserServiceError {
        tracing::error!(
            realm = %self.realm,
            user_id = %user_id,
            lookup = what,
            error = %err,
            "user lookup failed"
        );
        UserServiceError::lookup(err)
    }
}
