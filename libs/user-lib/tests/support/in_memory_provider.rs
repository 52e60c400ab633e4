use async_trait::async_trait;
use http::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use user_lib::provider::errors::IdentityProviderError;
use user_lib::provider::models::{
    GroupRepresentation, NewProviderUser, ProviderUser, RoleRepresentation,
};
use user_lib::provider::traits::IdentityProviderTrait;

#[derive(Debug, Clone)]
struct StoredUser {
    profile: ProviderUser,
    roles: Vec<RoleRepresentation>,
    groups: Vec<GroupRepresentation>,
}

/// Realm-scoped fake that enforces unique usernames and emails the way
/// Keycloak does (409 on collision, 404 on unknown ids).
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    realms: Mutex<HashMap<String, HashMap<String, StoredUser>>>,
    unreachable: AtomicBool,
}

fn status(status: StatusCode, body: &str) -> IdentityProviderError {
    IdentityProviderError::Status {
        status,
        body: body.to_string(),
    }
}

impl InMemoryProvider {
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), IdentityProviderError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(IdentityProviderError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    pub fn assign_roles(&self, realm: &str, user_id: &str, roles: Vec<RoleRepresentation>) {
        let mut realms = self.realms.lock().unwrap();
        if let Some(user) = realms.get_mut(realm).and_then(|users| users.get_mut(user_id)) {
            user.roles.extend(roles);
        }
    }

    pub fn join_groups(&self, realm: &str, user_id: &str, groups: Vec<GroupRepresentation>) {
        let mut realms = self.realms.lock().unwrap();
        if let Some(user) = realms.get_mut(realm).and_then(|users| users.get_mut(user_id)) {
            user.groups.extend(groups);
        }
    }

    fn find(&self, realm: &str, user_id: &str) -> Result<StoredUser, IdentityProviderError> {
        self.check_reachable()?;
        self.realms
            .lock()
            .unwrap()
            .get(realm)
            .and_then(|users| users.get(user_id))
            .cloned()
            .ok_or_else(|| status(StatusCode::NOT_FOUND, r#"{"error":"User not found"}"#))
    }
}

#[async_trait]
impl IdentityProviderTrait for InMemoryProvider {
    async fn create_user(
        &self,
        realm: &str,
        user: &NewProviderUser,
    ) -> Result<Option<String>, IdentityProviderError> {
        self.check_reachable()?;
        let mut realms = self.realms.lock().unwrap();
        let users = realms.entry(realm.to_string()).or_default();

        if users.values().any(|u| u.profile.username == user.username) {
            return Err(status(
                StatusCode::CONFLICT,
                r#"{"errorMessage":"User exists with same username"}"#,
            ));
        }
        if users
            .values()
            .any(|u| u.profile.email.as_deref() == Some(user.email.as_str()))
        {
            return Err(status(
                StatusCode::CONFLICT,
                r#"{"errorMessage":"User exists with same email"}"#,
            ));
        }

        let id = Uuid::new_v4().to_string();
        users.insert(
            id.clone(),
            StoredUser {
                profile: ProviderUser {
                    id: id.clone(),
                    username: user.username.clone(),
                    email: Some(user.email.clone()),
                    first_name: Some(user.first_name.clone()),
                    last_name: Some(user.last_name.clone()),
                    enabled: user.enabled,
                    email_verified: false,
                },
                roles: vec![],
                groups: vec![],
            },
        );
        Ok(Some(id))
    }

    async fn get_user(&self, realm: &str, user_id: &str) -> Result<ProviderUser, IdentityProviderError> {
        Ok(self.find(realm, user_id)?.profile)
    }

    async fn get_realm_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<Vec<RoleRepresentation>, IdentityProviderError> {
        Ok(self.find(realm, user_id)?.roles)
    }

    async fn get_user_groups(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<Vec<GroupRepresentation>, IdentityProviderError> {
        Ok(self.find(realm, user_id)?.groups)
    }

    async fn search_users_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> Result<Vec<ProviderUser>, IdentityProviderError> {
        self.check_reachable()?;
        Ok(self
            .realms
            .lock()
            .unwrap()
            .get(realm)
            .map(|users| {
                users
                    .values()
                    .filter(|u| u.profile.username == username)
                    .map(|u| u.profile.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_user(&self, realm: &str, user_id: &str) -> Result<(), IdentityProviderError> {
        self.check_reachable()?;
        let mut realms = self.realms.lock().unwrap();
        match realms.get_mut(realm).and_then(|users| users.remove(user_id)) {
            Some(_) => Ok(()),
            None => Err(status(StatusCode::NOT_FOUND, r#"{"error":"User not found"}"#)),
        }
    }
}
