use std::sync::Arc;
use user_lib::user_service::UserService;

use crate::middleware::authentication::Authenticator;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub authenticator: Arc<dyn Authenticator>,
    /// Realm role required by the user administration endpoints
    pub moderator_role: String,
    pub env: String,
}
