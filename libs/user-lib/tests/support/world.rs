use cucumber::World;
use std::sync::Arc;

use user_lib::entities::{UserRequest, UserResponse};
use user_lib::errors_service::UserServiceError;
use user_lib::user_service::UserService;

use crate::support::in_memory_provider::InMemoryProvider;

#[derive(Default, World)]
pub struct TestWorld {
    // State
    pub realm: String,
    pub provider: Arc<InMemoryProvider>,
    pub service: Option<UserService>,
    pub registered_user_id: Option<String>,

    // Results
    pub create_result: Option<Result<(), UserServiceError>>,
    pub lookup_result: Option<Result<UserResponse, UserServiceError>>,
}

impl std::fmt::Debug for TestWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestWorld")
            .field("realm", &self.realm)
            .field("registered_user_id", &self.registered_user_id)
            .field("create_result", &self.create_result)
            .field("lookup_result", &self.lookup_result)
            .finish()
    }
}

impl TestWorld {
    pub fn service(&self) -> &UserService {
        self.service
            .as_ref()
            .expect("background step should have built the service")
    }

    pub fn request(username: &str, email: &str) -> UserRequest {
        UserRequest::new(username, email, "TestPassword1!", "Integration", "Tester")
    }
}
