pub const SERVICE: &str = "user-api";
pub const ENV: &str = "ENV";

pub const LOCAL_ENV: &str = "local";

pub const USER_API_PORT: &str = "USER_API_PORT";
pub const DEFAULT_USER_API_PORT: u16 = 3333;

// Keycloak configuration
pub const KEYCLOAK_URL: &str = "KEYCLOAK_URL";
pub const KEYCLOAK_REALM: &str = "KEYCLOAK_REALM";
pub const KEYCLOAK_AUTH_REALM: &str = "KEYCLOAK_AUTH_REALM";
pub const KEYCLOAK_CLIENT_ID: &str = "KEYCLOAK_CLIENT_ID";
pub const KEYCLOAK_CLIENT_SECRET: &str = "KEYCLOAK_CLIENT_SECRET";
pub const KEYCLOAK_TIMEOUT_SECS: &str = "KEYCLOAK_TIMEOUT_SECS";

// Authorization
pub const MODERATOR_ROLE: &str = "MODERATOR_ROLE";
pub const DEFAULT_MODERATOR_ROLE: &str = "MODERATOR";

// Middleware configuration
pub const RATE_LIMIT_PER_MINUTE: &str = "RATE_LIMIT_PER_MINUTE";
pub const RATE_LIMIT_BURST: &str = "RATE_LIMIT_BURST";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
pub const MAX_BODY_SIZE_BYTES: &str = "MAX_BODY_SIZE_BYTES";
pub const SHUTDOWN_TIMEOUT_SECS: &str = "SHUTDOWN_TIMEOUT_SECS";
