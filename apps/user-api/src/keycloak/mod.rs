mod client;
mod config;
mod introspection;
mod models;

pub use client::KeycloakClient;
pub use config::KeycloakConfig;
pub use introspection::KeycloakTokenIntrospector;
pub use models::{IntrospectionResponse, TokenResponse};
