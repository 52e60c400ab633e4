pub mod authentication;

pub use authentication::{AuthError, Authenticator, Principal};
