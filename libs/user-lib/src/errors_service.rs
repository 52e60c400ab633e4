use http::StatusCode;

use crate::provider::errors::IdentityProviderError;

/// Domain error crossing the service -> controller boundary. Every variant
/// carries the HTTP status the caller should see.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UserServiceError {
    /// The identity provider refused to create the user
    #[error("user creation failed ({status}): {message}")]
    Provider { status: StatusCode, message: String },

    /// Profile, role or group lookup failed; not-found is reported the same way
    #[error("user lookup failed: {message}")]
    Lookup { message: String },
}

impl UserServiceError {
    /// Status reported by the provider, or 500 when it reported none.
    pub fn from_provider(err: IdentityProviderError) -> Self {
        let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        UserServiceError::Provider {
            status,
            message: err.to_string(),
        }
    }

    pub fn lookup(err: IdentityProviderError) -> Self {
        UserServiceError::Lookup {
            message: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            UserServiceError::Provider { status, .. } => *status,
            UserServiceError::Lookup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status_is_carried() {
        let err = UserServiceError::from_provider(IdentityProviderError::Status {
            status: StatusCode::CONFLICT,
            body: "User exists with same username".to_string(),
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn provider_without_status_defaults_to_server_fault() {
        let err = UserServiceError::from_provider(IdentityProviderError::Transport(
            "connection refused".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn lookup_is_always_server_fault() {
        let err = UserServiceError::lookup(IdentityProviderError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"error":"User not found"}"#.to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("404"));
    }
}
