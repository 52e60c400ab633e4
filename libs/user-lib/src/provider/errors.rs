use http::StatusCode;

/// Failure reported by an identity-provider adapter.
#[derive(Debug, thiserror::Error)]
pub enum IdentityProviderError {
    /// The provider answered with a non-success HTTP status
    #[error("identity provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The request never produced a response (connect, timeout, ...)
    #[error("identity provider request failed: {0}")]
    Transport(String),

    /// The provider answered, but the payload could not be understood
    #[error("invalid response from identity provider: {0}")]
    InvalidResponse(String),

    /// Failed to obtain a service-account access token
    #[error("token error: {0}")]
    Token(String),

    #[error("identity provider is not configured")]
    NotConfigured,
}

impl IdentityProviderError {
    /// HTTP status reported by the provider, if it reported one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            IdentityProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_reported_for_http_failures() {
        let conflict = IdentityProviderError::Status {
            status: StatusCode::CONFLICT,
            body: "User exists with same email".to_string(),
        };
        assert_eq!(conflict.status(), Some(StatusCode::CONFLICT));
        assert!(!conflict.is_not_found());

        assert_eq!(IdentityProviderError::Transport("connection refused".into()).status(), None);
        assert_eq!(IdentityProviderError::NotConfigured.status(), None);
    }

    #[test]
    fn not_found_is_detected() {
        let err = IdentityProviderError::Status {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }
}
