//! Error types for port operations.

use std::time::Duration;

/// Failures reported by the identity provider.
///
/// The `Display` text is the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("the email address is already in use by another account")]
    EmailAlreadyInUse,

    #[error("the email address is badly formatted")]
    InvalidEmail,

    #[error("the password is too weak: {0}")]
    WeakPassword(String),

    #[error("too many attempts, try again later")]
    TooManyAttempts,

    #[error("no user is signed in")]
    NotSignedIn,

    /// The request never got a usable answer (DNS, TLS, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with an error we don't classify.
    #[error("authentication service rejected the request: {0}")]
    Rejected(String),

    #[error("authentication request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl AuthError {
    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }

    pub fn rejected(message: impl ToString) -> Self {
        Self::Rejected(message.to_string())
    }
}

/// Failures reported by the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No credentials are available for the request.
    #[error("not authenticated with the document store")]
    Unauthenticated,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("document store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("document store request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl StoreError {
    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn rejected(status: u16, message: impl ToString) -> Self {
        Self::Rejected {
            status,
            message: message.to_string(),
        }
    }
}
