//! Identity provider port.

use async_trait::async_trait;
use userdesk_domain::UserId;

use super::AuthError;

/// Account creation and session control, provided by an external
/// authentication service.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in account, if any.
    fn current_user_id(&self) -> Option<UserId>;

    /// Create an account and sign it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}
