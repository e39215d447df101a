//! Signed-in session shared by the Firebase Auth and Firestore clients.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use userdesk_domain::UserId;

/// Credentials returned by Firebase Auth for the signed-in account.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub id_token: String,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .field("id_token", &"<redacted>")
            .finish()
    }
}

/// Cloneable handle to the current session (if any).
#[derive(Clone, Default)]
pub struct SessionSlot {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: AuthSession) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn clear(&self) -> Option<AuthSession> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.read(|session| session.user_id.clone())
    }

    pub fn id_token(&self) -> Option<String> {
        self.read(|session| session.id_token.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&AuthSession) -> T) -> Option<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }
}
