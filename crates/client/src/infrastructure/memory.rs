//! In-memory backends for local runs and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use userdesk_domain::UserId;
use uuid::Uuid;

use crate::ports::{AuthError, DocumentStore, IdentityProvider, StoreError};

// A poisoned lock only means another thread panicked mid-update; the maps
// themselves stay consistent, so keep serving them.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Identity provider holding accounts in a map.
///
/// Emails are unique (case-insensitive); creating an account signs it in.
#[derive(Default)]
pub struct InMemoryIdentity {
    accounts: Mutex<HashMap<String, UserId>>,
    current: Mutex<Option<UserId>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `user_id` already signed in.
    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(Some(user_id)),
        }
    }

    pub fn account_count(&self) -> usize {
        lock(&self.accounts).len()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        lock(&self.current).clone()
    }

    async fn create_account(&self, email: &str, _password: &str) -> Result<UserId, AuthError> {
        let key = email.trim().to_lowercase();
        let user_id = {
            let mut accounts = lock(&self.accounts);
            if accounts.contains_key(&key) {
                return Err(AuthError::EmailAlreadyInUse);
            }
            let user_id = UserId::new(Uuid::new_v4().simple().to_string())
                .map_err(AuthError::rejected)?;
            accounts.insert(key, user_id.clone());
            user_id
        };

        *lock(&self.current) = Some(user_id.clone());
        tracing::debug!(user_id = %user_id, "In-memory account created");
        Ok(user_id)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        lock(&self.current).take();
        Ok(())
    }
}

/// Document store holding JSON documents in a map keyed by
/// `(collection, key)`.
#[derive(Default)]
pub struct InMemoryDocuments {
    documents: RwLock<HashMap<(String, UserId), Value>>,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocuments {
    async fn get_document(
        &self,
        collection: &str,
        key: &UserId,
    ) -> Result<Option<Value>, StoreError> {
        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        Ok(documents.get(&(collection.to_string(), key.clone())).cloned())
    }

    async fn put_document(
        &self,
        collection: &str,
        key: &UserId,
        value: &Value,
    ) -> Result<(), StoreError> {
        if !value.is_object() {
            return Err(StoreError::serialization("documents must be JSON objects"));
        }
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((collection.to_string(), key.clone()), value.clone());
        Ok(())
    }
}
