//! Document store port - object-safe JSON boundary.
//!
//! Adapters move plain JSON objects in and out of named collections. Typed
//! access for a particular collection is layered on top (see
//! `screens::ProfileDocuments`).

use async_trait::async_trait;
use serde_json::Value;
use userdesk_domain::UserId;

use super::StoreError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. `Ok(None)` means the document does not exist.
    async fn get_document(
        &self,
        collection: &str,
        key: &UserId,
    ) -> Result<Option<Value>, StoreError>;

    /// Create or fully replace a document.
    async fn put_document(
        &self,
        collection: &str,
        key: &UserId,
        value: &Value,
    ) -> Result<(), StoreError>;
}
