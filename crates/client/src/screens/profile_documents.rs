//! Typed access to the `profiles` collection.
//!
//! `DocumentStore` is object-safe and speaks JSON; this wrapper pins the
//! collection name and converts to and from `ProfileRecord`.

use std::sync::Arc;

use userdesk_domain::{ProfileRecord, UserId};

use crate::ports::{DocumentStore, StoreError};

pub const PROFILES_COLLECTION: &str = "profiles";

#[derive(Clone)]
pub struct ProfileDocuments {
    store: Arc<dyn DocumentStore>,
}

impl ProfileDocuments {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError> {
        let maybe_value = self
            .store
            .get_document(PROFILES_COLLECTION, user_id)
            .await?;
        match maybe_value {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(StoreError::serialization),
        }
    }

    pub async fn put(&self, user_id: &UserId, record: &ProfileRecord) -> Result<(), StoreError> {
        let value = serde_json::to_value(record).map_err(StoreError::serialization)?;
        self.store
            .put_document(PROFILES_COLLECTION, user_id, &value)
            .await
    }
}
