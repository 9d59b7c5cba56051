use super::traits::SampleStore;
use super::types::{
    Collection, IdentityCard, SampleDraft, SampleType, WritingSample, now_timestamp,
};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process store with the same semantics as the hosted backend.
/// Records keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<WritingSample>>>,
    identity: RwLock<Option<IdentityCard>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with pre-built records (ids are kept as given).
    pub async fn insert_raw(&self, collection: Collection, samples: Vec<WritingSample>) {
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .extend(samples);
    }
}

fn validate(draft: &SampleDraft) -> Result<(), StoreError> {
    if draft.content.trim().is_empty() {
        return Err(StoreError::Invalid("content must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl SampleStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self, collection: Collection) -> Result<Vec<WritingSample>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_by_type(
        &self,
        collection: Collection,
        sample_type: SampleType,
    ) -> Result<Vec<WritingSample>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .map(|samples| {
                samples
                    .iter()
                    .filter(|s| s.sample_type == Some(sample_type))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn identity(&self) -> Result<Option<IdentityCard>, StoreError> {
        Ok(self.identity.read().await.clone())
    }

    async fn create_sample(
        &self,
        collection: Collection,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        validate(draft)?;
        let sample = WritingSample {
            id: uuid::Uuid::new_v4().simple().to_string(),
            content: draft.content.clone(),
            context: draft.context.clone(),
            sample_type: draft.sample_type,
            category: draft.category.clone(),
            created_at: Some(now_timestamp()),
            updated_at: None,
        };
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(sample.clone());
        Ok(sample)
    }

    async fn update_sample(
        &self,
        collection: Collection,
        id: &str,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        validate(draft)?;
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|samples| samples.iter_mut().find(|s| s.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        existing.content.clone_from(&draft.content);
        existing.context.clone_from(&draft.context);
        existing.category.clone_from(&draft.category);
        existing.sample_type = draft.sample_type;
        existing.updated_at = Some(now_timestamp());
        Ok(existing.clone())
    }

    async fn delete_sample(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let samples = collections.entry(collection).or_default();
        let before = samples.len();
        samples.retain(|s| s.id != id);
        if samples.len() == before {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn put_identity(&self, card: &IdentityCard) -> Result<(), StoreError> {
        *self.identity.write().await = Some(card.normalized());
        Ok(())
    }
}
