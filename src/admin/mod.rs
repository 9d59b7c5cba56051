//! Administrative writes against the sample store.
//!
//! Everything the conversation engine reads is authored through here, so
//! drafts are validated before they reach a backend.

use crate::error::StoreError;
use crate::store::{Collection, IdentityCard, SampleDraft, SampleStore, SampleType, WritingSample};
use std::sync::Arc;

/// Trim a draft and check it is fit to store in `collection`.
pub fn validate_draft(collection: Collection, draft: &SampleDraft) -> Result<SampleDraft, StoreError> {
    let content = draft.content.trim();
    let context = draft.context.trim();
    let category = draft
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    if content.is_empty() {
        return Err(StoreError::Invalid("content must not be empty".into()));
    }
    if context.is_empty() {
        return Err(StoreError::Invalid("context must not be empty".into()));
    }
    if collection == Collection::KnowledgeChunks && category.is_none() {
        return Err(StoreError::Invalid(
            "category is required for knowledge_chunks".into(),
        ));
    }

    Ok(SampleDraft {
        content: content.to_string(),
        context: context.to_string(),
        category: category.map(ToOwned::to_owned),
        sample_type: draft.sample_type,
    })
}

#[derive(Clone)]
pub struct Admin {
    store: Arc<dyn SampleStore>,
}

impl Admin {
    pub fn new(store: Arc<dyn SampleStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        collection: Collection,
        sample_type: Option<SampleType>,
    ) -> Result<Vec<WritingSample>, StoreError> {
        match sample_type {
            Some(sample_type) => self.store.list_by_type(collection, sample_type).await,
            None => self.store.list(collection).await,
        }
    }

    pub async fn create(
        &self,
        collection: Collection,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        let draft = validate_draft(collection, draft)?;
        self.store.create_sample(collection, &draft).await
    }

    pub async fn update(
        &self,
        collection: Collection,
        id: &str,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError> {
        let id = non_blank_id(collection, id)?;
        let draft = validate_draft(collection, draft)?;
        self.store.update_sample(collection, id, &draft).await
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let id = non_blank_id(collection, id)?;
        self.store.delete_sample(collection, id).await
    }

    /// The stored identity card, or an empty one.
    pub async fn identity(&self) -> Result<IdentityCard, StoreError> {
        Ok(self.store.identity().await?.unwrap_or_default())
    }

    pub async fn set_identity(&self, card: &IdentityCard) -> Result<IdentityCard, StoreError> {
        let card = card.normalized();
        self.store.put_identity(&card).await?;
        Ok(card)
    }
}

fn non_blank_id(collection: Collection, id: &str) -> Result<&str, StoreError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(StoreError::NotFound {
            collection: collection.to_string(),
            id: String::new(),
        });
    }
    Ok(id)
}
