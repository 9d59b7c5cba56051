use super::types::{Collection, IdentityCard, SampleDraft, SampleType, WritingSample};
use crate::error::StoreError;
use async_trait::async_trait;

/// Document store holding writing samples and the identity card.
///
/// The conversation engine only reads; the administrative surface writes.
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Backend identifier (e.g. "firestore", "memory").
    fn name(&self) -> &str;

    /// Every record in `collection`. A collection that does not exist is empty.
    async fn list(&self, collection: Collection) -> Result<Vec<WritingSample>, StoreError>;

    /// Records in `collection` whose `type` equals `sample_type`.
    async fn list_by_type(
        &self,
        collection: Collection,
        sample_type: SampleType,
    ) -> Result<Vec<WritingSample>, StoreError>;

    /// The singleton identity record, if one was ever written.
    async fn identity(&self) -> Result<Option<IdentityCard>, StoreError>;

    /// Stamps `created_at` and returns the stored record.
    async fn create_sample(
        &self,
        collection: Collection,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError>;

    /// Stamps `updated_at`; `created_at` is preserved.
    async fn update_sample(
        &self,
        collection: Collection,
        id: &str,
        draft: &SampleDraft,
    ) -> Result<WritingSample, StoreError>;

    async fn delete_sample(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    async fn put_identity(&self, card: &IdentityCard) -> Result<(), StoreError>;
}
