use crate::error::{SampleFetchError, StoreError};
use crate::persona::Mode;
use crate::store::{Collection, IdentityCard, SampleStore, SampleType, WritingSample};

/// Samples feeding one prompt: `style` sets the tone, `knowledge` grounds
/// facts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    pub style: Vec<WritingSample>,
    pub knowledge: Vec<WritingSample>,
}

/// Fetch the samples for `mode`.
///
/// Professional draws style and knowledge from the typed records in
/// `knowledge_chunks`. Casual takes knowledge from every record in both
/// collections and style from `RAW` alone. Each source is best-effort; the
/// call fails only when no source could be read.
pub async fn load_samples(
    store: &dyn SampleStore,
    mode: Mode,
) -> Result<SampleSet, SampleFetchError> {
    match mode {
        Mode::Professional => {
            let samples = store
                .list_by_type(Collection::KnowledgeChunks, SampleType::Professional)
                .await
                .map_err(|error| {
                    tracing::warn!(%error, "professional samples unavailable");
                    SampleFetchError::AllSourcesFailed { mode }
                })?;
            Ok(SampleSet {
                style: samples.clone(),
                knowledge: samples,
            })
        }
        Mode::Casual => {
            let (curated, raw) = tokio::join!(
                store.list(Collection::KnowledgeChunks),
                store.list(Collection::Raw)
            );

            if curated.is_err() && raw.is_err() {
                tracing::warn!("no casual sample source could be read");
                return Err(SampleFetchError::AllSourcesFailed { mode });
            }

            let curated = best_effort(Collection::KnowledgeChunks, curated);
            let raw = best_effort(Collection::Raw, raw);

            let mut knowledge = curated;
            knowledge.extend(raw.iter().cloned());
            Ok(SampleSet {
                style: raw,
                knowledge,
            })
        }
    }
}

fn best_effort(
    collection: Collection,
    result: Result<Vec<WritingSample>, StoreError>,
) -> Vec<WritingSample> {
    result.unwrap_or_else(|error| {
        tracing::warn!(collection = collection.as_str(), %error, "treating source as empty");
        Vec::new()
    })
}

/// Fetch the identity card. Never fails: an unreadable or missing record is
/// an empty card.
pub async fn load_identity(store: &dyn SampleStore) -> IdentityCard {
    match store.identity().await {
        Ok(card) => card.unwrap_or_default(),
        Err(error) => {
            tracing::debug!(%error, "identity unavailable; using empty card");
            IdentityCard::default()
        }
    }
}
