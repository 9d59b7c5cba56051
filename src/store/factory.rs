use super::{FirestoreStore, MemoryStore, SampleStore};
use crate::config::{StoreBackend, StoreConfig};
use crate::error::{ConfigError, MakerError};
use std::sync::Arc;

/// Build the configured store backend.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn SampleStore>, MakerError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory sample store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Firestore => {
            let project_id = config
                .project_id
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    ConfigError::Validation(
                        "store.project_id is required for the firestore backend".into(),
                    )
                })?;
            tracing::info!(project_id, database = %config.database, "using firestore sample store");
            Ok(Arc::new(FirestoreStore::new(
                &config.base_url,
                project_id,
                &config.database,
                config.api_key.as_deref(),
            )))
        }
    }
}
