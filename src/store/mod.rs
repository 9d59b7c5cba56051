pub mod factory;
pub mod firestore;
pub mod memory;
pub mod traits;
pub mod types;

pub use factory::create_store;
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use traits::SampleStore;
pub use types::{
    Collection, IDENTITY_COLLECTION, IDENTITY_DOCUMENT, IdentityCard, SampleDraft, SampleType,
    WritingSample, now_timestamp,
};
