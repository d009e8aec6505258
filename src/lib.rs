//! Durable, best-effort cache of known server endpoints.
//!
//! The list is written to a single file under an application-private root and
//! read back on the next session. Storage problems never surface as errors from
//! [`EndpointListStore::load`] or [`EndpointListStore::save`]; they are logged
//! and degrade to "no servers known".

pub mod endpoint;
pub mod storage;
pub mod store;

pub use endpoint::{Endpoint, EndpointError};
pub use storage::{DiskStorage, MemoryStorage, Storage, StorageFile};
pub use store::{
    EndpointListStore, MalformedRecordPolicy, StoreConfig, StoreError, SERVER_LIST_FILE,
};
