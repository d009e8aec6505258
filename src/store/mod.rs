//! Best-effort load/save of the known server list.

use crate::endpoint::codec::{self, CodecError, EndpointRecord};
use crate::endpoint::{Endpoint, EndpointError};
use crate::storage::{DiskStorage, Storage, StorageFile};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

/// File name of the server list inside the storage root
pub const SERVER_LIST_FILE: &str = "serverlist.bin";

const LOG_TARGET: &str = "serverlist::store";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Malformed endpoint: {0}")]
    Endpoint(#[from] EndpointError),
}

/// What to do with a well-framed record that doesn't describe an endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRecordPolicy {
    /// Drop the record and keep the rest of the list
    #[default]
    Skip,
    /// Treat the whole file as unusable
    Discard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the server list file
    pub storage_path: PathBuf,
    pub malformed_records: MalformedRecordPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("storage/serverlist"),
            malformed_records: MalformedRecordPolicy::Skip,
        }
    }
}

/// Persists an ordered list of endpoints to a single file.
///
/// `load` and `save` never fail: storage problems are logged and read back as
/// an empty list. There is no locking between calls, callers that share a
/// store across threads must serialize access themselves.
pub struct EndpointListStore<S: Storage> {
    storage: S,
    policy: MalformedRecordPolicy,
}

impl EndpointListStore<DiskStorage> {
    pub fn open(config: StoreConfig) -> Self {
        Self::with_policy(DiskStorage::new(config.storage_path), config.malformed_records)
    }

    /// Full path of the backing file
    pub fn path(&self) -> PathBuf {
        self.storage.path(SERVER_LIST_FILE)
    }
}

impl<S: Storage> EndpointListStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_policy(storage, MalformedRecordPolicy::default())
    }

    pub fn with_policy(storage: S, policy: MalformedRecordPolicy) -> Self {
        Self { storage, policy }
    }

    pub fn file_name(&self) -> &'static str {
        SERVER_LIST_FILE
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored list, or an empty one if it is missing or unreadable
    pub fn load(&self) -> Vec<Endpoint> {
        match self.try_load() {
            Ok(endpoints) => endpoints,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    target: LOG_TARGET,
                    "No {} yet ({}), starting with an empty server list",
                    SERVER_LIST_FILE, e
                );
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Failed to load {}: {}", SERVER_LIST_FILE, e
                );
                Vec::new()
            }
        }
    }

    /// Replaces the stored list. Failures are logged and otherwise ignored.
    pub fn save(&self, endpoints: &[Endpoint]) {
        if let Err(e) = self.try_save(endpoints) {
            log::warn!(
                target: LOG_TARGET,
                "Failed to save {}: {}", SERVER_LIST_FILE, e
            );
        }
    }

    /// Forgets every stored endpoint
    pub fn clear(&self) {
        self.save(&[]);
    }

    pub fn try_load(&self) -> Result<Vec<Endpoint>, StoreError> {
        let bytes = {
            let mut file = self.storage.open_read(SERVER_LIST_FILE)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            bytes
        };

        let records = codec::decode(&bytes)?;
        let total = records.len();
        let mut endpoints = Vec::with_capacity(total);

        for record in records {
            match Endpoint::try_from(record) {
                Ok(endpoint) => endpoints.push(endpoint),
                Err(e) => match self.policy {
                    MalformedRecordPolicy::Skip => {
                        log::debug!(
                            target: LOG_TARGET,
                            "Skipping record in {}: {}", SERVER_LIST_FILE, e
                        );
                    }
                    MalformedRecordPolicy::Discard => return Err(e.into()),
                },
            }
        }

        log::trace!(
            target: LOG_TARGET,
            "Loaded {} of {} endpoints from {}",
            endpoints.len(), total, SERVER_LIST_FILE
        );
        Ok(endpoints)
    }

    pub fn try_save(&self, endpoints: &[Endpoint]) -> Result<(), StoreError> {
        let records: Vec<EndpointRecord> =
            endpoints.iter().map(EndpointRecord::from).collect();
        let buffer = codec::encode(&records)?;

        let mut file = self.storage.open_write(SERVER_LIST_FILE)?;
        file.write_all(&buffer)?;
        file.set_len(buffer.len() as u64)?;
        file.flush()?;

        log::trace!(
            target: LOG_TARGET,
            "Saved {} endpoints ({} bytes) to {}",
            endpoints.len(), buffer.len(), SERVER_LIST_FILE
        );
        Ok(())
    }
}
