use super::backend::{HuntLock, StorageBackend};
use super::record::RecordStore;
use crate::error::Result;
use crate::model::StorageInfo;

/// Owns the load → mutate → save lifecycle of a hunt's [`RecordStore`].
///
/// Nothing is cached: every `load` reads the full record file and every
/// `save` rewrites it, so the store returned by `load` is the only copy and
/// is threaded explicitly through an operation.
pub struct HuntRepository<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> HuntRepository<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn ensure_storage(&self, hunt_id: &str) -> Result<()> {
        self.backend.ensure_hunt(hunt_id)
    }

    /// Provisions the hunt and takes its exclusive hold for a
    /// load-mutate-save sequence.
    pub fn lock(&self, hunt_id: &str) -> Result<HuntLock> {
        self.ensure_storage(hunt_id)?;
        self.backend.lock_hunt(hunt_id)
    }

    /// The hunt's treasures; an empty store if it has never been saved.
    pub fn load(&self, hunt_id: &str) -> Result<RecordStore> {
        match self.backend.read_records(hunt_id)? {
            Some(bytes) => RecordStore::decode(hunt_id, &bytes),
            None => Ok(RecordStore::new(hunt_id)),
        }
    }

    pub fn save(&self, store: &RecordStore) -> Result<()> {
        self.backend.write_records(store.hunt_id(), &store.encode())
    }

    pub fn storage_info(&self, hunt_id: &str) -> Result<Option<StorageInfo>> {
        self.backend.records_info(hunt_id)
    }
}
