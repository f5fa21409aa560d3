use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use super::BlobStore;

/// In-process blob store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `bytes` under `key`.
    pub fn with_blob(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::default();
        store
            .blobs
            .lock()
            .expect("blob store lock poisoned")
            .insert(key.into(), bytes.into());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self.blobs.lock().expect("blob store lock poisoned");
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut blobs = self.blobs.lock().expect("blob store lock poisoned");
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
