//! Key-value persistence for the marker list
//!
//! The controller is storage-agnostic: it talks to [`MarkerStore`], which
//! serializes the whole list under one fixed key on every mutation
//! (write-through), and tolerates absent or corrupt stored data by falling
//! back to an empty list. Backends implement the small [`KeyValueStorage`]
//! trait; [`MemoryStorage`] is the in-process default,
//! [`FileStorage`] persists across runs.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::{
    core::{constants::MARKER_STORAGE_KEY, marker::Marker},
    Result,
};
use std::sync::Arc;

/// Trait representing anything that can hold string values under string keys.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Write-through persistence shim for the marker list.
#[derive(Clone)]
pub struct MarkerStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl MarkerStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, MARKER_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Load the persisted marker list. Absent key, unparseable JSON, or a
    /// non-array value all degrade to an empty list; individually malformed
    /// entries are skipped, never a panic. A backend read failure is the one
    /// case that propagates, so callers can surface it as a transient error.
    pub fn load(&self) -> Result<Vec<Marker>> {
        let raw = match self.storage.get(&self.key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("discarding corrupt marker list: {}", e);
                return Ok(Vec::new());
            }
        };

        Ok(entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Marker>(entry) {
                Ok(marker) => Some(marker),
                Err(e) => {
                    log::warn!("skipping malformed marker entry: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Persist the full list, overwriting any prior value.
    pub fn save(&self, markers: &[Marker]) -> Result<()> {
        let json = serde_json::to_string(markers)?;
        self.storage.set(&self.key, &json)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn store() -> MarkerStore {
        MarkerStore::new(Arc::new(MemoryStorage::new()))
    }

    fn marker(lat: f64, lng: f64, address: &str) -> Marker {
        Marker::new(LatLng::new(lat, lng), address.to_string())
    }

    /// Backend whose reads and writes always fail.
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> crate::Result<Option<String>> {
            Err(crate::Error::Storage("backend offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> crate::Result<()> {
            Err(crate::Error::Storage("backend offline".to_string()))
        }

        fn remove(&self, _key: &str) -> crate::Result<()> {
            Err(crate::Error::Storage("backend offline".to_string()))
        }
    }

    #[test]
    fn test_load_on_empty_storage_is_empty() {
        assert!(store().load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = store();
        let markers = vec![
            marker(55.7558, 37.6176, "Red Square"),
            marker(51.5074, -0.1278, "Trafalgar Square"),
        ];
        store.save(&markers).unwrap();
        assert_eq!(store.load().unwrap(), markers);
    }

    #[test]
    fn test_corrupt_value_loads_as_empty() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set(MARKER_STORAGE_KEY, "not json at all {{{").unwrap();
        let store = MarkerStore::new(backend);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_non_array_value_loads_as_empty() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set(MARKER_STORAGE_KEY, "{\"latitude\": 1.0}").unwrap();
        let store = MarkerStore::new(backend);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let backend = Arc::new(MemoryStorage::new());
        backend
            .set(
                MARKER_STORAGE_KEY,
                r#"[{"latitude": 55.0, "longitude": 37.0, "address": "ok"}, {"bogus": true}]"#,
            )
            .unwrap();
        let store = MarkerStore::new(backend);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].address, "ok");
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let store = store();
        store.save(&[marker(1.0, 2.0, "first")]).unwrap();
        store.save(&[marker(3.0, 4.0, "second")]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].address, "second");
    }

    #[test]
    fn test_unreadable_backend_propagates() {
        let store = MarkerStore::new(Arc::new(BrokenStorage));
        assert!(store.load().is_err());
    }
}
