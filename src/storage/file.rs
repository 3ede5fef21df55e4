use crate::{storage::KeyValueStorage, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Durable key-value backend: one JSON file per key under a base directory.
/// Stands in for a browser's local storage when the engine runs natively.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted namespaces; keep them filesystem-safe.
        let file_name: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        // Write to a sibling temp file first so readers never observe a
        // half-written list.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(tag: &str) -> FileStorage {
        let dir = std::env::temp_dir().join(format!(
            "waymark-file-storage-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        FileStorage::new(dir).unwrap()
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let storage = temp_storage("missing");
        assert_eq!(storage.get("absent").unwrap(), None);
    }

    #[test]
    fn test_set_get_round_trip() {
        let storage = temp_storage("roundtrip");
        storage.set("waymark.nearby_markers", "[]").unwrap();
        assert_eq!(
            storage.get("waymark.nearby_markers").unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = temp_storage("remove");
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_keys_with_separators_stay_in_base_dir() {
        let storage = temp_storage("sep");
        storage.set("../escape/attempt", "v").unwrap();
        assert_eq!(
            storage.get("../escape/attempt").unwrap(),
            Some("v".to_string())
        );
    }
}
