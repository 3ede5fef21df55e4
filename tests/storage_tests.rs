//! Persistence round trips over the durable file backend.

use std::sync::Arc;
use waymark::{FileStorage, KeyValueStorage, LatLng, Marker, MarkerStore};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("waymark-store-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_file_backed_round_trip() {
    let storage = Arc::new(FileStorage::new(temp_dir("roundtrip")).unwrap());
    let store = MarkerStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>);

    let markers = vec![
        Marker::new(LatLng::new(55.7558, 37.6176), "Red Square".to_string()),
        Marker::new(LatLng::new(55.0, 37.0), "55.0000, 37.0000".to_string()),
    ];
    store.save(&markers).unwrap();

    // A second store over the same directory sees the same list, the way a
    // reloaded page re-reads local storage.
    let reopened = MarkerStore::new(storage);
    assert_eq!(reopened.load().unwrap(), markers);
}

#[test]
fn test_file_backed_corruption_is_tolerated() {
    let storage = Arc::new(FileStorage::new(temp_dir("corrupt")).unwrap());
    storage.set("waymark.nearby_markers", "][ not json").unwrap();

    let store = MarkerStore::new(storage);
    assert!(store.load().unwrap().is_empty());
}
