//! # Waymark
//!
//! An async, framework-free marker-board engine for interactive maps.
//!
//! Waymark owns the interaction core of a "save your nearby places" map
//! page: a bounded list of location markers, reverse geocoding of clicked
//! coordinates, debounced forward search with suggestions, and write-through
//! persistence of the marker list. Rendering, geolocation, and the host page
//! are reached through injected collaborator ports, so the whole engine can
//! run (and be tested) headless.

pub mod controller;
pub mod core;
pub mod geocode;
pub mod ports;
pub mod prelude;
pub mod storage;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ControllerConfig, MapConfig},
    geo::LatLng,
    marker::Marker,
};

pub use controller::{ControllerSnapshot, MarkerController};

pub use geocode::{Geocoder, NominatimClient, Suggestion};

pub use ports::{GeolocationError, GeolocationProvider, MapSurface, NullSurface};

pub use storage::{FileStorage, KeyValueStorage, MarkerStore, MemoryStorage};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
