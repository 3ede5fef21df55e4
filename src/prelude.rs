//! Prelude module for common waymark types and traits
//!
//! Re-exports the most commonly used types, traits, and functions for easy
//! importing with `use waymark::prelude::*;`

pub use crate::core::{
    config::{ControllerConfig, MapConfig},
    constants,
    geo::LatLng,
    marker::Marker,
};

pub use crate::controller::{ControllerSnapshot, MarkerController};

pub use crate::geocode::{Geocoder, NominatimClient, Suggestion};

pub use crate::ports::{
    noop_marker_hook, GeolocationError, GeolocationProvider, MapSurface, MarkerAddedHook,
    NullSurface, UnsupportedGeolocation,
};

pub use crate::storage::{FileStorage, KeyValueStorage, MarkerStore, MemoryStorage};

pub use crate::{Error, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
