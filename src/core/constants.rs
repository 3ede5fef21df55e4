//! Shared constants for marker management and geocoding defaults.

use std::time::Duration;

/// Maximum number of markers a user may place.
pub const MAX_MARKERS: usize = 5;

/// Maximum number of forward-search results requested and kept.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Quiet window before a search query actually hits the network.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a transient error message stays visible.
pub const ERROR_TTL: Duration = Duration::from_secs(3);

/// Upper bound on waiting for a geolocation fix.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Detail level requested from the reverse geocoder (street address).
pub const REVERSE_GEOCODE_ZOOM: u8 = 18;

/// Zoom applied when re-centering on a selected search suggestion.
pub const SUGGESTION_ZOOM: f64 = 15.0;

/// Zoom applied when re-centering on the user's own position.
pub const LOCATE_ZOOM: f64 = 16.0;

/// Default Nominatim instance.
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Storage key under which the marker list is persisted.
pub const MARKER_STORAGE_KEY: &str = "waymark.nearby_markers";

/// Decimal places used for the coordinate fallback address.
pub const FALLBACK_COORD_PRECISION: usize = 4;

/// Expansion index meaning "no marker expanded".
pub const NO_EXPANDED_MARKER: isize = -1;

pub const ERR_GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported in this environment";
pub const ERR_GEOLOCATION_FAILED: &str = "Unable to determine your location";
pub const ERR_PERSISTENCE: &str = "Could not access saved markers";

/// Capacity error shown when a click would exceed the marker cap; phrased
/// from the configured cap, not the default.
pub fn max_markers_error(max_markers: usize) -> String {
    format!("Maximum of {} markers reached", max_markers)
}

/// Default initial viewport center (Moscow).
pub const DEFAULT_CENTER_LAT: f64 = 55.7558;
pub const DEFAULT_CENTER_LNG: f64 = 37.6176;
pub const DEFAULT_ZOOM: f64 = 13.0;
