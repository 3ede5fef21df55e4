//! Configuration for controller timing and map defaults
//!
//! Plain value structs with sensible defaults; hosts override individual
//! fields or pick the `for_testing` preset, which shrinks every timer so
//! test suites never wait on real wall-clock windows.

use crate::core::{constants, geo::LatLng};
use std::time::Duration;

/// Initial viewport the host should seed its map surface with.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    /// Zoom applied when jumping to a selected search suggestion.
    pub suggestion_zoom: f64,
    /// Zoom applied when jumping to the user's own position.
    pub locate_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_center: LatLng::new(
                constants::DEFAULT_CENTER_LAT,
                constants::DEFAULT_CENTER_LNG,
            ),
            initial_zoom: constants::DEFAULT_ZOOM,
            suggestion_zoom: constants::SUGGESTION_ZOOM,
            locate_zoom: constants::LOCATE_ZOOM,
        }
    }
}

/// Timing and capacity knobs for [`MarkerController`](crate::MarkerController).
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Hard cap on the marker list; additions beyond it are rejected.
    pub max_markers: usize,
    /// Quiet window before a search input reaches the geocoder.
    pub search_debounce: Duration,
    /// Lifetime of a transient error message.
    pub error_ttl: Duration,
    /// Upper bound on waiting for a geolocation fix.
    pub geolocation_timeout: Duration,
    pub map: MapConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_markers: constants::MAX_MARKERS,
            search_debounce: constants::SEARCH_DEBOUNCE,
            error_ttl: constants::ERROR_TTL,
            geolocation_timeout: constants::GEOLOCATION_TIMEOUT,
            map: MapConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Preset with compressed timers for test suites.
    pub fn for_testing() -> Self {
        Self {
            search_debounce: Duration::from_millis(30),
            error_ttl: Duration::from_millis(100),
            geolocation_timeout: Duration::from_millis(200),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport_matches_constants() {
        let config = MapConfig::default();
        assert_eq!(config.initial_center, LatLng::new(55.7558, 37.6176));
        assert_eq!(config.initial_zoom, 13.0);
    }

    #[test]
    fn test_testing_preset_shrinks_timers() {
        let config = ControllerConfig::for_testing();
        assert!(config.search_debounce < constants::SEARCH_DEBOUNCE);
        assert!(config.error_ttl < constants::ERROR_TTL);
        assert_eq!(config.max_markers, constants::MAX_MARKERS);
    }
}
