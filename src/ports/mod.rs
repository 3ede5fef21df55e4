//! Collaborator ports injected into the controller
//!
//! The map surface, the geolocation capability, and the host's marker-added
//! hook are all expressed as traits so the interaction engine can be driven
//! headless and unit-tested with fakes.

use crate::core::{geo::LatLng, marker::Marker};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait representing the rendering collaborator: a viewport that can
/// re-center and draw marker glyphs. The tile/render engine behind it is
/// outside this crate.
pub trait MapSurface: Send + Sync {
    /// Re-center the viewport on `center` at `zoom`.
    fn set_view(&self, center: LatLng, zoom: f64);

    /// Replace the rendered marker glyphs with the given list, in order.
    fn render_markers(&self, markers: &[Marker]);
}

/// No-op surface for headless runs and tests that don't inspect rendering.
#[derive(Debug, Default)]
pub struct NullSurface;

impl MapSurface for NullSurface {
    fn set_view(&self, center: LatLng, zoom: f64) {
        log::debug!("set_view {} @ {}", center, zoom);
    }

    fn render_markers(&self, markers: &[Marker]) {
        log::debug!("render {} marker glyphs", markers.len());
    }
}

/// Failure modes of a geolocation lookup, kept distinguishable so hosts can
/// phrase the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("geolocation permission denied")]
    Denied,
    #[error("geolocation timed out")]
    Timeout,
    #[error("position unavailable")]
    Unavailable,
}

/// Trait representing the host's geolocation capability.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Current position, or a distinguishable error.
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError>;
}

/// Provider for hosts without a geolocation capability; always fails with
/// [`GeolocationError::Unsupported`].
#[derive(Debug, Default)]
pub struct UnsupportedGeolocation;

#[async_trait]
impl GeolocationProvider for UnsupportedGeolocation {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Host hook fired exactly once per successful click-driven marker
/// creation.
pub type MarkerAddedHook = Arc<dyn Fn(Marker) + Send + Sync>;

/// Hook that ignores new markers.
pub fn noop_marker_hook() -> MarkerAddedHook {
    Arc::new(|_| {})
}
