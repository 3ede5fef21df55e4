//! Geocoding: coordinates to address and free text to candidate places
//!
//! Both directions are deliberately infallible at the trait boundary: a
//! failed reverse lookup degrades to a coordinate-formatted label and a
//! failed search degrades to no suggestions, so callers never handle a
//! rejected lookup. Debouncing of the search path lives in the controller,
//! not here.

pub mod nominatim;

pub use nominatim::NominatimClient;

use crate::core::geo::LatLng;
use async_trait::async_trait;

/// One ranked candidate from a forward search. Ephemeral: replaced on every
/// resolved query, discarded on selection or focus loss.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Opaque identifier from the geocoding service.
    pub id: String,
    pub display_name: String,
    pub position: LatLng,
}

/// Trait representing anything that can resolve coordinates and place
/// queries. Implemented by [`NominatimClient`]; tests use fakes.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `position` to a human-readable place name. On any failure
    /// (network, status, parse, missing field) returns the coordinate label
    /// rounded to four decimal places. Never fails.
    async fn reverse_geocode(&self, position: LatLng) -> String;

    /// Resolve free text to at most five ranked candidates. An empty or
    ///all-whitespace query short-circuits to an empty list without touching
    /// the network; any failure also yields an empty list. Never fails.
    async fn search_places(&self, query: &str) -> Vec<Suggestion>;
}
