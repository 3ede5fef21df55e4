//! Marker interaction controller
//!
//! [`MarkerController`] is the orchestration state machine over the bounded
//! marker list and the transient UI signals. It owns the only mutable copy
//! of the list, mirrors every completed mutation to the [`MarkerStore`]
//! (write-through), keeps the map surface's glyphs in sync, and degrades
//! every external failure to a transient, auto-expiring error message.
//!
//! Concurrency model: single logical event stream. All mutations lock the
//! shared state for their whole read-modify-persist sequence, including the
//! reverse-geocode await on the click path, so two rapid clicks can never
//! both pass the capacity check against a stale count. Debounced search and
//! error expiry run as spawned timers that re-check a generation counter
//! before touching state, which is what discards stale in-flight results.

use crate::{
    core::{
        config::ControllerConfig,
        constants::{
            max_markers_error, ERR_GEOLOCATION_FAILED, ERR_GEOLOCATION_UNSUPPORTED,
            ERR_PERSISTENCE, NO_EXPANDED_MARKER,
        },
        geo::LatLng,
        marker::Marker,
    },
    geocode::{Geocoder, Suggestion},
    ports::{GeolocationError, GeolocationProvider, MapSurface, MarkerAddedHook},
    storage::MarkerStore,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Transient signals plus the marker list; everything the host needs to
/// paint a frame. Obtained via [`MarkerController::snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSnapshot {
    pub markers: Vec<Marker>,
    pub max_markers: usize,
    pub error: Option<String>,
    pub search_query: String,
    pub suggestions: Vec<Suggestion>,
    pub expanded_index: isize,
    pub search_focused: bool,
}

#[derive(Debug, Default)]
struct ControllerState {
    markers: Vec<Marker>,
    error: Option<String>,
    /// Bumped on every new error; expiry timers only clear their own
    /// generation.
    error_seq: u64,
    expanded_index: isize,
    search_query: String,
    suggestions: Vec<Suggestion>,
    search_focused: bool,
    /// Bumped on every search input; debounce timers and in-flight lookups
    /// apply their result only while still current.
    search_seq: u64,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            expanded_index: NO_EXPANDED_MARKER,
            ..Self::default()
        }
    }
}

pub struct MarkerController {
    state: Arc<Mutex<ControllerState>>,
    geocoder: Arc<dyn Geocoder>,
    surface: Arc<dyn MapSurface>,
    geolocation: Arc<dyn GeolocationProvider>,
    store: MarkerStore,
    on_marker_add: MarkerAddedHook,
    config: ControllerConfig,
}

impl MarkerController {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        surface: Arc<dyn MapSurface>,
        geolocation: Arc<dyn GeolocationProvider>,
        store: MarkerStore,
        on_marker_add: MarkerAddedHook,
    ) -> Self {
        Self::with_config(
            geocoder,
            surface,
            geolocation,
            store,
            on_marker_add,
            ControllerConfig::default(),
        )
    }

    pub fn with_config(
        geocoder: Arc<dyn Geocoder>,
        surface: Arc<dyn MapSurface>,
        geolocation: Arc<dyn GeolocationProvider>,
        store: MarkerStore,
        on_marker_add: MarkerAddedHook,
        config: ControllerConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState::new())),
            geocoder,
            surface,
            geolocation,
            store,
            on_marker_add,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Adopt the persisted marker list and render its glyphs. Call once at
    /// startup. An unreadable backend starts the session empty and raises
    /// the transient persistence error.
    pub async fn load(&self) {
        let mut state = self.state.lock().await;
        match self.store.load() {
            Ok(markers) => {
                log::debug!("loaded {} persisted markers", markers.len());
                state.markers = markers;
            }
            Err(e) => {
                log::error!("loading markers failed: {}", e);
                self.set_error_locked(&mut state, ERR_PERSISTENCE);
            }
        }
        self.surface.render_markers(&state.markers);
    }

    /// Map-click handler: reverse-geocode the position and append a marker.
    /// The only path that grows the list. A full list rejects the click with
    /// the capacity error before any network traffic.
    pub async fn on_map_click(&self, lat: f64, lng: f64) {
        let mut state = self.state.lock().await;
        if state.markers.len() >= self.config.max_markers {
            let message = max_markers_error(self.config.max_markers);
            self.set_error_locked(&mut state, message);
            return;
        }

        let position = LatLng::new(lat, lng);
        // Keep the state locked across the lookup so a burst of clicks
        // checks capacity against the real count, one at a time.
        let address = self.geocoder.reverse_geocode(position).await;
        let marker = Marker::new(position, address);

        state.markers.push(marker.clone());
        self.persist_locked(&mut state);
        self.surface.render_markers(&state.markers);
        drop(state);

        (self.on_marker_add)(marker);
    }

    /// Live search-text handler. The actual lookup runs after the debounce
    /// window; superseded inputs never reach the network and superseded
    /// responses are dropped.
    pub async fn on_search_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.state.lock().await;
        state.search_query = text.clone();
        state.search_seq += 1;
        let seq = state.search_seq;

        if text.trim().is_empty() {
            state.suggestions.clear();
            return;
        }
        drop(state);

        let shared = Arc::clone(&self.state);
        let geocoder = Arc::clone(&self.geocoder);
        let debounce = self.config.search_debounce;
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            {
                let state = shared.lock().await;
                if state.search_seq != seq {
                    return; // superseded while waiting, skip the network
                }
            }

            let suggestions = geocoder.search_places(&text).await;

            let mut state = shared.lock().await;
            if state.search_seq == seq {
                log::debug!("applying {} suggestions for {:?}", suggestions.len(), text);
                state.suggestions = suggestions;
            } else {
                log::debug!("discarding stale suggestions for {:?}", text);
            }
        });
    }

    /// Jump the viewport to a chosen suggestion. Only navigates; never
    /// creates a marker.
    pub async fn on_suggestion_select(&self, suggestion: &Suggestion) {
        let mut state = self.state.lock().await;
        self.surface
            .set_view(suggestion.position, self.config.map.suggestion_zoom);
        state.search_query = suggestion.display_name.clone();
        state.suggestions.clear();
        // Invalidate any still-pending lookup for the typed-out query.
        state.search_seq += 1;
    }

    /// Remove the marker at `index`, keeping the order of the rest.
    /// Out-of-range indices are ignored.
    pub async fn on_delete_marker(&self, index: usize) {
        let mut state = self.state.lock().await;
        if index >= state.markers.len() {
            return;
        }
        state.markers.remove(index);
        state.expanded_index = NO_EXPANDED_MARKER;
        if state.markers.len() < self.config.max_markers
            && state.error.as_deref() == Some(max_markers_error(self.config.max_markers).as_str())
        {
            state.error = None;
        }
        self.persist_locked(&mut state);
        self.surface.render_markers(&state.markers);
    }

    /// Flip address expansion for the marker at `index`; at most one marker
    /// is expanded at a time.
    pub async fn on_toggle_address_expand(&self, index: usize) {
        let mut state = self.state.lock().await;
        state.expanded_index = if state.expanded_index == index as isize {
            NO_EXPANDED_MARKER
        } else {
            index as isize
        };
    }

    /// Search-box focus handler; losing focus discards the suggestion list.
    pub async fn on_search_focus(&self, focused: bool) {
        let mut state = self.state.lock().await;
        state.search_focused = focused;
        if !focused {
            state.suggestions.clear();
            // A debounce armed just before the blur must not repopulate
            // the list it discarded.
            state.search_seq += 1;
        }
    }

    /// Re-center the viewport on the user's position. Failures (unsupported,
    /// denied, timeout, unavailable) surface as a transient error; the
    /// marker list is never touched.
    pub async fn on_locate_me(&self) {
        let position = tokio::time::timeout(
            self.config.geolocation_timeout,
            self.geolocation.current_position(),
        )
        .await;

        let mut state = self.state.lock().await;
        match position {
            Ok(Ok(position)) => {
                self.surface.set_view(position, self.config.map.locate_zoom);
            }
            Ok(Err(GeolocationError::Unsupported)) => {
                self.set_error_locked(&mut state, ERR_GEOLOCATION_UNSUPPORTED);
            }
            Ok(Err(e)) => {
                log::warn!("geolocation failed: {}", e);
                self.set_error_locked(&mut state, ERR_GEOLOCATION_FAILED);
            }
            Err(_) => {
                log::warn!("geolocation timed out");
                self.set_error_locked(&mut state, ERR_GEOLOCATION_FAILED);
            }
        }
    }

    pub async fn markers(&self) -> Vec<Marker> {
        self.state.lock().await.markers.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn search_query(&self) -> String {
        self.state.lock().await.search_query.clone()
    }

    pub async fn suggestions(&self) -> Vec<Suggestion> {
        self.state.lock().await.suggestions.clone()
    }

    pub async fn expanded_index(&self) -> isize {
        self.state.lock().await.expanded_index
    }

    pub async fn is_search_focused(&self) -> bool {
        self.state.lock().await.search_focused
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock().await;
        ControllerSnapshot {
            markers: state.markers.clone(),
            max_markers: self.config.max_markers,
            error: state.error.clone(),
            search_query: state.search_query.clone(),
            suggestions: state.suggestions.clone(),
            expanded_index: state.expanded_index,
            search_focused: state.search_focused,
        }
    }

    /// Mirror the in-memory list to storage. A write failure surfaces as a
    /// transient error; the in-memory mutation stands and the next
    /// successful save re-converges the two.
    fn persist_locked(&self, state: &mut ControllerState) {
        if let Err(e) = self.store.save(&state.markers) {
            log::error!("persisting markers failed: {}", e);
            self.set_error_locked(state, ERR_PERSISTENCE);
        }
    }

    /// Raise a transient error and arm its expiry timer. A newer error
    /// bumps the generation, so an older timer never clears it early.
    fn set_error_locked(&self, state: &mut ControllerState, message: impl Into<String>) {
        state.error = Some(message.into());
        state.error_seq += 1;
        let seq = state.error_seq;

        let shared = Arc::clone(&self.state);
        let ttl = self.config.error_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut state = shared.lock().await;
            if state.error_seq == seq {
                state.error = None;
            }
        });
    }
}
