use crate::{
    core::{
        constants::{DEFAULT_GEOCODER_BASE_URL, REVERSE_GEOCODE_ZOOM, SEARCH_RESULT_LIMIT},
        geo::LatLng,
    },
    geocode::{Geocoder, Suggestion},
    Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer};

/// Shared async HTTP client with a crate User-Agent so that public
/// Nominatim instances don't reject the request. Building the client once
/// avoids the cost of TLS and connection pool setup for every lookup.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("waymark/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("failed to build reqwest async client")
});

/// Geocoding client for Nominatim-compatible services.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Client against the public OpenStreetMap Nominatim instance.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_GEOCODER_BASE_URL)
    }

    /// Client against a self-hosted or alternative instance.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn reverse(&self, position: LatLng) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.endpoint("reverse"))
            .query(&[
                ("format", "json"),
                ("lat", &position.lat.to_string()),
                ("lon", &position.lng.to_string()),
                ("zoom", &REVERSE_GEOCODE_ZOOM.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(parse_reverse_response(&body)?)
    }

    async fn search(&self, query: &str) -> Result<Vec<Suggestion>> {
        let response = self
            .client
            .get(self.endpoint("search"))
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", &SEARCH_RESULT_LIMIT.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(parse_search_response(&body)?)
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse_geocode(&self, position: LatLng) -> String {
        log::debug!("reverse geocoding {}", position);
        match self.reverse(position).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                log::warn!("reverse geocode for {} had no display name", position);
                position.coordinate_label()
            }
            Err(e) => {
                log::warn!("reverse geocode for {} failed: {}", position, e);
                position.coordinate_label()
            }
        }
    }

    async fn search_places(&self, query: &str) -> Vec<Suggestion> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        log::debug!("searching places for {:?}", query);
        match self.search(query).await {
            Ok(mut suggestions) => {
                suggestions.truncate(SEARCH_RESULT_LIMIT);
                suggestions
            }
            Err(e) => {
                log::warn!("place search for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(deserialize_with = "opaque_id")]
    place_id: String,
    display_name: String,
    lat: String,
    lon: String,
}

/// Nominatim serves `place_id` as a number; treat it as an opaque string
/// either way.
fn opaque_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn parse_reverse_response(body: &str) -> serde_json::Result<Option<String>> {
    let response: ReverseResponse = serde_json::from_str(body)?;
    Ok(response.display_name.filter(|name| !name.is_empty()))
}

pub(crate) fn parse_search_response(body: &str) -> serde_json::Result<Vec<Suggestion>> {
    let entries: Vec<SearchEntry> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let lat = entry.lat.parse::<f64>();
            let lon = entry.lon.parse::<f64>();
            match (lat, lon) {
                (Ok(lat), Ok(lon)) => Some(Suggestion {
                    id: entry.place_id,
                    display_name: entry.display_name,
                    position: LatLng::new(lat, lon),
                }),
                _ => {
                    log::warn!("skipping search result with unparseable coordinates");
                    None
                }
            }
        })
        .collect())
}
