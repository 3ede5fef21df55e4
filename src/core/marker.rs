use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// A saved point of interest: clicked coordinates plus their resolved
/// address. Markers are immutable once created and only ever removed by an
/// explicit delete; list order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Marker {
    pub fn new(position: LatLng, address: String) -> Self {
        Self {
            latitude: position.lat,
            longitude: position.lng,
            address,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}
