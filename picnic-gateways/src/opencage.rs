use geocoding::{Forward, Opencage, Point};
use picnic_core::{entities::MapPoint, gateways::geocode::GeoCodingGateway};

/// Forward geocoding with the OpenCage API.
#[derive(Debug)]
pub struct OpenCage {
    api_key: Option<String>,
}

impl OpenCage {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No OpenCage API key configured");
        }
        Self { api_key }
    }
}

fn to_map_point(point: &Point<f64>) -> Option<MapPoint> {
    // x = longitude, y = latitude
    MapPoint::try_from_lat_lng_deg(point.y(), point.x())
}

impl GeoCodingGateway for OpenCage {
    fn resolve_address(&self, query: &str) -> Vec<MapPoint> {
        let Some(api_key) = &self.api_key else {
            return vec![];
        };
        let oc_req = Opencage::new(api_key.clone());
        match Forward::<f64>::forward(&oc_req, query) {
            Ok(points) => {
                log::debug!("Resolved location '{query}': {points:?}");
                points.iter().filter_map(to_map_point).collect()
            }
            Err(err) => {
                log::warn!("Failed to resolve location '{query}': {err}");
                vec![]
            }
        }
    }
}
