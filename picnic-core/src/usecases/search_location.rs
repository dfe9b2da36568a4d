use super::prelude::*;
use crate::gateways::geocode::GeoCodingGateway;

/// Resolve a free-text location to the best matching point.
pub fn resolve_search_location<G: GeoCodingGateway>(geocoder: &G, query: &str) -> Option<MapPoint> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    let pos = geocoder.resolve_address(query).into_iter().find(|p| p.is_valid());
    if pos.is_none() {
        log::info!("Could not resolve location '{query}'");
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::MockGeocoder;

    #[test]
    fn first_candidate_wins() {
        let geocoder = MockGeocoder(vec![
            MapPoint::from_lat_lng_deg(45.764, 4.8357),
            MapPoint::from_lat_lng_deg(48.8566, 2.3522),
        ]);
        assert_eq!(
            resolve_search_location(&geocoder, "Lyon"),
            Some(MapPoint::from_lat_lng_deg(45.764, 4.8357))
        );
        assert_eq!(resolve_search_location(&geocoder, "  "), None);
        assert_eq!(resolve_search_location(&MockGeocoder(vec![]), "Nowhere"), None);
    }
}
