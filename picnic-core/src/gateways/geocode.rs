use picnic_entities::geo::MapPoint;

pub trait GeoCodingGateway {
    /// Resolve a free-text address into candidate locations,
    /// best match first.
    fn resolve_address(&self, query: &str) -> Vec<MapPoint>;
}
