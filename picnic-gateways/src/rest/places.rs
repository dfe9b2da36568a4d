use picnic_boundary as json;
use picnic_core::{entities::*, repositories::PlaceRepo};
use reqwest::Method;

use super::*;

const TABLE: &str = "places";

impl PlaceRepo for RestStore {
    fn get_place(&self, id: &str) -> Result<Place> {
        let req = self
            .table(Method::GET, TABLE)
            .query(&[("select", "*"), ("id", eq(id).as_str())]);
        let place: json::Place = self.fetch_one(req)?;
        Ok(place.into())
    }

    fn all_places(&self) -> Result<Vec<Place>> {
        let req = self
            .table(Method::GET, TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let places: Vec<json::Place> = self.fetch_all(req)?;
        log::debug!("Loaded {} places", places.len());
        Ok(places.into_iter().map(Place::from).collect())
    }

    fn create_place(&self, place: Place) -> Result<Place> {
        let data = json::PlaceData::from(&place);
        let req = self.table(Method::POST, TABLE).json(&data);
        let created: json::Place = self.fetch_one(req)?;
        Ok(created.into())
    }

    fn update_place(&self, place: &Place) -> Result<Place> {
        let data = json::PlaceData {
            // the owner never changes
            user_id: None,
            ..json::PlaceData::from(place)
        };
        let req = self
            .table(Method::PATCH, TABLE)
            .query(&[("id", eq(place.id.as_str()))])
            .json(&data);
        let updated: json::Place = self.fetch_one(req)?;
        Ok(updated.into())
    }

    fn delete_place(&self, id: &str) -> Result<()> {
        let req = self.table(Method::DELETE, TABLE).query(&[("id", eq(id))]);
        let _: json::Place = self.fetch_one(req)?;
        Ok(())
    }
}
