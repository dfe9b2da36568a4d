use picnic_boundary as json;
use picnic_core::{entities::*, repositories::PhotoRepo};
use reqwest::Method;

use super::*;

const TABLE: &str = "photos";

impl PhotoRepo for RestStore {
    fn create_photo(&self, photo: Photo) -> Result<Photo> {
        let req = self
            .table(Method::POST, TABLE)
            .json(&json::NewPhoto::from(&photo));
        let created: json::Photo = self.fetch_one(req)?;
        Photo::try_from(created).map_err(conversion_error)
    }

    fn get_photo(&self, id: &str) -> Result<Photo> {
        let req = self
            .table(Method::GET, TABLE)
            .query(&[("select", "*"), ("id", eq(id).as_str())]);
        let photo: json::Photo = self.fetch_one(req)?;
        Photo::try_from(photo).map_err(conversion_error)
    }

    fn load_photos_of_place(&self, place_id: &str) -> Result<Vec<Photo>> {
        let req = self.table(Method::GET, TABLE).query(&[
            ("select", "*".to_owned()),
            ("place_id", eq(place_id)),
            ("order", "created_at.desc".to_owned()),
        ]);
        let photos: Vec<json::Photo> = self.fetch_all(req)?;
        Ok(photos
            .into_iter()
            .filter_map(|p| {
                let id = p.id.clone();
                Photo::try_from(p)
                    .map_err(|err| log::warn!("Skipping photo {id}: {err}"))
                    .ok()
            })
            .collect())
    }

    fn delete_photo(&self, id: &str) -> Result<()> {
        let req = self.table(Method::DELETE, TABLE).query(&[("id", eq(id))]);
        let _: json::Photo = self.fetch_one(req)?;
        Ok(())
    }
}
