use picnic_boundary as json;
use picnic_core::{entities::*, repositories::ReviewRepo};
use reqwest::Method;

use super::*;

const TABLE: &str = "reviews";
const VIEW: &str = "reviews_with_users";

impl ReviewRepo for RestStore {
    fn create_review(&self, review: Review) -> Result<Review> {
        let req = self
            .table(Method::POST, TABLE)
            .json(&json::NewReview::from(&review));
        let created: json::Review = self.fetch_one(req)?;
        let mut created = Review::try_from(created).map_err(conversion_error)?;
        // the table itself does not know the nickname
        if created.author_nickname.is_none() {
            created.author_nickname = review.author_nickname;
        }
        Ok(created)
    }

    fn load_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>> {
        let req = self.table(Method::GET, VIEW).query(&[
            ("select", "*".to_owned()),
            ("place_id", eq(place_id)),
            ("order", "created_at.desc".to_owned()),
        ]);
        let reviews: Vec<json::Review> = self.fetch_all(req)?;
        Ok(reviews
            .into_iter()
            .filter_map(|r| {
                let id = r.id.clone();
                Review::try_from(r)
                    .map_err(|err| log::warn!("Skipping review {id}: {err}"))
                    .ok()
            })
            .collect())
    }
}
