use picnic_boundary as json;
use picnic_core::{entities::*, repositories::UserRepo};
use reqwest::Method;

use super::*;

const TABLE: &str = "users";

impl UserRepo for RestStore {
    fn upsert_user_by_device_id(&self, device_id: &str) -> Result<User> {
        let new_user = json::NewUser {
            device_id: device_id.to_owned(),
        };
        let req = self.upsert(TABLE, "device_id").json(&[new_user]);
        let user: json::User = self.fetch_one(req)?;
        Ok(user.into())
    }

    fn update_nickname(&self, user_id: &str, nickname: &str) -> Result<User> {
        let update = json::NicknameUpdate {
            nickname: nickname.to_owned(),
        };
        let req = self
            .table(Method::PATCH, TABLE)
            .query(&[("id", eq(user_id))])
            .json(&update);
        let user: json::User = self.fetch_one(req)?;
        Ok(user.into())
    }
}
