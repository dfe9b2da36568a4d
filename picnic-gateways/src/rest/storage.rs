use anyhow::Result;
use picnic_core::gateways::photo_storage::PhotoStorage;
use picnic_entities::url::Url;
use reqwest::Method;

use super::*;

impl PhotoStorage for RestStore {
    fn upload(&self, path: &str, content: &[u8], content_type: &str) -> Result<Url> {
        let req = self
            .request(Method::POST, &self.object_url(path))
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(content.to_vec());
        send(req)?;
        self.public_object_url(path)
    }

    fn remove(&self, path: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &self.object_url(path));
        send(req)?;
        Ok(())
    }
}
