//! Client of a hosted table store with a PostgREST interface
//! and an object storage for photos.

use std::time::Duration;

use anyhow::anyhow;
use picnic_boundary::ApiError;
use picnic_core::repositories::Error as RepoError;
use picnic_entities::url::Url;
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header, Method, StatusCode,
};
use serde::de::DeserializeOwned;

mod photos;
mod places;
mod questions;
mod reviews;
mod storage;
mod users;

type Result<T> = std::result::Result<T, RepoError>;

const REST_PATH: &str = "rest/v1";
const STORAGE_PATH: &str = "storage/v1/object";

const NOT_FOUND_CODE: &str = "PGRST116";

const RETURN_REPRESENTATION: &str = "return=representation";
const UPSERT_REPRESENTATION: &str = "resolution=merge-duplicates,return=representation";

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: Url,
    anon_key: String,
    photo_bucket: String,
}

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    pub base_url        : Url,
    pub anon_key        : String,
    pub photo_bucket    : String,
    pub request_timeout : Duration,
}

impl RestStore {
    pub fn try_new(config: RestStoreConfig) -> anyhow::Result<Self> {
        let RestStoreConfig {
            base_url,
            anon_key,
            photo_bucket,
            request_timeout,
        } = config;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid backend URL: {base_url}"));
        }
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url,
            anon_key,
            photo_bucket,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn table_url(&self, table: &str) -> String {
        self.endpoint(&format!("{REST_PATH}/{table}"))
    }

    fn object_url(&self, path: &str) -> String {
        self.endpoint(&format!("{STORAGE_PATH}/{}/{path}", self.photo_bucket))
    }

    fn public_object_url(&self, path: &str) -> anyhow::Result<Url> {
        let url = self.endpoint(&format!("{STORAGE_PATH}/public/{}/{path}", self.photo_bucket));
        Ok(url.parse()?)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        let req = self.request(method.clone(), &self.table_url(table));
        if method == Method::GET {
            req
        } else {
            req.header("Prefer", RETURN_REPRESENTATION)
        }
    }

    fn upsert(&self, table: &str, on_conflict: &str) -> RequestBuilder {
        self.request(Method::POST, &self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", UPSERT_REPRESENTATION)
    }

    fn fetch_all<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Vec<T>> {
        let response = send(req)?;
        response
            .json()
            .map_err(|err| RepoError::Other(anyhow!("Unexpected response: {err}")))
    }

    fn fetch_one<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        self.fetch_all(req)?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)
    }
}

fn send(req: RequestBuilder) -> Result<Response> {
    let response = req
        .header(header::ACCEPT, "application/json")
        .send()
        .map_err(|err| RepoError::Other(err.into()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    log::debug!("Request failed with status {status}: {body}");
    let api_error = serde_json::from_str::<ApiError>(&body).ok();
    Err(classify_error(status, api_error))
}

fn classify_error(status: StatusCode, api_error: Option<ApiError>) -> RepoError {
    let code = api_error.as_ref().and_then(|e| e.code.as_deref());
    if code == Some(NOT_FOUND_CODE) || status == StatusCode::NOT_FOUND {
        return RepoError::NotFound;
    }
    if status == StatusCode::CONFLICT || code == Some("23505") {
        return RepoError::AlreadyExists;
    }
    let message = api_error
        .and_then(|e| e.message)
        .unwrap_or_else(|| status.to_string());
    RepoError::Other(anyhow!("Backend request failed: {message}"))
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

fn conversion_error<E: std::fmt::Display>(err: E) -> RepoError {
    RepoError::Other(anyhow!("Invalid record: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base_url: &str) -> RestStore {
        RestStore::try_new(RestStoreConfig {
            base_url: base_url.parse().unwrap(),
            anon_key: "anon".into(),
            photo_bucket: "photos".into(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn build_urls() {
        for base_url in ["https://abc.supabase.co", "https://abc.supabase.co/"] {
            let store = store(base_url);
            assert_eq!(
                store.table_url("places"),
                "https://abc.supabase.co/rest/v1/places"
            );
            assert_eq!(
                store.object_url("1/1700000000000-abc123.jpg"),
                "https://abc.supabase.co/storage/v1/object/photos/1/1700000000000-abc123.jpg"
            );
            assert_eq!(
                store
                    .public_object_url("1/1700000000000-abc123.jpg")
                    .unwrap()
                    .as_str(),
                "https://abc.supabase.co/storage/v1/object/public/photos/1/1700000000000-abc123.jpg"
            );
        }
    }

    #[test]
    fn reject_invalid_base_url() {
        let config = RestStoreConfig {
            base_url: "mailto:someone@example.org".parse().unwrap(),
            anon_key: "anon".into(),
            photo_bucket: "photos".into(),
            request_timeout: Duration::from_secs(5),
        };
        assert!(RestStore::try_new(config).is_err());
    }

    #[test]
    fn classify_errors() {
        let not_found = ApiError {
            code: Some("PGRST116".into()),
            message: Some("JSON object requested, multiple (or no) rows returned".into()),
            details: None,
        };
        assert!(matches!(
            classify_error(StatusCode::NOT_ACCEPTABLE, Some(not_found)),
            RepoError::NotFound
        ));
        assert!(matches!(
            classify_error(StatusCode::CONFLICT, None),
            RepoError::AlreadyExists
        ));
        let other = ApiError {
            code: Some("42501".into()),
            message: Some("permission denied for table places".into()),
            details: None,
        };
        match classify_error(StatusCode::UNAUTHORIZED, Some(other)) {
            RepoError::Other(err) => {
                assert!(err.to_string().contains("permission denied"));
            }
            err => panic!("Unexpected error: {err}"),
        }
    }
}
