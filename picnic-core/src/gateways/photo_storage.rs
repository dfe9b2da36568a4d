use anyhow::Result;
use picnic_entities::url::Url;

/// Object storage for the binary content of photos.
pub trait PhotoStorage {
    /// Store the content at `path` and return its public URL.
    fn upload(&self, path: &str, content: &[u8], content_type: &str) -> Result<Url>;
    fn remove(&self, path: &str) -> Result<()>;
}
