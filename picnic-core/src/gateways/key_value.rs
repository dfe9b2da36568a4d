use anyhow::Result;

/// A small persistent store for values that
/// should survive independently of the backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
