use std::{io, path::Path};

use anyhow::Result;
use jfs::Store;
use picnic_core::gateways::key_value::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Keeps each value in a separate JSON file within a directory.
pub struct JsonFileStore {
    json_store: Store,
}

impl JsonFileStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonValue {
    value: String,
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.json_store.get::<JsonValue>(key) {
            Ok(JsonValue { value }) => Some(value),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("Unable to read '{key}' from JSON file: {err}");
                }
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let value = JsonValue {
            value: value.to_owned(),
        };
        self.json_store.save_with_id(&value, key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        assert_eq!(store.get("user_id"), None);
        store.set("user_id", "42").unwrap();
        assert_eq!(store.get("user_id").as_deref(), Some("42"));
        store.set("user_id", "43").unwrap();
        assert_eq!(store.get("user_id").as_deref(), Some("43"));
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        JsonFileStore::try_new(dir.path())
            .unwrap()
            .set("user_id", "abc")
            .unwrap();
        let store = JsonFileStore::try_new(dir.path()).unwrap();
        assert_eq!(store.get("user_id").as_deref(), Some("abc"));
    }
}
