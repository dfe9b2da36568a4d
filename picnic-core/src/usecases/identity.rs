use super::prelude::*;
use crate::gateways::{device::DeviceIdentity, key_value::KeyValueStore};

pub const USER_ID_KEY: &str = "user_id";
pub const UNKNOWN_DEVICE_ID: &str = "unknown-device";

/// Find or create the user of this device.
///
/// The store keys users by device id. If no device id is available
/// the cached user id is used instead, so that the same pseudo-account
/// is found again on the next run.
pub fn bootstrap_user<R, D, K>(repo: &R, device: &D, kv: &K) -> Result<User>
where
    R: UserRepo,
    D: DeviceIdentity,
    K: KeyValueStore,
{
    let cached_user_id = kv.get(USER_ID_KEY).filter(|id| !id.trim().is_empty());
    let device_id = device
        .device_id()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| cached_user_id.clone())
        .unwrap_or_else(|| {
            log::warn!("No device id available");
            UNKNOWN_DEVICE_ID.to_owned()
        });
    let user = repo.upsert_user_by_device_id(&device_id)?;
    if cached_user_id.is_none() {
        if let Err(err) = kv.set(USER_ID_KEY, user.id.as_str()) {
            log::warn!("Failed to cache user id: {err}");
        }
    }
    log::debug!("Using account {} of device {}", user.id, user.device_id);
    Ok(user)
}

pub fn change_nickname<R: UserRepo>(repo: &R, user_id: &Id, nickname: &str) -> Result<User> {
    let nickname = nickname.trim();
    if !crate::util::validate::is_valid_nickname(nickname) {
        return Err(Error::Nickname);
    }
    Ok(repo.update_nickname(user_id.as_str(), nickname)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::{MockDb, MockDevice, MockKeyValueStore};

    #[test]
    fn create_user_on_first_run() {
        let db = MockDb::default();
        let kv = MockKeyValueStore::default();
        let user = bootstrap_user(&db, &MockDevice(Some("device-a".into())), &kv).unwrap();
        assert_eq!(user.device_id, "device-a");
        assert_eq!(kv.get(USER_ID_KEY), Some(user.id.to_string()));
        assert_eq!(db.users.borrow().len(), 1);
    }

    #[test]
    fn same_device_same_user() {
        let db = MockDb::default();
        let kv = MockKeyValueStore::default();
        let device = MockDevice(Some("device-a".into()));
        let first = bootstrap_user(&db, &device, &kv).unwrap();
        let second = bootstrap_user(&db, &device, &MockKeyValueStore::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(db.users.borrow().len(), 1);
    }

    #[test]
    fn keep_cached_user_id() {
        let db = MockDb::default();
        let kv = MockKeyValueStore::default();
        kv.set(USER_ID_KEY, "cached-id").unwrap();
        let user = bootstrap_user(&db, &MockDevice(None), &kv).unwrap();
        assert_eq!(user.device_id, "cached-id");
        assert_eq!(kv.get(USER_ID_KEY).as_deref(), Some("cached-id"));
    }

    #[test]
    fn unknown_device() {
        let db = MockDb::default();
        let kv = MockKeyValueStore::default();
        let user = bootstrap_user(&db, &MockDevice(Some(" ".into())), &kv).unwrap();
        assert_eq!(user.device_id, UNKNOWN_DEVICE_ID);
    }

    #[test]
    fn nickname() {
        let db = MockDb::default();
        let kv = MockKeyValueStore::default();
        let user = bootstrap_user(&db, &MockDevice(Some("device-a".into())), &kv).unwrap();
        assert_eq!(user.display_name(), "Anonymous");
        let user = change_nickname(&db, &user.id, "  Alice ").unwrap();
        assert_eq!(user.nickname.as_deref(), Some("Alice"));
        assert!(matches!(
            change_nickname(&db, &user.id, " "),
            Err(Error::Nickname)
        ));
        assert!(matches!(
            change_nickname(&db, &"nobody".into(), "Bob"),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }
}
