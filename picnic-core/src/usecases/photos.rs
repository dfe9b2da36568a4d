use super::prelude::*;
use crate::gateways::photo_storage::PhotoStorage;

const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Path of a new photo object within the bucket:
/// `{place_id}/{millis}-{suffix}.jpg`
fn photo_object_path(place_id: &str, created_at: Timestamp) -> (String, String) {
    let suffix: String = Id::new()
        .as_str()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(6)
        .collect();
    let filename = format!("{}-{suffix}.jpg", created_at.as_millis());
    (format!("{place_id}/{filename}"), filename)
}

pub fn upload_photo<R, S>(repo: &R, storage: &S, place_id: &str, content: &[u8]) -> Result<Photo>
where
    R: PlaceRepo + PhotoRepo,
    S: PhotoStorage,
{
    if content.is_empty() {
        return Err(Error::EmptyPhoto);
    }
    let place = repo.get_place(place_id)?;
    let created_at = Timestamp::now();
    let (path, filename) = photo_object_path(place.id.as_str(), created_at);
    let url = storage
        .upload(&path, content, PHOTO_CONTENT_TYPE)
        .map_err(Error::Storage)?;
    log::debug!("Uploaded {} bytes to {path}", content.len());
    let photo = Photo {
        id: Id::default(),
        place_id: place.id,
        url,
        file_size: content.len() as u64,
        filename,
        created_at,
    };
    Ok(repo.create_photo(photo)?)
}

/// Newest photos first.
pub fn load_photos_of_place<R: PhotoRepo>(repo: &R, place_id: &str) -> Result<Vec<Photo>> {
    Ok(repo.load_photos_of_place(place_id)?)
}

/// Deletes the record even if the stored object could not be removed.
pub fn delete_photo<R, S>(repo: &R, storage: &S, user_id: &Id, photo_id: &str) -> Result<()>
where
    R: PlaceRepo + PhotoRepo,
    S: PhotoStorage,
{
    let photo = repo.get_photo(photo_id)?;
    let place = repo.get_place(photo.place_id.as_str())?;
    if !place.is_owned_by(user_id) {
        log::warn!("User {user_id} is not allowed to delete photo {photo_id}");
        return Err(Error::Forbidden);
    }
    let object_name = photo
        .object_name()
        .map(ToOwned::to_owned)
        .unwrap_or(photo.filename);
    let path = format!("{}/{object_name}", place.id);
    if let Err(err) = storage.remove(&path) {
        log::warn!("Failed to remove photo object {path}: {err}");
    }
    Ok(repo.delete_photo(photo_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::{MockDb, MockPhotoStorage};
    use picnic_entities::builders::*;

    fn db_with_place() -> MockDb {
        let db = MockDb::default();
        db.places
            .borrow_mut()
            .push(Place::build().id("1").owner("owner").finish());
        db
    }

    #[test]
    fn object_path() {
        let at = Timestamp::try_from_millis(1_700_000_000_123).unwrap();
        let (path, filename) = photo_object_path("1", at);
        assert!(path.starts_with("1/1700000000123-"));
        assert!(path.ends_with(".jpg"));
        assert_eq!(path, format!("1/{filename}"));
        let suffix = filename
            .trim_start_matches("1700000000123-")
            .trim_end_matches(".jpg");
        assert_eq!(suffix.len(), 6);
    }

    #[test]
    fn upload_and_list_photos() {
        let db = db_with_place();
        let storage = MockPhotoStorage::default();
        let photo = upload_photo(&db, &storage, "1", &[0xFF, 0xD8, 0xFF]).unwrap();
        assert!(photo.id.is_valid());
        assert_eq!(photo.file_size, 3);
        assert_eq!(photo.object_name(), Some(photo.filename.as_str()));
        let path = format!("1/{}", photo.filename);
        assert!(storage.objects.borrow().contains_key(&path));
        assert_eq!(load_photos_of_place(&db, "1").unwrap(), vec![photo]);
    }

    #[test]
    fn reject_empty_photo() {
        let db = db_with_place();
        let storage = MockPhotoStorage::default();
        assert!(matches!(
            upload_photo(&db, &storage, "1", &[]),
            Err(Error::EmptyPhoto)
        ));
        assert!(storage.objects.borrow().is_empty());
    }

    #[test]
    fn failed_upload_creates_no_record() {
        let db = db_with_place();
        let storage = MockPhotoStorage {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            upload_photo(&db, &storage, "1", &[1, 2, 3]),
            Err(Error::Storage(_))
        ));
        assert!(db.photos.borrow().is_empty());
    }

    #[test]
    fn only_the_place_owner_can_delete_photos() {
        let db = db_with_place();
        let storage = MockPhotoStorage::default();
        let photo = upload_photo(&db, &storage, "1", &[1, 2, 3]).unwrap();
        assert!(matches!(
            delete_photo(&db, &storage, &"visitor".into(), photo.id.as_str()),
            Err(Error::Forbidden)
        ));
        delete_photo(&db, &storage, &"owner".into(), photo.id.as_str()).unwrap();
        assert!(db.photos.borrow().is_empty());
        assert!(storage.objects.borrow().is_empty());
    }

    #[test]
    fn delete_record_even_if_object_removal_fails() {
        let db = db_with_place();
        let storage = MockPhotoStorage::default();
        let photo = upload_photo(&db, &storage, "1", &[1, 2, 3]).unwrap();
        let failing = MockPhotoStorage {
            fail: true,
            ..Default::default()
        };
        delete_photo(&db, &failing, &"owner".into(), photo.id.as_str()).unwrap();
        assert!(db.photos.borrow().is_empty());
    }
}
