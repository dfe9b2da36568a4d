use super::prelude::*;

pub fn delete_place<R: PlaceRepo>(repo: &R, user_id: &Id, place_id: &str) -> Result<()> {
    let place = repo.get_place(place_id)?;
    if !place.is_owned_by(user_id) {
        log::warn!("User {user_id} is not allowed to delete place {place_id}");
        return Err(Error::Forbidden);
    }
    repo.delete_place(place_id)?;
    log::info!("Deleted place {place_id}");
    Ok(())
}
