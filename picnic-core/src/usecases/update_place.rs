use super::prelude::*;

/// Changes of an existing place, `None` keeps the current value.
///
/// A blank description or view type removes it.
#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct PlaceUpdate {
    pub title       : Option<String>,
    pub description : Option<String>,
    pub view_type   : Option<String>,
    pub lat_lng     : Option<(f64, f64)>,
    pub amenities   : Option<Amenities>,
}

pub fn update_place<R: PlaceRepo>(
    repo: &R,
    user_id: &Id,
    place_id: &str,
    update: PlaceUpdate,
) -> Result<Place> {
    let mut place = repo.get_place(place_id)?;
    if !place.is_owned_by(user_id) {
        log::warn!("User {user_id} is not allowed to update place {place_id}");
        return Err(Error::Forbidden);
    }
    let PlaceUpdate {
        title,
        description,
        view_type,
        lat_lng,
        amenities,
    } = update;
    if let Some((lat, lng)) = lat_lng {
        place.pos = MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidPosition)?;
    }
    if let Some(title) = title {
        place.title = title;
    }
    if description.is_some() {
        place.description = description;
    }
    if view_type.is_some() {
        place.view_type = view_type;
    }
    if let Some(amenities) = amenities {
        place.amenities = amenities;
    }
    let mut place = place.auto_correct();
    place.validate()?;
    place.updated_at = Timestamp::now();
    Ok(repo.update_place(&place)?)
}
