use super::prelude::*;

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct NewPlace {
    pub title       : String,
    pub description : Option<String>,
    pub view_type   : Option<String>,
    pub lat         : f64,
    pub lng         : f64,
    pub amenities   : Amenities,
}

pub fn create_new_place<R: PlaceRepo>(repo: &R, owner: &Id, new_place: NewPlace) -> Result<Place> {
    if !owner.is_valid() {
        return Err(Error::Forbidden);
    }
    let NewPlace {
        title,
        description,
        view_type,
        lat,
        lng,
        amenities,
    } = new_place;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidPosition)?;
    let now = Timestamp::now();
    let place = Place {
        // assigned by the store
        id: Id::default(),
        title,
        description,
        view_type,
        pos,
        amenities,
        owner: owner.clone(),
        created_at: now,
        updated_at: now,
    }
    .auto_correct();
    place.validate()?;
    let place = repo.create_place(place)?;
    log::info!("Created place {} ({})", place.id, place.title);
    Ok(place)
}
