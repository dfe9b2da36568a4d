use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{geo::*, id::*, time::*};

/// The fixed set of boolean amenity flags of a place.
#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amenities {
    pub good_for_date : bool,
    pub shade         : bool,
    pub flowers       : bool,
    pub parking       : bool,
    pub toilets       : bool,
    pub quiet         : bool,
}

/// A feature of a place that can be required when searching.
///
/// All variants except [`Amenity::View`] map to a flag in [`Amenities`],
/// the view is derived from the view type of the place.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Amenity {
    #[strum(to_string = "good-for-date", serialize = "date")]
    GoodForDate,
    Shade,
    Flowers,
    View,
    Parking,
    Toilets,
    Quiet,
}

impl Amenities {
    pub fn get(&self, amenity: Amenity) -> Option<bool> {
        use Amenity as A;
        match amenity {
            A::GoodForDate => Some(self.good_for_date),
            A::Shade => Some(self.shade),
            A::Flowers => Some(self.flowers),
            A::Parking => Some(self.parking),
            A::Toilets => Some(self.toilets),
            A::Quiet => Some(self.quiet),
            A::View => None,
        }
    }

    /// Returns `false` if the amenity has no flag.
    pub fn set(&mut self, amenity: Amenity, value: bool) -> bool {
        use Amenity as A;
        let flag = match amenity {
            A::GoodForDate => &mut self.good_for_date,
            A::Shade => &mut self.shade,
            A::Flowers => &mut self.flowers,
            A::Parking => &mut self.parking,
            A::Toilets => &mut self.toilets,
            A::Quiet => &mut self.quiet,
            A::View => return false,
        };
        *flag = value;
        true
    }
}

impl FromIterator<Amenity> for Amenities {
    fn from_iter<I: IntoIterator<Item = Amenity>>(iter: I) -> Self {
        let mut amenities = Self::default();
        for amenity in iter {
            amenities.set(amenity, true);
        }
        amenities
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub view_type: Option<String>,
    pub pos: MapPoint,
    pub amenities: Amenities,
    pub owner: Id,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Place {
    pub fn has_view(&self) -> bool {
        self.view_type
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::View => self.has_view(),
            _ => self.amenities.get(amenity).unwrap_or(false),
        }
    }

    pub fn is_owned_by(&self, user_id: &Id) -> bool {
        user_id.is_valid() && &self.owner == user_id
    }
}
