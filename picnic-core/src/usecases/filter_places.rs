//! Filtering of places by text, distance and amenities.
//!
//! Filtering is a pure function of its inputs and never fails:
//! places that cannot be evaluated are skipped or, in the worst
//! case, the unfiltered list is returned.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    panic::{self, AssertUnwindSafe},
    str::FromStr,
};

use thiserror::Error;

use super::prelude::*;
use crate::util::sort::{SortByAverageRating, SortByDistanceTo, SortByRecency, SortOrder};

pub const DEFAULT_MAX_DISTANCE: MaxDistance = MaxDistance::Limited(Distance::from_meters(5_000.0));

pub const DEFAULT_NEARBY_RADIUS: Distance = Distance::from_meters(5_000.0);

/// The distance limits offered for selection.
pub const MAX_DISTANCE_PRESETS: [MaxDistance; 6] = [
    MaxDistance::Limited(Distance::from_meters(1_000.0)),
    MaxDistance::Limited(Distance::from_meters(3_000.0)),
    MaxDistance::Limited(Distance::from_meters(5_000.0)),
    MaxDistance::Limited(Distance::from_meters(10_000.0)),
    MaxDistance::Limited(Distance::from_meters(20_000.0)),
    MaxDistance::Unlimited,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxDistance {
    Limited(Distance),
    Unlimited,
}

impl Default for MaxDistance {
    fn default() -> Self {
        DEFAULT_MAX_DISTANCE
    }
}

impl MaxDistance {
    pub fn from_km(km: f64) -> Self {
        Self::Limited(Distance::from_km(km))
    }

    pub fn limit(self) -> Option<Distance> {
        match self {
            Self::Limited(d) => Some(d),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for MaxDistance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Limited(d) => write!(f, "{d}"),
            Self::Unlimited => f.write_str("no limit"),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid max. distance '{0}' (expected kilometers or 'none')")]
pub struct MaxDistanceParseError(String);

impl FromStr for MaxDistance {
    type Err = MaxDistanceParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "none" | "unlimited" | "-1" => return Ok(Self::Unlimited),
            _ => {}
        }
        s.trim_end_matches("km")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|km| km.is_finite() && *km >= 0.0)
            .map(Self::from_km)
            .ok_or_else(|| MaxDistanceParseError(s.to_owned()))
    }
}

/// The state of a single amenity filter.
///
/// Excluding places that have an amenity is not supported,
/// toggling only switches between both states.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AmenityFilter {
    Required,
    #[default]
    Unconstrained,
}

impl AmenityFilter {
    pub fn toggle(self) -> Self {
        match self {
            Self::Required => Self::Unconstrained,
            Self::Unconstrained => Self::Required,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AmenityFilters(BTreeMap<Amenity, AmenityFilter>);

impl AmenityFilters {
    pub fn get(&self, amenity: Amenity) -> AmenityFilter {
        self.0.get(&amenity).copied().unwrap_or_default()
    }

    pub fn set(&mut self, amenity: Amenity, filter: AmenityFilter) {
        self.0.insert(amenity, filter);
    }

    /// Returns the new state.
    pub fn toggle(&mut self, amenity: Amenity) -> AmenityFilter {
        let filter = self.get(amenity).toggle();
        self.set(amenity, filter);
        filter
    }

    pub fn required(&self) -> impl Iterator<Item = Amenity> + '_ {
        self.0
            .iter()
            .filter(|(_, f)| **f == AmenityFilter::Required)
            .map(|(a, _)| *a)
    }

    pub fn reset(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Amenity> for AmenityFilters {
    fn from_iter<I: IntoIterator<Item = Amenity>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|a| (a, AmenityFilter::Required))
                .collect(),
        )
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Default)]
pub struct PlaceFilter {
    /// Matched against title, description and view type
    pub text            : Option<String>,
    /// Matched against the view type only
    pub view_type       : Option<String>,
    pub reference_point : Option<MapPoint>,
    pub max_distance    : MaxDistance,
    pub amenities       : AmenityFilters,
}

fn contains_ignore_case(field: Option<&str>, query_lc: &str) -> bool {
    field
        .map(|f| f.to_lowercase().contains(query_lc))
        .unwrap_or(false)
}

fn non_blank_lowercase(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

impl PlaceFilter {
    /// Number of filters that deviate from the defaults.
    pub fn active_filter_count(&self) -> usize {
        let distance = usize::from(self.max_distance != DEFAULT_MAX_DISTANCE);
        self.amenities.required().count() + distance
    }

    fn matches(&self, place: &Place, text_lc: Option<&str>, view_type_lc: Option<&str>) -> bool {
        if let Some(q) = text_lc {
            let found = contains_ignore_case(Some(place.title.as_str()), q)
                || contains_ignore_case(place.description.as_deref(), q)
                || contains_ignore_case(place.view_type.as_deref(), q);
            if !found {
                return false;
            }
        }
        if let Some(q) = view_type_lc {
            if !contains_ignore_case(place.view_type.as_deref(), q) {
                return false;
            }
        }
        if let (Some(ref_point), Some(max)) = (self.reference_point, self.max_distance.limit()) {
            match MapPoint::distance(place.pos, ref_point) {
                Some(d) if d <= max => {}
                Some(_) => return false,
                None => {
                    log::debug!(
                        "Skipping place {} with invalid position {}",
                        place.id,
                        place.pos
                    );
                    return false;
                }
            }
        }
        self.amenities.required().all(|a| place.has(a))
    }
}

/// Select all places that match the filter, keeping their order.
pub fn filter_places(places: &[Place], filter: &PlaceFilter) -> Vec<Place> {
    let text_lc = non_blank_lowercase(filter.text.as_deref());
    let view_type_lc = non_blank_lowercase(filter.view_type.as_deref());
    retain_or_all(places, |p| {
        filter.matches(p, text_lc.as_deref(), view_type_lc.as_deref())
    })
}

// Returns all places if the predicate panics
fn retain_or_all<F>(places: &[Place], predicate: F) -> Vec<Place>
where
    F: Fn(&Place) -> bool,
{
    let filtered = panic::catch_unwind(AssertUnwindSafe(|| {
        places
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect::<Vec<_>>()
    }));
    match filtered {
        Ok(places) => places,
        Err(_) => {
            log::error!("Failed to filter {} places, returning all of them", places.len());
            places.to_vec()
        }
    }
}

pub fn count_nearby_places(places: &[Place], center: MapPoint, radius: Distance) -> usize {
    places
        .iter()
        .filter_map(|p| MapPoint::distance(p.pos, center))
        .filter(|d| *d <= radius)
        .count()
}

pub fn sort_places(
    places: &mut [Place],
    order: SortOrder,
    avg_ratings: &HashMap<Id, AvgRatingValue>,
    reference_point: Option<MapPoint>,
) {
    match order {
        SortOrder::Recent => places.sort_by_recency(),
        SortOrder::Rating => places.sort_by_avg_rating(avg_ratings),
        SortOrder::Distance => match reference_point {
            Some(pos) => places.sort_by_distance_to(pos),
            None => {
                log::warn!("No reference point to sort by distance, sorting by recency");
                places.sort_by_recency();
            }
        },
    }
}
