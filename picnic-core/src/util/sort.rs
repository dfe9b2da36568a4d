use std::{cmp::Ordering, collections::HashMap};

use picnic_entities::{geo::*, id::Id, place::*, review::AvgRatingValue};
use strum::{Display, EnumIter, EnumString};

/// The order in which places are presented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    /// Newest places first.
    #[default]
    Recent,
    /// Best rated places first, unrated places last.
    Rating,
    /// Nearest places first, places without a valid position last.
    Distance,
}

pub trait SortByRecency {
    fn sort_by_recency(&mut self);
}

impl SortByRecency for [Place] {
    fn sort_by_recency(&mut self) {
        // Stable: places created at the same time keep their order
        self.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

trait DistanceTo {
    fn distance_to(&self, pos: MapPoint) -> Option<Distance>;
}

impl DistanceTo for Place {
    fn distance_to(&self, pos: MapPoint) -> Option<Distance> {
        MapPoint::distance(self.pos, pos)
    }
}

pub trait SortByDistanceTo {
    fn sort_by_distance_to(&mut self, pos: MapPoint);
}

impl SortByDistanceTo for [Place] {
    fn sort_by_distance_to(&mut self, pos: MapPoint) {
        if !pos.is_valid() {
            log::warn!("Cannot sort places by distance to invalid position {pos}");
            return;
        }
        self.sort_by(|a, b| match (a.distance_to(pos), b.distance_to(pos)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
}

pub trait SortByAverageRating {
    fn sort_by_avg_rating(&mut self, avg_ratings: &HashMap<Id, AvgRatingValue>);
}

impl SortByAverageRating for [Place] {
    fn sort_by_avg_rating(&mut self, avg_ratings: &HashMap<Id, AvgRatingValue>) {
        self.sort_by(
            |a, b| match (avg_ratings.get(&a.id), avg_ratings.get(&b.id)) {
                (Some(a), Some(b)) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        );
    }
}
