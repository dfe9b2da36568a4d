pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{place_builder::*, review_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{geo::*, id::*, place::*, time::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.place.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.place.title = title.into();
            self
        }
        pub fn description(mut self, desc: Option<&str>) -> Self {
            self.place.description = desc.map(Into::into);
            self
        }
        pub fn view_type(mut self, view_type: Option<&str>) -> Self {
            self.place.view_type = view_type.map(Into::into);
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.pos = pos;
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(MapPoint::from_lat_lng_deg(lat, lng))
        }
        pub fn amenities(mut self, amenities: &[Amenity]) -> Self {
            let flags = &mut self.place.amenities;
            for &amenity in amenities {
                if !flags.set(amenity, true) && self.place.view_type.is_none() {
                    self.place.view_type = Some("Panorama".into());
                }
            }
            self
        }
        pub fn owner(mut self, owner: &str) -> Self {
            self.place.owner = owner.into();
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.place.created_at = created_at;
            self.place.updated_at = created_at;
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            let now = Timestamp::now();
            PlaceBuild {
                place: Place {
                    id: Id::new(),
                    title: "".into(),
                    description: None,
                    view_type: None,
                    pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    amenities: Default::default(),
                    owner: Id::new(),
                    created_at: now,
                    updated_at: now,
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{id::*, review::*, time::*};

    #[derive(Debug)]
    pub struct ReviewBuild {
        review: Review,
    }

    impl ReviewBuild {
        pub fn place_id(mut self, place_id: &str) -> Self {
            self.review.place_id = place_id.into();
            self
        }
        pub fn author(mut self, author: &str) -> Self {
            self.review.author = author.into();
            self
        }
        pub fn rating(mut self, rating: u8) -> Self {
            self.review.rating = rating.into();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.review.text = text.into();
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.review.created_at = created_at;
            self
        }
        pub fn finish(self) -> Review {
            self.review
        }
    }

    impl Builder for Review {
        type Build = ReviewBuild;
        fn build() -> ReviewBuild {
            ReviewBuild {
                review: Review {
                    id: Id::new(),
                    place_id: Id::new(),
                    author: Id::new(),
                    author_nickname: None,
                    rating: RatingValue::max(),
                    text: "".into(),
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}
