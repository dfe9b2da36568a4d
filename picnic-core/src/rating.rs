use picnic_entities::{place::*, review::*};

pub trait Rated {
    fn avg_rating(&self, _: &[Review]) -> Option<AvgRatingValue>;
}

impl Rated for Place {
    fn avg_rating(&self, reviews: &[Review]) -> Option<AvgRatingValue> {
        debug_assert_eq!(
            reviews.len(),
            reviews.iter().filter(|r| r.place_id == self.id).count()
        );
        reviews
            .iter()
            .fold(AvgRatingValueBuilder::default(), |mut acc, r| {
                acc.add(r.rating);
                acc
            })
            .build()
    }
}
