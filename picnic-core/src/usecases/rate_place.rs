use super::prelude::*;
use crate::rating::Rated;

#[rustfmt::skip]
#[derive(Debug, Clone)]
pub struct NewReview {
    pub place_id : String,
    pub rating   : u8,
    pub text     : String,
}

pub fn rate_place<R>(repo: &R, author: &User, new_review: NewReview) -> Result<Review>
where
    R: PlaceRepo + ReviewRepo,
{
    let NewReview {
        place_id,
        rating,
        text,
    } = new_review;
    let review = Review {
        id: Id::default(),
        place_id: place_id.into(),
        author: author.id.clone(),
        author_nickname: author.nickname.clone(),
        rating: rating.into(),
        text,
        created_at: Timestamp::now(),
    }
    .auto_correct();
    review.validate()?;
    repo.get_place(review.place_id.as_str())?;
    Ok(repo.create_review(review)?)
}

/// Newest reviews first.
pub fn load_reviews_of_place<R: ReviewRepo>(repo: &R, place_id: &str) -> Result<Vec<Review>> {
    Ok(repo.load_reviews_of_place(place_id)?)
}

pub fn avg_rating<R: PlaceRepo + ReviewRepo>(
    repo: &R,
    place_id: &str,
) -> Result<Option<AvgRatingValue>> {
    let place = repo.get_place(place_id)?;
    let reviews = repo.load_reviews_of_place(place_id)?;
    Ok(place.avg_rating(&reviews))
}
