use std::collections::HashMap;

use super::prelude::*;
use crate::rating::Rated;

/// A place of the current user together with
/// the questions that are still waiting for an answer.
#[derive(Debug, Clone)]
pub struct OwnPlace {
    pub place: Place,
    pub pending_questions: Vec<QuestionWithAnswers>,
}

pub fn load_place<R: PlaceRepo>(repo: &R, id: &str) -> Result<Place> {
    Ok(repo.get_place(id)?)
}

/// All places, newest first.
pub fn load_places<R: PlaceRepo>(repo: &R) -> Result<Vec<Place>> {
    Ok(repo.all_places()?)
}

pub fn load_places_of_owner<R>(repo: &R, owner: &Id) -> Result<Vec<OwnPlace>>
where
    R: PlaceRepo + QuestionRepo,
{
    let mut own_places = vec![];
    for place in repo
        .all_places()?
        .into_iter()
        .filter(|p| p.is_owned_by(owner))
    {
        let questions = repo.load_questions_with_answers_of_place(place.id.as_str())?;
        own_places.push(OwnPlace {
            place,
            pending_questions: super::pending_questions(questions),
        });
    }
    Ok(own_places)
}

/// Places whose reviews could not be loaded are treated as unrated.
pub fn load_avg_ratings<R: ReviewRepo>(repo: &R, places: &[Place]) -> HashMap<Id, AvgRatingValue> {
    let mut avg_ratings = HashMap::with_capacity(places.len());
    for place in places {
        let reviews = match repo.load_reviews_of_place(place.id.as_str()) {
            Ok(reviews) => reviews,
            Err(err) => {
                log::warn!("Failed to load reviews of place {}: {err}", place.id);
                continue;
            }
        };
        if let Some(avg) = place.avg_rating(&reviews) {
            avg_ratings.insert(place.id.clone(), avg);
        }
    }
    avg_ratings
}
