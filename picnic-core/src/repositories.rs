// Low-level store access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait PlaceRepo {
    fn get_place(&self, id: &str) -> Result<Place>;
    // Newest places first
    fn all_places(&self) -> Result<Vec<Place>>;

    // The store assigns id and timestamps of new places
    fn create_place(&self, place: Place) -> Result<Place>;
    fn update_place(&self, place: &Place) -> Result<Place>;
    fn delete_place(&self, id: &str) -> Result<()>;
}

pub trait UserRepo {
    fn upsert_user_by_device_id(&self, device_id: &str) -> Result<User>;
    fn update_nickname(&self, user_id: &str, nickname: &str) -> Result<User>;
}

pub trait ReviewRepo {
    fn create_review(&self, review: Review) -> Result<Review>;
    // Newest reviews first
    fn load_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>>;
}

pub trait QuestionRepo {
    fn create_question(&self, question: Question) -> Result<Question>;
    fn create_answer(&self, answer: Answer) -> Result<Answer>;
    fn get_question(&self, id: &str) -> Result<Question>;
    // Newest questions first
    fn load_questions_with_answers_of_place(
        &self,
        place_id: &str,
    ) -> Result<Vec<QuestionWithAnswers>>;
}

pub trait PhotoRepo {
    fn create_photo(&self, photo: Photo) -> Result<Photo>;
    fn get_photo(&self, id: &str) -> Result<Photo>;
    // Newest photos first
    fn load_photos_of_place(&self, place_id: &str) -> Result<Vec<Photo>>;
    fn delete_photo(&self, id: &str) -> Result<()>;
}
