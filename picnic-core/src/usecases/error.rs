use crate::{
    repositories,
    util::validate::{EmptyText, PlaceInvalidation, ReviewInvalidation},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Empty text")]
    EmptyText,
    #[error("Invalid nickname")]
    Nickname,
    #[error("Empty photo")]
    EmptyPhoto,
    #[error("This is not allowed")]
    Forbidden,
    #[error("Photo storage failed: {0}")]
    Storage(anyhow::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<PlaceInvalidation> for Error {
    fn from(err: PlaceInvalidation) -> Self {
        match err {
            PlaceInvalidation::Title => Self::Title,
            PlaceInvalidation::Position => Self::InvalidPosition,
        }
    }
}

impl From<ReviewInvalidation> for Error {
    fn from(err: ReviewInvalidation) -> Self {
        match err {
            ReviewInvalidation::RatingValue => Self::RatingValue,
            ReviewInvalidation::EmptyText => Self::EmptyText,
        }
    }
}

impl From<EmptyText> for Error {
    fn from(_: EmptyText) -> Self {
        Self::EmptyText
    }
}
