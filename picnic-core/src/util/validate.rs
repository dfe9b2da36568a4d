use picnic_entities::{place::Place, question::*, review::Review};
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

/// Trims the string and drops it if nothing remains.
pub fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

pub fn is_valid_text(text: &str) -> bool {
    !text.trim().is_empty()
}

pub fn is_valid_nickname(nickname: &str) -> bool {
    !nickname.trim().is_empty()
}

impl AutoCorrect for Place {
    fn auto_correct(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.description = non_blank(self.description);
        self.view_type = non_blank(self.view_type);
        self
    }
}

#[derive(Debug, Error)]
pub enum PlaceInvalidation {
    #[error("Invalid title")]
    Title,
    #[error("Invalid position")]
    Position,
}

impl Validate for Place {
    type Error = PlaceInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.title.trim().is_empty() {
            return Err(Self::Error::Title);
        }
        if !self.pos.is_valid() {
            return Err(Self::Error::Position);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ReviewInvalidation {
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Empty review")]
    EmptyText,
}

impl AutoCorrect for Review {
    fn auto_correct(mut self) -> Self {
        self.text = self.text.trim().to_owned();
        self
    }
}

impl Validate for Review {
    type Error = ReviewInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if !self.rating.is_valid() {
            return Err(Self::Error::RatingValue);
        }
        if !is_valid_text(&self.text) {
            return Err(Self::Error::EmptyText);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Empty text")]
pub struct EmptyText;

impl Validate for Question {
    type Error = EmptyText;
    fn validate(&self) -> Result<(), Self::Error> {
        is_valid_text(&self.text).then_some(()).ok_or(EmptyText)
    }
}

impl Validate for Answer {
    type Error = EmptyText;
    fn validate(&self) -> Result<(), Self::Error> {
        is_valid_text(&self.text).then_some(()).ok_or(EmptyText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picnic_entities::{builders::*, geo::MapPoint};

    #[test]
    fn auto_correct_place() {
        let place = Place::build()
            .title("  Jardin des Plantes ")
            .description(Some("   "))
            .view_type(Some(" Jardin "))
            .finish()
            .auto_correct();
        assert_eq!(place.title, "Jardin des Plantes");
        assert_eq!(place.description, None);
        assert_eq!(place.view_type.as_deref(), Some("Jardin"));
    }

    #[test]
    fn validate_place() {
        assert!(Place::build().title("Parc").finish().validate().is_ok());
        assert!(matches!(
            Place::build().title(" ").finish().validate(),
            Err(PlaceInvalidation::Title)
        ));
        assert!(matches!(
            Place::build()
                .title("Parc")
                .pos(MapPoint::from_lat_lng_deg_unchecked(91.0, 0.0))
                .finish()
                .validate(),
            Err(PlaceInvalidation::Position)
        ));
    }

    #[test]
    fn validate_review() {
        let review = Review::build().rating(3).text("Nice").finish();
        assert!(review.validate().is_ok());
        let review = Review::build().rating(0).text("Nice").finish();
        assert!(matches!(review.validate(), Err(ReviewInvalidation::RatingValue)));
        let review = Review::build().rating(6).text("Nice").finish();
        assert!(matches!(review.validate(), Err(ReviewInvalidation::RatingValue)));
        let review = Review::build().rating(5).text(" \n").finish();
        assert!(matches!(review.validate(), Err(ReviewInvalidation::EmptyText)));
    }

    #[test]
    fn blank_strings() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" ".into())), None);
        assert_eq!(non_blank(Some(" a ".into())), Some("a".into()));
        assert!(!is_valid_nickname("   "));
        assert!(is_valid_nickname("Alice"));
    }
}
