use super::*;
use picnic_entities as e;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid URL: {0}")]
    Url(#[from] e::url::ParseError),
    #[error("Rating value {0} out of range")]
    RatingValue(i64),
}

// Missing or unparsable timestamps are treated as the epoch.
fn timestamp(from: Option<&str>) -> e::time::Timestamp {
    from.and_then(|s| s.parse().ok()).unwrap_or_default()
}

fn id(from: Option<String>) -> e::id::Id {
    from.map(Into::into).unwrap_or_default()
}

impl From<Place> for e::place::Place {
    fn from(from: Place) -> Self {
        let Place {
            id: place_id,
            title,
            description,
            view_type,
            latitude,
            longitude,
            is_good_for_date,
            has_shade,
            has_flowers,
            has_parking,
            has_toilets,
            is_quiet,
            user_id,
            created_at,
            updated_at,
        } = from;
        let pos = e::geo::MapPoint::from_lat_lng_deg_unchecked(
            latitude.unwrap_or(f64::NAN),
            longitude.unwrap_or(f64::NAN),
        );
        let amenities = e::place::Amenities {
            good_for_date: is_good_for_date.unwrap_or_default(),
            shade: has_shade.unwrap_or_default(),
            flowers: has_flowers.unwrap_or_default(),
            parking: has_parking.unwrap_or_default(),
            toilets: has_toilets.unwrap_or_default(),
            quiet: is_quiet.unwrap_or_default(),
        };
        let created_at = timestamp(created_at.as_deref());
        let updated_at = updated_at
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(created_at);
        Self {
            id: place_id.into(),
            title,
            description,
            view_type,
            pos,
            amenities,
            owner: id(user_id),
            created_at,
            updated_at,
        }
    }
}

impl From<&e::place::Place> for PlaceData {
    fn from(from: &e::place::Place) -> Self {
        let e::place::Place {
            title,
            description,
            view_type,
            pos,
            amenities,
            owner,
            updated_at,
            ..
        } = from;
        let (latitude, longitude) = pos.to_lat_lng_deg();
        let e::place::Amenities {
            good_for_date,
            shade,
            flowers,
            parking,
            toilets,
            quiet,
        } = *amenities;
        Self {
            title: title.clone(),
            description: description.clone(),
            view_type: view_type.clone(),
            latitude,
            longitude,
            is_good_for_date: good_for_date,
            has_shade: shade,
            has_flowers: flowers,
            has_parking: parking,
            has_toilets: toilets,
            is_quiet: quiet,
            user_id: owner.is_valid().then(|| owner.to_string()),
            updated_at: Some(updated_at.to_rfc3339()),
        }
    }
}

impl From<User> for e::user::User {
    fn from(from: User) -> Self {
        let User {
            id,
            device_id,
            nickname,
        } = from;
        Self {
            id: id.into(),
            device_id,
            nickname,
        }
    }
}

impl TryFrom<Review> for e::review::Review {
    type Error = ConversionError;
    fn try_from(from: Review) -> Result<Self, Self::Error> {
        let Review {
            id: review_id,
            place_id,
            user_id,
            user_nickname,
            rating,
            text,
            created_at,
        } = from;
        let rating = u8::try_from(rating)
            .ok()
            .map(e::review::RatingValue::from)
            .filter(|r| r.is_valid())
            .ok_or(ConversionError::RatingValue(rating))?;
        Ok(Self {
            id: review_id.into(),
            place_id: place_id.into(),
            author: id(user_id),
            author_nickname: user_nickname,
            rating,
            text,
            created_at: timestamp(created_at.as_deref()),
        })
    }
}

impl From<&e::review::Review> for NewReview {
    fn from(from: &e::review::Review) -> Self {
        Self {
            place_id: from.place_id.to_string(),
            user_id: from.author.to_string(),
            rating: from.rating.into(),
            text: from.text.clone(),
        }
    }
}

impl From<Question> for e::question::Question {
    fn from(from: Question) -> Self {
        let Question {
            id: question_id,
            place_id,
            user_id,
            user_nickname,
            text,
            created_at,
        } = from;
        Self {
            id: question_id.into(),
            place_id: place_id.into(),
            author: id(user_id),
            author_nickname: user_nickname,
            text,
            created_at: timestamp(created_at.as_deref()),
        }
    }
}

impl From<&e::question::Question> for NewQuestion {
    fn from(from: &e::question::Question) -> Self {
        Self {
            place_id: from.place_id.to_string(),
            user_id: from.author.to_string(),
            text: from.text.clone(),
        }
    }
}

impl From<Answer> for e::question::Answer {
    fn from(from: Answer) -> Self {
        let Answer {
            id: answer_id,
            question_id,
            user_id,
            user_nickname,
            text,
            created_at,
        } = from;
        Self {
            id: answer_id.into(),
            question_id: question_id.into(),
            author: id(user_id),
            author_nickname: user_nickname,
            text,
            created_at: timestamp(created_at.as_deref()),
        }
    }
}

impl From<&e::question::Answer> for NewAnswer {
    fn from(from: &e::question::Answer) -> Self {
        Self {
            question_id: from.question_id.to_string(),
            user_id: from.author.to_string(),
            text: from.text.clone(),
        }
    }
}

impl From<QuestionWithAnswers> for e::question::QuestionWithAnswers {
    fn from(from: QuestionWithAnswers) -> Self {
        let QuestionWithAnswers { question, answers } = from;
        let mut answers: Vec<e::question::Answer> = answers.into_iter().map(Into::into).collect();
        answers.sort_by_key(|a| a.created_at);
        Self {
            question: question.into(),
            answers,
        }
    }
}

impl TryFrom<Photo> for e::photo::Photo {
    type Error = ConversionError;
    fn try_from(from: Photo) -> Result<Self, Self::Error> {
        let Photo {
            id: photo_id,
            place_id,
            url,
            file_size,
            filename,
            created_at,
        } = from;
        let url: e::url::Url = url.parse()?;
        let filename = filename
            .or_else(|| {
                url.path_segments()
                    .and_then(|mut s| s.next_back())
                    .map(ToOwned::to_owned)
            })
            .unwrap_or_default();
        Ok(Self {
            id: photo_id.into(),
            place_id: place_id.into(),
            url,
            file_size: file_size.unwrap_or_default(),
            filename,
            created_at: timestamp(created_at.as_deref()),
        })
    }
}

impl From<&e::photo::Photo> for NewPhoto {
    fn from(from: &e::photo::Photo) -> Self {
        Self {
            place_id: from.place_id.to_string(),
            url: from.url.to_string(),
            file_size: from.file_size,
            filename: from.filename.clone(),
        }
    }
}
