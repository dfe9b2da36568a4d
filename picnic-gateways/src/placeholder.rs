//! Literal sample data for running without a configured backend.
//!
//! Nothing is persisted: created records are echoed back
//! with a fresh id and deletions always succeed.

use anyhow::anyhow;
use picnic_core::{
    entities::*,
    gateways::photo_storage::PhotoStorage,
    repositories::{Error as RepoError, *},
};

type Result<T> = std::result::Result<T, RepoError>;

pub const DEV_USER_ID: &str = "dev-user";

// Not a sample place, so it resolves to the test place of the dev user
const DEV_PLACE_ID: &str = "dev-place";

const PLACEHOLDER_BASE_URL: &str = "https://placeholder.invalid/storage/v1/object/public/photos";

#[derive(Debug, Default, Clone)]
pub struct PlaceholderStore;

fn dev_id(prefix: &str) -> Id {
    format!("{prefix}-{}", Timestamp::now().as_millis()).into()
}

#[allow(clippy::too_many_arguments)]
fn sample_place(
    id: &str,
    title: &str,
    description: &str,
    view_type: &str,
    lat: f64,
    lng: f64,
    amenities: Amenities,
    owner: &str,
) -> Place {
    let now = Timestamp::now();
    Place {
        id: id.into(),
        title: title.into(),
        description: Some(description.into()),
        view_type: Some(view_type.into()),
        pos: MapPoint::from_lat_lng_deg(lat, lng),
        amenities,
        owner: owner.into(),
        created_at: now,
        updated_at: now,
    }
}

/// The sample places in Lyon.
pub fn sample_places() -> Vec<Place> {
    vec![
        sample_place(
            "1",
            "Parc de la Tête d'Or",
            "Magnifique parc avec lac et jardins",
            "Parc",
            45.7772,
            4.8559,
            Amenities {
                good_for_date: true,
                shade: true,
                flowers: true,
                parking: true,
                toilets: true,
                quiet: true,
            },
            "test-user-1",
        ),
        sample_place(
            "2",
            "Bords de Saône",
            "Promenade agréable le long de la rivière",
            "Rivière",
            45.7589,
            4.8417,
            Amenities {
                quiet: true,
                ..Default::default()
            },
            "test-user-2",
        ),
        sample_place(
            "3",
            "Jardin des Plantes",
            "Jardin botanique avec serres",
            "Jardin",
            45.7600,
            4.8500,
            Amenities {
                good_for_date: true,
                shade: true,
                flowers: true,
                toilets: true,
                ..Default::default()
            },
            "test-user-3",
        ),
        sample_place(
            "4",
            "Place Bellecour",
            "Grande place centrale",
            "Place",
            45.7578,
            4.8320,
            Amenities {
                parking: true,
                ..Default::default()
            },
            "test-user-4",
        ),
    ]
}

impl PlaceRepo for PlaceholderStore {
    fn get_place(&self, id: &str) -> Result<Place> {
        log::warn!("Backend not configured, returning sample data");
        if let Some(place) = sample_places().into_iter().find(|p| p.id.as_str() == id) {
            return Ok(place);
        }
        Ok(sample_place(
            id,
            "Lieu de test",
            "Configurez le backend pour utiliser de vraies données",
            "Test",
            45.7772,
            4.8559,
            Amenities::default(),
            DEV_USER_ID,
        ))
    }

    fn all_places(&self) -> Result<Vec<Place>> {
        log::warn!("Backend not configured, returning sample data");
        Ok(sample_places())
    }

    fn create_place(&self, mut place: Place) -> Result<Place> {
        log::warn!("Backend not configured, the new place will not be stored");
        place.id = dev_id("dev");
        Ok(place)
    }

    fn update_place(&self, place: &Place) -> Result<Place> {
        log::warn!("Backend not configured, the changes will not be stored");
        Ok(place.clone())
    }

    fn delete_place(&self, id: &str) -> Result<()> {
        log::warn!("Backend not configured, place {id} will not be deleted");
        Ok(())
    }
}

impl UserRepo for PlaceholderStore {
    fn upsert_user_by_device_id(&self, device_id: &str) -> Result<User> {
        Ok(User {
            id: DEV_USER_ID.into(),
            device_id: device_id.to_owned(),
            nickname: None,
        })
    }

    fn update_nickname(&self, user_id: &str, nickname: &str) -> Result<User> {
        log::warn!("Backend not configured, the nickname will not be stored");
        Ok(User {
            id: user_id.into(),
            device_id: picnic_core::usecases::UNKNOWN_DEVICE_ID.to_owned(),
            nickname: Some(nickname.to_owned()),
        })
    }
}

impl ReviewRepo for PlaceholderStore {
    fn create_review(&self, mut review: Review) -> Result<Review> {
        review.id = dev_id("rev");
        Ok(review)
    }

    fn load_reviews_of_place(&self, place_id: &str) -> Result<Vec<Review>> {
        Ok(vec![Review {
            id: "r1".into(),
            place_id: place_id.into(),
            author: "u1".into(),
            author_nickname: Some("Alice".into()),
            rating: RatingValue::new(4),
            text: "Super coin calme au bord de l'eau".into(),
            created_at: Timestamp::now(),
        }])
    }
}

fn sample_question(id: &str, place_id: &str) -> Question {
    Question {
        id: id.into(),
        place_id: place_id.into(),
        author: "u2".into(),
        author_nickname: Some("Bob".into()),
        text: "Y a-t-il de l'ombre ?".into(),
        created_at: Timestamp::now(),
    }
}

impl QuestionRepo for PlaceholderStore {
    fn create_question(&self, mut question: Question) -> Result<Question> {
        question.id = dev_id("q");
        Ok(question)
    }

    fn create_answer(&self, mut answer: Answer) -> Result<Answer> {
        answer.id = dev_id("a");
        Ok(answer)
    }

    fn get_question(&self, id: &str) -> Result<Question> {
        Ok(sample_question(id, "1"))
    }

    fn load_questions_with_answers_of_place(
        &self,
        place_id: &str,
    ) -> Result<Vec<QuestionWithAnswers>> {
        Ok(vec![QuestionWithAnswers {
            question: sample_question("q1", place_id),
            answers: vec![Answer {
                id: "a1".into(),
                question_id: "q1".into(),
                author: "u3".into(),
                author_nickname: Some("Clara".into()),
                text: "Oui, surtout en fin d'après-midi".into(),
                created_at: Timestamp::now(),
            }],
        }])
    }
}

impl PhotoRepo for PlaceholderStore {
    fn create_photo(&self, mut photo: Photo) -> Result<Photo> {
        photo.id = dev_id("photo");
        Ok(photo)
    }

    fn get_photo(&self, id: &str) -> Result<Photo> {
        let filename = "0-sample.jpg";
        let url = format!("{PLACEHOLDER_BASE_URL}/{DEV_PLACE_ID}/{filename}")
            .parse()
            .map_err(|err| RepoError::Other(anyhow!("Invalid photo URL: {err}")))?;
        Ok(Photo {
            id: id.into(),
            place_id: DEV_PLACE_ID.into(),
            url,
            file_size: 0,
            filename: filename.to_owned(),
            created_at: Timestamp::now(),
        })
    }

    fn load_photos_of_place(&self, _place_id: &str) -> Result<Vec<Photo>> {
        Ok(vec![])
    }

    fn delete_photo(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

impl PhotoStorage for PlaceholderStore {
    fn upload(&self, path: &str, _content: &[u8], _content_type: &str) -> anyhow::Result<Url> {
        log::warn!("Backend not configured, the photo will not be stored");
        format!("{PLACEHOLDER_BASE_URL}/{path}")
            .parse()
            .map_err(|err| anyhow!("Invalid photo path {path}: {err}"))
    }

    fn remove(&self, _path: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
