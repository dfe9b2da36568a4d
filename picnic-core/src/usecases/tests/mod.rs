use std::{cell::RefCell, collections::HashMap};

use anyhow::anyhow;

use super::prelude::*;
use crate::gateways::{
    device::DeviceIdentity, geocode::GeoCodingGateway, key_value::KeyValueStore,
    photo_storage::PhotoStorage,
};

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Key {
    fn key(&self) -> &Id;
}

macro_rules! impl_key {
    ($($t:ty),*) => {
        $(impl Key for $t {
            fn key(&self) -> &Id {
                &self.id
            }
        })*
    };
}

impl_key!(Place, User, Review, Question, Answer, Photo);

fn get<T: Key + Clone>(objects: &[T], id: &str) -> RepoResult<T> {
    objects
        .iter()
        .find(|x| x.key().as_str() == id)
        .cloned()
        .ok_or(RepoError::NotFound)
}

fn assign_id<T: Key>(obj: &T) -> Id {
    if obj.key().is_valid() {
        obj.key().clone()
    } else {
        Id::new()
    }
}

fn newest_first<T, F: Fn(&T) -> Timestamp>(mut objects: Vec<T>, created_at: F) -> Vec<T> {
    objects.sort_by_key(|x| std::cmp::Reverse(created_at(x)));
    objects
}

#[derive(Default)]
pub struct MockDb {
    pub places: RefCell<Vec<Place>>,
    pub users: RefCell<Vec<User>>,
    pub reviews: RefCell<Vec<Review>>,
    pub questions: RefCell<Vec<Question>>,
    pub answers: RefCell<Vec<Answer>>,
    pub photos: RefCell<Vec<Photo>>,
}

impl PlaceRepo for MockDb {
    fn get_place(&self, id: &str) -> RepoResult<Place> {
        get(&self.places.borrow(), id)
    }

    fn all_places(&self) -> RepoResult<Vec<Place>> {
        Ok(newest_first(self.places.borrow().clone(), |p| p.created_at))
    }

    fn create_place(&self, mut place: Place) -> RepoResult<Place> {
        place.id = assign_id(&place);
        if self.get_place(place.id.as_str()).is_ok() {
            return Err(RepoError::AlreadyExists);
        }
        self.places.borrow_mut().push(place.clone());
        Ok(place)
    }

    fn update_place(&self, place: &Place) -> RepoResult<Place> {
        let mut places = self.places.borrow_mut();
        let stored = places
            .iter_mut()
            .find(|p| p.id == place.id)
            .ok_or(RepoError::NotFound)?;
        *stored = place.clone();
        Ok(place.clone())
    }

    fn delete_place(&self, id: &str) -> RepoResult<()> {
        let mut places = self.places.borrow_mut();
        let len = places.len();
        places.retain(|p| p.id.as_str() != id);
        if places.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

impl UserRepo for MockDb {
    fn upsert_user_by_device_id(&self, device_id: &str) -> RepoResult<User> {
        let mut users = self.users.borrow_mut();
        if let Some(user) = users.iter().find(|u| u.device_id == device_id) {
            return Ok(user.clone());
        }
        let user = User {
            id: Id::new(),
            device_id: device_id.to_owned(),
            nickname: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    fn update_nickname(&self, user_id: &str, nickname: &str) -> RepoResult<User> {
        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|u| u.id.as_str() == user_id)
            .ok_or(RepoError::NotFound)?;
        user.nickname = Some(nickname.to_owned());
        Ok(user.clone())
    }
}

impl ReviewRepo for MockDb {
    fn create_review(&self, mut review: Review) -> RepoResult<Review> {
        review.id = assign_id(&review);
        self.reviews.borrow_mut().push(review.clone());
        Ok(review)
    }

    fn load_reviews_of_place(&self, place_id: &str) -> RepoResult<Vec<Review>> {
        let reviews = self
            .reviews
            .borrow()
            .iter()
            .filter(|r| r.place_id.as_str() == place_id)
            .cloned()
            .collect();
        Ok(newest_first(reviews, |r| r.created_at))
    }
}

impl QuestionRepo for MockDb {
    fn create_question(&self, mut question: Question) -> RepoResult<Question> {
        question.id = assign_id(&question);
        self.questions.borrow_mut().push(question.clone());
        Ok(question)
    }

    fn create_answer(&self, mut answer: Answer) -> RepoResult<Answer> {
        answer.id = assign_id(&answer);
        self.answers.borrow_mut().push(answer.clone());
        Ok(answer)
    }

    fn get_question(&self, id: &str) -> RepoResult<Question> {
        get(&self.questions.borrow(), id)
    }

    fn load_questions_with_answers_of_place(
        &self,
        place_id: &str,
    ) -> RepoResult<Vec<QuestionWithAnswers>> {
        let answers = self.answers.borrow();
        let questions = self
            .questions
            .borrow()
            .iter()
            .filter(|q| q.place_id.as_str() == place_id)
            .map(|q| QuestionWithAnswers {
                question: q.clone(),
                answers: answers
                    .iter()
                    .filter(|a| a.question_id == q.id)
                    .cloned()
                    .collect(),
            })
            .collect();
        Ok(newest_first(questions, |q| q.question.created_at))
    }
}

impl PhotoRepo for MockDb {
    fn create_photo(&self, mut photo: Photo) -> RepoResult<Photo> {
        photo.id = assign_id(&photo);
        self.photos.borrow_mut().push(photo.clone());
        Ok(photo)
    }

    fn get_photo(&self, id: &str) -> RepoResult<Photo> {
        get(&self.photos.borrow(), id)
    }

    fn load_photos_of_place(&self, place_id: &str) -> RepoResult<Vec<Photo>> {
        let photos = self
            .photos
            .borrow()
            .iter()
            .filter(|p| p.place_id.as_str() == place_id)
            .cloned()
            .collect();
        Ok(newest_first(photos, |p| p.created_at))
    }

    fn delete_photo(&self, id: &str) -> RepoResult<()> {
        let mut photos = self.photos.borrow_mut();
        let len = photos.len();
        photos.retain(|p| p.id.as_str() != id);
        if photos.len() == len {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPhotoStorage {
    pub objects: RefCell<HashMap<String, Vec<u8>>>,
    pub fail: bool,
}

impl PhotoStorage for MockPhotoStorage {
    fn upload(&self, path: &str, content: &[u8], _content_type: &str) -> anyhow::Result<Url> {
        if self.fail {
            return Err(anyhow!("Storage unavailable"));
        }
        self.objects
            .borrow_mut()
            .insert(path.to_owned(), content.to_vec());
        Ok(format!("https://storage.test/object/public/photos/{path}").parse()?)
    }

    fn remove(&self, path: &str) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow!("Storage unavailable"));
        }
        self.objects
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| anyhow!("No such object: {path}"))
    }
}

#[derive(Default)]
pub struct MockKeyValueStore(RefCell<HashMap<String, String>>);

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct MockDevice(pub Option<String>);

impl DeviceIdentity for MockDevice {
    fn device_id(&self) -> Option<String> {
        self.0.clone()
    }
}

pub struct MockGeocoder(pub Vec<MapPoint>);

impl GeoCodingGateway for MockGeocoder {
    fn resolve_address(&self, _query: &str) -> Vec<MapPoint> {
        self.0.clone()
    }
}
