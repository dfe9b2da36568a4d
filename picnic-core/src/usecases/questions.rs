use super::prelude::*;

pub fn ask_question<R>(repo: &R, author: &User, place_id: &str, text: &str) -> Result<Question>
where
    R: PlaceRepo + QuestionRepo,
{
    let question = Question {
        id: Id::default(),
        place_id: place_id.into(),
        author: author.id.clone(),
        author_nickname: author.nickname.clone(),
        text: text.trim().to_owned(),
        created_at: Timestamp::now(),
    };
    question.validate()?;
    repo.get_place(place_id)?;
    Ok(repo.create_question(question)?)
}

pub fn answer_question<R: QuestionRepo>(
    repo: &R,
    author: &User,
    question_id: &str,
    text: &str,
) -> Result<Answer> {
    let answer = Answer {
        id: Id::default(),
        question_id: question_id.into(),
        author: author.id.clone(),
        author_nickname: author.nickname.clone(),
        text: text.trim().to_owned(),
        created_at: Timestamp::now(),
    };
    answer.validate()?;
    repo.get_question(question_id)?;
    Ok(repo.create_answer(answer)?)
}

/// Newest questions first, each with its answers.
pub fn load_questions_with_answers<R: QuestionRepo>(
    repo: &R,
    place_id: &str,
) -> Result<Vec<QuestionWithAnswers>> {
    Ok(repo.load_questions_with_answers_of_place(place_id)?)
}

pub fn pending_questions(questions: Vec<QuestionWithAnswers>) -> Vec<QuestionWithAnswers> {
    questions.into_iter().filter(|q| q.is_pending()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::MockDb;
    use picnic_entities::builders::*;

    fn user(id: &str, nickname: Option<&str>) -> User {
        User {
            id: id.into(),
            device_id: format!("device-{id}"),
            nickname: nickname.map(Into::into),
        }
    }

    #[test]
    fn ask_and_answer() {
        let db = MockDb::default();
        db.places.borrow_mut().push(Place::build().id("1").finish());
        let bob = user("u2", Some("Bob"));
        let clara = user("u3", Some("Clara"));

        let q = ask_question(&db, &bob, "1", " Y a-t-il de l'ombre ? ").unwrap();
        assert_eq!(q.text, "Y a-t-il de l'ombre ?");
        assert_eq!(q.author_nickname.as_deref(), Some("Bob"));

        let questions = load_questions_with_answers(&db, "1").unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].is_pending());
        assert_eq!(pending_questions(questions).len(), 1);

        let a = answer_question(&db, &clara, q.id.as_str(), "Oui, surtout en fin d'après-midi")
            .unwrap();
        assert_eq!(a.question_id, q.id);

        let questions = load_questions_with_answers(&db, "1").unwrap();
        assert_eq!(questions[0].answers, vec![a]);
        assert!(pending_questions(questions).is_empty());
    }

    #[test]
    fn reject_empty_texts() {
        let db = MockDb::default();
        db.places.borrow_mut().push(Place::build().id("1").finish());
        let bob = user("u2", None);
        assert!(matches!(
            ask_question(&db, &bob, "1", "  "),
            Err(Error::EmptyText)
        ));
        let q = ask_question(&db, &bob, "1", "Parking ?").unwrap();
        assert!(matches!(
            answer_question(&db, &bob, q.id.as_str(), ""),
            Err(Error::EmptyText)
        ));
    }

    #[test]
    fn reject_unknown_references() {
        let db = MockDb::default();
        let bob = user("u2", None);
        assert!(matches!(
            ask_question(&db, &bob, "1", "Parking ?"),
            Err(Error::Repo(RepoError::NotFound))
        ));
        assert!(matches!(
            answer_question(&db, &bob, "q-unknown", "Oui"),
            Err(Error::Repo(RepoError::NotFound))
        ));
        assert!(db.questions.borrow().is_empty());
        assert!(db.answers.borrow().is_empty());
    }
}
