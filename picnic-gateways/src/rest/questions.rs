use picnic_boundary as json;
use picnic_core::{entities::*, repositories::QuestionRepo};
use reqwest::Method;

use super::*;

const QUESTIONS: &str = "questions";
const ANSWERS: &str = "answers";
const QUESTIONS_VIEW: &str = "questions_with_users";

const SELECT_WITH_ANSWERS: &str = "*,answers:answers_with_users(*)";

impl QuestionRepo for RestStore {
    fn create_question(&self, question: Question) -> Result<Question> {
        let req = self
            .table(Method::POST, QUESTIONS)
            .json(&json::NewQuestion::from(&question));
        let created: json::Question = self.fetch_one(req)?;
        let mut created = Question::from(created);
        if created.author_nickname.is_none() {
            created.author_nickname = question.author_nickname;
        }
        Ok(created)
    }

    fn create_answer(&self, answer: Answer) -> Result<Answer> {
        let req = self
            .table(Method::POST, ANSWERS)
            .json(&json::NewAnswer::from(&answer));
        let created: json::Answer = self.fetch_one(req)?;
        let mut created = Answer::from(created);
        if created.author_nickname.is_none() {
            created.author_nickname = answer.author_nickname;
        }
        Ok(created)
    }

    fn get_question(&self, id: &str) -> Result<Question> {
        let req = self
            .table(Method::GET, QUESTIONS)
            .query(&[("select", "*"), ("id", eq(id).as_str())]);
        let question: json::Question = self.fetch_one(req)?;
        Ok(question.into())
    }

    fn load_questions_with_answers_of_place(
        &self,
        place_id: &str,
    ) -> Result<Vec<QuestionWithAnswers>> {
        let req = self.table(Method::GET, QUESTIONS_VIEW).query(&[
            ("select", SELECT_WITH_ANSWERS.to_owned()),
            ("place_id", eq(place_id)),
            ("order", "created_at.desc".to_owned()),
        ]);
        let questions: Vec<json::QuestionWithAnswers> = self.fetch_all(req)?;
        Ok(questions.into_iter().map(Into::into).collect())
    }
}
