use crate::{id::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id              : Id,
    pub place_id        : Id,
    pub author          : Id,
    pub author_nickname : Option<String>,
    pub text            : String,
    pub created_at      : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id              : Id,
    pub question_id     : Id,
    pub author          : Id,
    pub author_nickname : Option<String>,
    pub text            : String,
    pub created_at      : Timestamp,
}

/// A question together with all of its answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

impl QuestionWithAnswers {
    /// A question is pending until it has been answered.
    pub fn is_pending(&self) -> bool {
        self.answers.is_empty()
    }
}
