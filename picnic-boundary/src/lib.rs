//! Records as they are stored in the remote tables.
//!
//! Field names follow the column names of the tables and views.

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id               : String,
    pub title            : String,
    #[serde(default)]
    pub description      : Option<String>,
    #[serde(default)]
    pub view_type        : Option<String>,
    #[serde(default)]
    pub latitude         : Option<f64>,
    #[serde(default)]
    pub longitude        : Option<f64>,
    #[serde(default)]
    pub is_good_for_date : Option<bool>,
    #[serde(default)]
    pub has_shade        : Option<bool>,
    #[serde(default)]
    pub has_flowers      : Option<bool>,
    #[serde(default)]
    pub has_parking      : Option<bool>,
    #[serde(default)]
    pub has_toilets      : Option<bool>,
    #[serde(default)]
    pub is_quiet         : Option<bool>,
    #[serde(default)]
    pub user_id          : Option<String>,
    #[serde(default)]
    pub created_at       : Option<String>,
    #[serde(default)]
    pub updated_at       : Option<String>,
}

/// The columns of a place that are written by the client.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceData {
    pub title            : String,
    pub description      : Option<String>,
    pub view_type        : Option<String>,
    pub latitude         : f64,
    pub longitude        : f64,
    pub is_good_for_date : bool,
    pub has_shade        : bool,
    pub has_flowers      : bool,
    pub has_parking      : bool,
    pub has_toilets      : bool,
    pub is_quiet         : bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id          : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at       : Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub device_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicknameUpdate {
    pub nickname: String,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id            : String,
    pub place_id      : String,
    #[serde(default)]
    pub user_id       : Option<String>,
    #[serde(default)]
    pub user_nickname : Option<String>,
    pub rating        : i64,
    pub text          : String,
    #[serde(default)]
    pub created_at    : Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub place_id : String,
    pub user_id  : String,
    pub rating   : u8,
    pub text     : String,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id            : String,
    pub place_id      : String,
    #[serde(default)]
    pub user_id       : Option<String>,
    #[serde(default)]
    pub user_nickname : Option<String>,
    pub text          : String,
    #[serde(default)]
    pub created_at    : Option<String>,
}

/// A row of the questions view with its embedded answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    #[serde(flatten)]
    pub question: Question,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id            : String,
    pub question_id   : String,
    #[serde(default)]
    pub user_id       : Option<String>,
    #[serde(default)]
    pub user_nickname : Option<String>,
    pub text          : String,
    #[serde(default)]
    pub created_at    : Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnswer {
    pub question_id: String,
    pub user_id: String,
    pub text: String,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id         : String,
    pub place_id   : String,
    pub url        : String,
    #[serde(default)]
    pub file_size  : Option<u64>,
    #[serde(default)]
    pub filename   : Option<String>,
    #[serde(default)]
    pub created_at : Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPhoto {
    pub place_id  : String,
    pub url       : String,
    pub file_size : u64,
    pub filename  : String,
}

/// Error body of the REST interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}
