//! Plain text rendering of places and their discussions.

use std::fmt::Write;

use itertools::Itertools;
use picnic_core::{entities::*, usecases::OwnPlace};
use strum::IntoEnumIterator;

const NO_DESCRIPTION: &str = "(no description)";

pub fn amenity_list(place: &Place) -> String {
    Amenity::iter().filter(|a| place.has(*a)).join(", ")
}

pub fn rating(avg: Option<AvgRatingValue>) -> String {
    match avg {
        Some(avg) => format!("{:.1}/5", f64::from(avg)),
        None => "unrated".to_owned(),
    }
}

/// `avg` is `None` if the ratings have not been loaded.
pub fn place_line(
    place: &Place,
    avg: Option<Option<AvgRatingValue>>,
    distance: Option<Distance>,
) -> String {
    let mut line = format!("[{}] {}", place.id, place.title);
    if let Some(view_type) = place.view_type.as_deref().filter(|v| !v.trim().is_empty()) {
        let _ = write!(line, " ({view_type})");
    }
    if let Some(avg) = avg {
        let _ = write!(line, " | {}", rating(avg));
    }
    if let Some(distance) = distance {
        let _ = write!(line, " | {distance}");
    }
    let amenities = amenity_list(place);
    if !amenities.is_empty() {
        let _ = write!(line, " | {amenities}");
    }
    line
}

pub fn place_details(place: &Place, avg: Option<AvgRatingValue>) -> String {
    let (lat, lng) = place.pos.to_lat_lng_deg();
    let mut out = String::new();
    let _ = writeln!(out, "{}", place.title);
    let _ = writeln!(out, "  id:          {}", place.id);
    let _ = writeln!(
        out,
        "  description: {}",
        place.description.as_deref().unwrap_or(NO_DESCRIPTION)
    );
    if let Some(view_type) = &place.view_type {
        let _ = writeln!(out, "  view:        {view_type}");
    }
    if place.pos.is_valid() {
        let _ = writeln!(out, "  position:    {lat:.5},{lng:.5}");
    } else {
        let _ = writeln!(out, "  position:    invalid");
    }
    let _ = writeln!(out, "  amenities:   {}", amenity_list(place));
    let _ = writeln!(out, "  rating:      {}", rating(avg));
    let _ = write!(out, "  created:     {}", place.created_at);
    out
}

fn author(nickname: Option<&str>) -> &str {
    nickname.filter(|n| !n.trim().is_empty()).unwrap_or("Anonymous")
}

pub fn review_line(review: &Review) -> String {
    let stars = u8::from(review.rating) as usize;
    format!(
        "{}{} {} ({}): {}",
        "*".repeat(stars),
        ".".repeat(5_usize.saturating_sub(stars)),
        author(review.author_nickname.as_deref()),
        review.created_at,
        review.text
    )
}

pub fn question_block(qwa: &QuestionWithAnswers) -> String {
    let QuestionWithAnswers { question, answers } = qwa;
    let mut out = format!(
        "[{}] {} asks: {}",
        question.id,
        author(question.author_nickname.as_deref()),
        question.text
    );
    if answers.is_empty() {
        out.push_str("\n    (no answers yet)");
    }
    for a in answers {
        let _ = write!(
            out,
            "\n    {} answers: {}",
            author(a.author_nickname.as_deref()),
            a.text
        );
    }
    out
}

pub fn photo_line(photo: &Photo) -> String {
    format!(
        "[{}] {} ({} bytes) {}",
        photo.id, photo.filename, photo.file_size, photo.url
    )
}

pub fn own_place(own: &OwnPlace) -> String {
    let OwnPlace {
        place,
        pending_questions,
    } = own;
    let mut out = format!("[{}] {}", place.id, place.title);
    match pending_questions.len() {
        0 => {}
        1 => out.push_str(" | 1 pending question"),
        n => {
            let _ = write!(out, " | {n} pending questions");
        }
    }
    for q in pending_questions {
        let _ = write!(out, "\n    [{}] {}", q.question.id, q.question.text);
    }
    out
}

pub fn user(user: &User) -> String {
    format!(
        "{} (id: {}, device: {})",
        user.display_name(),
        user.id,
        user.device_id
    )
}
