mod create_new_place;
mod delete_place;
mod error;
mod filter_places;
mod identity;
mod load_places;
mod photos;
mod questions;
mod rate_place;
mod search_location;
mod update_place;

#[cfg(test)]
pub mod tests;

pub use self::{
    create_new_place::*, delete_place::*, error::Error, filter_places::*, identity::*,
    load_places::*, photos::*, questions::*, rate_place::*, search_location::*, update_place::*,
};

mod prelude {
    pub use super::error::Error;
    #[cfg(test)]
    pub use crate::repositories::Error as RepoError;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        repositories::*,
        util::validate::{AutoCorrect, Validate},
    };
}
