//! # picnic-core
//!
//! Use cases and the ports (repositories and gateways) they depend on.

pub mod gateways;
pub mod rating;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use picnic_entities::{
        geo::*, id::*, photo::*, place::*, question::*, review::*, time::*, url::Url, user::*,
    };
}
