//! Adapters that connect the use cases with the outside world.

pub mod device;
pub mod key_value;
pub mod opencage;
pub mod placeholder;
pub mod rest;
