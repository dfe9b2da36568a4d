pub mod device;
pub mod geocode;
pub mod key_value;
pub mod photo_storage;
