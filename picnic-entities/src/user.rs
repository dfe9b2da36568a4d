use crate::id::*;

/// A pseudo-account bound to a single device.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id        : Id,
    pub device_id : String,
    pub nickname  : Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Anonymous")
    }
}
