use crate::{id::*, time::*, url::Url};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id         : Id,
    pub place_id   : Id,
    pub url        : Url,
    pub file_size  : u64,
    pub filename   : String,
    pub created_at : Timestamp,
}

impl Photo {
    /// The name of the stored object, i.e. the last segment of the URL path.
    pub fn object_name(&self) -> Option<&str> {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
    }
}
