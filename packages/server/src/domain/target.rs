//! Connection target resolution from the request path.

use super::value_object::RoomId;

/// What a new connection asks for, derived from its URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomTarget {
    /// Empty path: create a fresh room.
    Create,
    /// Single segment: attach to the room with this id.
    Attach(RoomId),
    /// Anything else. The connection is closed.
    Invalid,
}

impl RoomTarget {
    /// Parse a URL path such as `/`, `/abc` or `/abc/`.
    ///
    /// The leading `/` is skipped and one empty trailing segment is dropped.
    pub fn from_path(path: &str) -> Self {
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut segments: Vec<&str> = path.split('/').collect();
        if segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }

        match segments.as_slice() {
            [] => Self::Create,
            [segment] => match RoomId::new((*segment).to_string()) {
                Ok(room_id) => Self::Attach(room_id),
                Err(_) => Self::Invalid,
            },
            _ => Self::Invalid,
        }
    }
}
