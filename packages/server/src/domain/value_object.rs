//! Value objects: identifiers for rooms and clients.

use std::fmt;

use serde::{Deserialize, Serialize};
use sigroom_shared::random::random_id;

use super::error::ValueObjectError;

/// Validate an identifier taken from the outside world (URL path, JSON).
///
/// Identifiers are a single path segment, so they can be neither empty nor
/// contain `/`.
fn validate_id(kind: &'static str, value: &str) -> Result<(), ValueObjectError> {
    if value.is_empty() {
        return Err(ValueObjectError::Empty(kind));
    }
    if value.contains('/') {
        return Err(ValueObjectError::InvalidCharacter {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Room の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_id("RoomId", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続（クライアント）の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_id("ClientId", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates fresh room and client identifiers.
///
/// Uniqueness is not enforced here; callers that keep a map of live ids
/// re-draw on collision.
#[derive(Debug, Clone, Copy)]
pub struct IdFactory {
    length: usize,
}

impl IdFactory {
    /// `length` must be non-zero, a zero length falls back to one character.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn room_id(&self) -> RoomId {
        RoomId(random_id(self.length))
    }

    pub fn client_id(&self) -> ClientId {
        ClientId(random_id(self.length))
    }
}

impl Default for IdFactory {
    fn default() -> Self {
        Self::new(sigroom_shared::random::DEFAULT_ID_LENGTH)
    }
}
