// ── Core identity types ──
//
// EntityId is the server-assigned identifier (Mongo `_id` on the wire).
// EntryKey additionally covers optimistic entries that have no server id yet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ── EntityId ────────────────────────────────────────────────────────

/// Canonical identifier for any resource entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// A fresh random identifier, for locally-held entities.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── EntryKey ────────────────────────────────────────────────────────

/// Key of one entry in a cached collection.
///
/// `Server` entries carry the backend identifier. `Local` entries are
/// optimistic placeholders (or server entities that came back without an
/// id) and are keyed by a client-side UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Server(EntityId),
    Local(Uuid),
}

impl EntryKey {
    pub fn local() -> Self {
        Self::Local(Uuid::new_v4())
    }

    /// Key for an entity as returned by the server.
    pub fn for_id(id: Option<&str>) -> Self {
        id.filter(|s| !s.is_empty())
            .map_or_else(Self::local, |s| Self::Server(EntityId::from(s)))
    }

    pub fn as_server(&self) -> Option<&EntityId> {
        match self {
            Self::Server(id) => Some(id),
            Self::Local(_) => None,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(id) => write!(f, "{id}"),
            Self::Local(u) => write!(f, "local:{u}"),
        }
    }
}
