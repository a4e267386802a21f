// ── Core identity type ──
//
// The platform API is inconsistent about identifiers: numeric ids on
// some resources, opaque strings on others. EntityId unifies both
// behind a single ergonomic interface; consumers never care which.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tenra_api::types::Id;

/// Canonical identifier for any cached entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl EntityId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The wire form of this id for API paths.
    pub(crate) fn to_wire(&self) -> Id {
        match self {
            Self::Int(n) => Id::Int(*n),
            Self::Str(s) => Id::Str(s.clone()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Str(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Id> for EntityId {
    fn from(id: Id) -> Self {
        match id {
            Id::Int(n) => Self::Int(n),
            Id::Str(s) => Self::Str(s),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_normalize_to_int() {
        assert_eq!(EntityId::from("42"), EntityId::Int(42));
        assert_eq!(EntityId::from("st-42"), EntityId::Str("st-42".into()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = EntityId::Str("ord-9f".into());
        assert_eq!(id.to_string().parse::<EntityId>().unwrap(), id);
    }
}
