//! Stable identifiers for arena-stored galaxy entities.
//!
//! Ownership and location are expressed as ids, never as references, so the
//! player → colony → planet → system graph carries no cycles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// A star system; index into `Galaxy::systems`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub u32);

/// A planet; index into `Galaxy::planets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetId(pub u32);

/// A natural-resource deposit, written `DP<n>` in orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepositId(pub u32);

/// A hull: either a colony (`C<n>`) or a ship (`S<n>`).
///
/// Colonies and ships are numbered independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HullId {
    Colony(u32),
    Ship(u32),
}

/// Error returned when an id string is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid id '{0}'")]
pub struct InvalidId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Display for DepositId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DP{}", self.0)
    }
}

impl fmt::Display for HullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullId::Colony(n) => write!(f, "C{}", n),
            HullId::Ship(n) => write!(f, "S{}", n),
        }
    }
}

/// Splits `<prefix><digits>`, matching the prefix case-insensitively.
fn numbered(s: &str, prefix: &str) -> Option<u32> {
    if s.len() <= prefix.len() || !s.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, digits) = s.split_at(prefix.len());
    if !head.eq_ignore_ascii_case(prefix) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for HullId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(n) = numbered(s, "C") {
            return Ok(HullId::Colony(n));
        }
        if let Some(n) = numbered(s, "S") {
            return Ok(HullId::Ship(n));
        }
        Err(InvalidId(s.to_string()))
    }
}

impl FromStr for DepositId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        numbered(s, "DP")
            .map(DepositId)
            .ok_or_else(|| InvalidId(s.to_string()))
    }
}

impl TryFrom<String> for HullId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HullId> for String {
    fn from(id: HullId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_id_display_roundtrip() {
        for id in [HullId::Colony(1), HullId::Ship(77), HullId::Colony(0)] {
            assert_eq!(id.to_string().parse::<HullId>(), Ok(id));
        }
    }

    #[test]
    fn hull_id_prefix_is_case_insensitive() {
        assert_eq!("c12".parse::<HullId>(), Ok(HullId::Colony(12)));
        assert_eq!("s3".parse::<HullId>(), Ok(HullId::Ship(3)));
    }

    #[test]
    fn hull_id_rejects_malformed() {
        assert!("C".parse::<HullId>().is_err());
        assert!("C1a".parse::<HullId>().is_err());
        assert!("X1".parse::<HullId>().is_err());
        assert!("DP1".parse::<HullId>().is_err());
        assert!("".parse::<HullId>().is_err());
    }

    #[test]
    fn deposit_id_parse() {
        assert_eq!("DP4".parse::<DepositId>(), Ok(DepositId(4)));
        assert_eq!("dp10".parse::<DepositId>(), Ok(DepositId(10)));
        assert!("D4".parse::<DepositId>().is_err());
        assert_eq!(DepositId(9).to_string(), "DP9");
    }

    #[test]
    fn hull_id_serializes_as_string() {
        let json = serde_json::to_string(&HullId::Ship(7)).unwrap();
        assert_eq!(json, "\"S7\"");
        let id: HullId = serde_json::from_str("\"C2\"").unwrap();
        assert_eq!(id, HullId::Colony(2));
        assert!(serde_json::from_str::<HullId>("\"Q2\"").is_err());
    }
}
