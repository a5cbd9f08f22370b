//! Common ID Types
//!
//! Type-safe wrappers around database-assigned `BIGSERIAL` identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// Generic typed ID wrapper
///
/// IDs are assigned by the store at insertion time, so there is no
/// constructor that invents a fresh value.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::from_i64(7);
/// assert_eq!(id.as_i64(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw database identifier
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying value
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would needlessly bound `T`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::from_i64)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_i64)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Feature IDs
    pub struct Feature;

    /// Marker for Vote IDs
    pub struct Vote;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type FeatureId = Id<markers::Feature>;
pub type VoteId = Id<markers::Vote>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let user_id = UserId::from_i64(1);
        let feature_id = FeatureId::from_i64(1);

        // Same raw value, different types; only the raw values compare
        assert_eq!(user_id.as_i64(), feature_id.as_i64());
    }

    #[test]
    fn test_id_parse() {
        let id: FeatureId = "42".parse().unwrap();
        assert_eq!(id, FeatureId::from_i64(42));
        assert!("abc".parse::<FeatureId>().is_err());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = VoteId::from_i64(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");

        let back: VoteId = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_ordering() {
        assert!(FeatureId::from_i64(1) < FeatureId::from_i64(2));
    }
}
