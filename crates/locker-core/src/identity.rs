//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the facility's identifiers. A `LockerId` cannot be
//! passed where a `MemberId` is expected, even though both are integers.

use serde::{Deserialize, Serialize};

use crate::error::FacilityError;

/// Identifier of a physical locker compartment. Positive and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockerId(pub u32);

/// Courier-assigned tracking code of a parcel (e.g. `AMZ-834J`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParcelId(String);

/// Identifier of a family member on the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl LockerId {
    /// The numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl MemberId {
    /// The numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl ParcelId {
    /// Create a tracking code. Surrounding whitespace is trimmed; an empty
    /// code is rejected.
    pub fn new(code: impl Into<String>) -> Result<Self, FacilityError> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(FacilityError::Validation(
                "parcel id must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the tracking code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParcelId {
    type Error = FacilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ParcelId::new(value)
    }
}

impl From<ParcelId> for String {
    fn from(id: ParcelId) -> Self {
        id.0
    }
}

impl std::fmt::Display for LockerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_id_trims() {
        let id = ParcelId::new("  AMZ-834J ").unwrap();
        assert_eq!(id.as_str(), "AMZ-834J");
    }

    #[test]
    fn test_parcel_id_rejects_blank() {
        assert!(ParcelId::new("   ").is_err());
        assert!(serde_json::from_str::<ParcelId>("\"\"").is_err());
    }

    #[test]
    fn test_member_id_next() {
        assert_eq!(MemberId(2).next(), MemberId(3));
        assert_eq!(MemberId(u64::MAX).next(), MemberId(u64::MAX));
    }

    #[test]
    fn test_locker_id_serde_transparent() {
        let json = serde_json::to_string(&LockerId(7)).unwrap();
        assert_eq!(json, "7");
        let back: LockerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LockerId(7));
    }
}
