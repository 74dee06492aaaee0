//! Household identifiers.
//!
//! Ids are built from random bytes the caller supplies, so a population
//! drawn from a seeded generator gets the same ids on every run.

use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Unique identifier for a simulated household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseholdId(pub Uuid);

impl HouseholdId {
    /// Build a random (version 4) id from 16 caller-supplied bytes.
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl core::fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_give_same_id() {
        let bytes = [7_u8; 16];
        assert_eq!(
            HouseholdId::from_random_bytes(bytes),
            HouseholdId::from_random_bytes(bytes)
        );
        assert_ne!(
            HouseholdId::from_random_bytes(bytes),
            HouseholdId::from_random_bytes([8_u8; 16])
        );
    }

    #[test]
    fn ids_are_version_4() {
        let id = HouseholdId::from_random_bytes([0xff; 16]);
        assert_eq!(id.into_inner().get_version_num(), 4);
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = HouseholdId::from_random_bytes([1_u8; 16]);
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn serializes_as_plain_uuid_string() {
        let id = HouseholdId::from_random_bytes([2_u8; 16]);
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json, Some(format!("\"{id}\"")));
    }
}
