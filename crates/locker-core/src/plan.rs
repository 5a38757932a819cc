//! # Subscription Plans
//!
//! Static catalog entries. Plans are reference data: nothing at runtime
//! mutates them, and the member limits in their feature text are not
//! enforced anywhere.

use serde::{Deserialize, Serialize};

use crate::domain::BillingPeriod;
use crate::error::FacilityError;

/// One subscription offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Display name (`Daily Pass`, `Monthly`, ...).
    pub name: String,
    /// Billing cadence.
    pub billing_period: BillingPeriod,
    /// Price in whole currency units.
    pub price: u32,
    /// Parcel credits granted per period.
    pub credits_granted: u32,
    /// Marketing bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Display emphasis only.
    #[serde(default)]
    pub highlighted: bool,
}

impl Plan {
    /// Price per granted credit, rounded down. `None` for a plan that grants
    /// no credits.
    pub fn price_per_credit(&self) -> Option<u32> {
        self.price.checked_div(self.credits_granted)
    }

    /// Check the entry is usable as catalog data.
    pub fn validate(&self) -> Result<(), FacilityError> {
        if self.name.trim().is_empty() {
            return Err(FacilityError::Fixture("plan name must not be empty".to_string()));
        }
        Ok(())
    }
}
