//! # Closed Domain Enumerations
//!
//! `Feature` (locker capability tags) and `BillingPeriod` (plan cadence).
//! Every `match` on these is exhaustive, so adding a variant forces each
//! consumer to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FacilityError;

/// Capability tag of a locker compartment. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Heated compartment (hot food).
    Hot,
    /// Refrigerated compartment.
    Cold,
    /// UV sanitisation lamp.
    Uv,
}

impl Feature {
    /// All features in canonical order.
    pub fn all() -> &'static [Feature] {
        &[Self::Hot, Self::Cold, Self::Uv]
    }

    /// The snake_case identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::Uv => "uv",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hot => "Heated",
            Self::Cold => "Refrigerated",
            Self::Uv => "UV Sanitized",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = FacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Self::Hot),
            "cold" => Ok(Self::Cold),
            "uv" => Ok(Self::Uv),
            other => Err(FacilityError::Validation(format!(
                "unknown locker feature: {other:?}"
            ))),
        }
    }
}

/// Billing cadence of a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    /// One-day pass.
    Daily,
    /// Seven days.
    Weekly,
    /// One calendar month.
    Monthly,
    /// One year.
    Yearly,
}

impl BillingPeriod {
    /// All periods, shortest first.
    pub fn all() -> &'static [BillingPeriod] {
        &[Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly]
    }

    /// The snake_case identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Title-case label (`Monthly`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillingPeriod {
    type Err = FacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(FacilityError::Validation(format!(
                "unknown billing period: {other:?}"
            ))),
        }
    }
}
