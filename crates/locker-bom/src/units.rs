//! Fixed-point amounts (thousandths).

use serde::{Deserialize, Serialize, Serializer};

use crate::BomError;

const SCALE: u64 = 1000;

/// A non-negative amount with three decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "f64")]
pub struct Units(u64);

impl Units {
    /// Zero.
    pub const ZERO: Units = Units(0);

    /// A whole number of units.
    pub fn whole(n: u64) -> Self {
        Self(n.saturating_mul(SCALE))
    }

    /// From a decimal, rounded to the nearest thousandth.
    pub fn from_decimal(value: f64) -> Result<Self, BomError> {
        if !value.is_finite() || value < 0.0 {
            return Err(BomError::InvalidAmount(value));
        }
        let scaled = (value * SCALE as f64).round();
        if scaled > u64::MAX as f64 {
            return Err(BomError::InvalidAmount(value));
        }
        Ok(Self(scaled as u64))
    }

    /// Raw thousandths.
    pub fn thousandths(&self) -> u64 {
        self.0
    }

    /// As a float, for display and JSON.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Whether the amount has no fractional part.
    pub fn is_whole(&self) -> bool {
        self.0 % SCALE == 0
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a count, saturating.
    pub fn times(&self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Add, saturating.
    pub fn plus(&self, other: Units) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract, floored at zero.
    pub fn minus(&self, other: Units) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl TryFrom<f64> for Units {
    type Error = BomError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Units::from_decimal(value)
    }
}

impl Serialize for Units {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_u64(self.0 / SCALE)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}
