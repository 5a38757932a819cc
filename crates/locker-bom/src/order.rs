//! # Build Order
//!
//! Blueprint name → requested quantity. Quantities are clamped into
//! `0..=u32::MAX` on entry; a zero quantity removes the line, so the order
//! only ever holds blueprints that are actually wanted.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BomError;

/// Requested quantities keyed by blueprint name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildOrder {
    lines: BTreeMap<String, u32>,
}

impl BuildOrder {
    /// An empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for a blueprint, clamping negatives to zero.
    ///
    /// Returns the quantity actually stored. The name is not checked
    /// against any catalog; unknown names contribute nothing to the bill.
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> u32 {
        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if clamped == 0 {
            self.lines.remove(name);
        } else {
            self.lines.insert(name.to_string(), clamped);
        }
        clamped
    }

    /// Requested quantity, zero when absent.
    pub fn quantity(&self, name: &str) -> u32 {
        self.lines.get(name).copied().unwrap_or(0)
    }

    /// Non-zero lines in name order.
    pub fn lines(&self) -> impl Iterator<Item = (&str, u32)> {
        self.lines.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Whether nothing is ordered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl FromIterator<OrderLine> for BuildOrder {
    fn from_iter<I: IntoIterator<Item = OrderLine>>(iter: I) -> Self {
        let mut order = BuildOrder::new();
        for line in iter {
            order.set_quantity(&line.blueprint, line.quantity);
        }
        order
    }
}

/// A `NAME=QUANTITY` pair as typed on a command line.
///
/// Later lines for the same blueprint overwrite earlier ones when collected
/// into a [`BuildOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Blueprint name, trimmed.
    pub blueprint: String,
    /// Requested quantity as typed; clamped when applied to an order.
    pub quantity: i64,
}

impl FromStr for OrderLine {
    type Err = BomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, qty) = s
            .rsplit_once('=')
            .ok_or_else(|| BomError::InvalidOrderLine(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(BomError::InvalidOrderLine(s.to_string()));
        }
        let quantity = qty
            .trim()
            .parse::<i64>()
            .map_err(|_| BomError::InvalidOrderLine(s.to_string()))?;
        Ok(Self {
            blueprint: name.to_string(),
            quantity,
        })
    }
}
