//! # Requirement Aggregation
//!
//! For every ordered blueprint with quantity `q > 0`:
//!
//! ```text
//! required["Sheet Metal"] += sheet_metal_per_unit × q
//! required[c]             += count(c) × q      for each component c
//! ```
//!
//! Names missing from the catalog contribute nothing. The result is a pure
//! function of the order contents; iteration order never changes it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::blueprint::BlueprintCatalog;
use crate::order::BuildOrder;
use crate::units::Units;

/// Key under which aggregated sheet metal is reported.
pub const SHEET_METAL: &str = "Sheet Metal";

/// Aggregated requirements. Empty when nothing known was ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredBom {
    entries: BTreeMap<String, Units>,
}

impl RequiredBom {
    /// Requirement for one item, if any blueprint contributed it.
    pub fn get(&self, item: &str) -> Option<Units> {
        self.entries.get(item).copied()
    }

    /// Total sheet metal, if any blueprint was ordered.
    pub fn sheet_metal(&self) -> Option<Units> {
        self.get(SHEET_METAL)
    }

    /// Sheet metal first, then components in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Units)> {
        let sheet = self
            .entries
            .get_key_value(SHEET_METAL)
            .map(|(k, v)| (k.as_str(), *v));
        sheet.into_iter().chain(
            self.entries
                .iter()
                .filter(|(k, _)| k.as_str() != SHEET_METAL)
                .map(|(k, v)| (k.as_str(), *v)),
        )
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is required.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(&mut self, item: &str, amount: Units) {
        let slot = self.entries.entry(item.to_string()).or_default();
        *slot = slot.plus(amount);
    }
}

/// Aggregate arbitrary `(blueprint, quantity)` pairs.
///
/// Duplicate names accumulate, so callers holding an unnormalized list get
/// the same total as if the quantities had been summed first.
pub fn aggregate<'a, I>(lines: I, catalog: &BlueprintCatalog) -> RequiredBom
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut bom = RequiredBom::default();
    for (name, quantity) in lines {
        if quantity == 0 {
            continue;
        }
        let Some(blueprint) = catalog.get(name) else {
            continue;
        };
        let q = u64::from(quantity);
        bom.add(SHEET_METAL, blueprint.sheet_metal_per_unit.times(q));
        for (component, count) in &blueprint.components {
            let contribution = u64::from(*count).saturating_mul(q);
            if contribution > 0 {
                bom.add(component, Units::whole(contribution));
            }
        }
    }
    bom
}

/// Bill of materials for a build order.
pub fn compute_bom(order: &BuildOrder, catalog: &BlueprintCatalog) -> RequiredBom {
    aggregate(order.lines(), catalog)
}
