//! # Inventory Ceiling
//!
//! Stock on hand, keyed by the same item names the bill of materials uses.
//! Comparing a bill against stock is read-only: nothing is reserved or
//! decremented.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::RequiredBom;
use crate::units::Units;

/// Item name → amount on hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    stock: BTreeMap<String, Units>,
}

/// One item the current stock cannot cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    /// Component or material name.
    pub item: String,
    /// Amount the bill asks for.
    pub required: Units,
    /// Amount on hand.
    pub available: Units,
    /// `required - available`.
    pub missing: Units,
}

impl Inventory {
    /// Stock from a name → amount table.
    pub fn new(stock: BTreeMap<String, Units>) -> Self {
        Self { stock }
    }

    /// Amount on hand; unknown items have none.
    pub fn available(&self, item: &str) -> Units {
        self.stock.get(item).copied().unwrap_or(Units::ZERO)
    }

    /// Items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Units)> {
        self.stock.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of stocked items.
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Whether nothing is stocked.
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Items the bill needs more of than is on hand, in bill order.
    pub fn shortfalls(&self, bom: &RequiredBom) -> Vec<Shortfall> {
        bom.iter()
            .filter_map(|(item, required)| {
                let available = self.available(item);
                (required > available).then(|| Shortfall {
                    item: item.to_string(),
                    required,
                    available,
                    missing: required.minus(available),
                })
            })
            .collect()
    }

    /// Whether every requirement is covered by stock.
    pub fn covers(&self, bom: &RequiredBom) -> bool {
        bom.iter()
            .all(|(item, required)| required <= self.available(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{Blueprint, BlueprintCatalog};
    use crate::engine::aggregate;

    fn setup() -> (BlueprintCatalog, Inventory) {
        let catalog = BlueprintCatalog::new(vec![Blueprint {
            name: "Kiosk Tower".to_string(),
            specs: String::new(),
            sheet_metal_per_unit: Units::from_decimal(1.5).unwrap(),
            components: [("PC".to_string(), 1), ("Smart Locks".to_string(), 3)]
                .into_iter()
                .collect(),
        }])
        .unwrap();
        let inventory = Inventory::new(
            [
                ("Sheet Metal".to_string(), Units::whole(500)),
                ("PC".to_string(), Units::whole(150)),
            ]
            .into_iter()
            .collect(),
        );
        (catalog, inventory)
    }

    #[test]
    fn test_unstocked_component_blocks_cover() {
        let (catalog, inventory) = setup();
        let bom = aggregate([("Kiosk Tower", 10)], &catalog);
        // No Smart Locks stocked at all.
        assert!(!inventory.covers(&bom));
        let short = inventory.shortfalls(&bom);
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].item, "Smart Locks");
        assert_eq!(short[0].missing, Units::whole(30));
    }

    #[test]
    fn test_large_order_reports_every_gap() {
        let (catalog, inventory) = setup();
        let bom = aggregate([("Kiosk Tower", 400)], &catalog);
        let short = inventory.shortfalls(&bom);
        let items: Vec<&str> = short.iter().map(|s| s.item.as_str()).collect();
        assert_eq!(items, vec!["Sheet Metal", "PC", "Smart Locks"]);
        assert_eq!(short[0].required, Units::whole(600));
        assert_eq!(short[0].missing, Units::whole(100));
        assert_eq!(short[1].missing, Units::whole(250));
    }

    #[test]
    fn test_report_does_not_touch_stock() {
        let (catalog, inventory) = setup();
        let before = inventory.clone();
        let bom = aggregate([("Kiosk Tower", 1000)], &catalog);
        let _ = inventory.shortfalls(&bom);
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_yaml_inventory() {
        let inventory: Inventory =
            serde_yaml::from_str("Sheet Metal: 500\n'22\" Touchscreen': 150\n").unwrap();
        assert_eq!(inventory.available("22\" Touchscreen"), Units::whole(150));
        assert_eq!(inventory.available("Widgets"), Units::ZERO);
    }
}
