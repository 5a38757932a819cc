//! # Blueprint Catalog
//!
//! Static descriptions of the tower types the facility can build: the
//! sheet metal each consumes and its per-unit component counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::units::Units;
use crate::BomError;

/// One buildable tower type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Catalog name, the key used in build orders.
    pub name: String,
    /// Short description of the compartments it provides.
    #[serde(default)]
    pub specs: String,
    /// Sheets of metal consumed per unit built.
    pub sheet_metal_per_unit: Units,
    /// Component name → count per unit built.
    #[serde(default)]
    pub components: BTreeMap<String, u32>,
}

/// Blueprints in catalog order, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Blueprint>", into = "Vec<Blueprint>")]
pub struct BlueprintCatalog {
    blueprints: Vec<Blueprint>,
}

impl BlueprintCatalog {
    /// Build a catalog, rejecting blank or duplicate names.
    pub fn new(blueprints: Vec<Blueprint>) -> Result<Self, BomError> {
        for (i, bp) in blueprints.iter().enumerate() {
            if bp.name.trim().is_empty() {
                return Err(BomError::EmptyBlueprintName);
            }
            if blueprints[..i].iter().any(|b| b.name == bp.name) {
                return Err(BomError::DuplicateBlueprint(bp.name.clone()));
            }
        }
        Ok(Self { blueprints })
    }

    /// Look up a blueprint by exact name.
    pub fn get(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.iter().find(|b| b.name == name)
    }

    /// Blueprints in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Blueprint> {
        self.blueprints.iter()
    }

    /// Number of blueprints.
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

impl TryFrom<Vec<Blueprint>> for BlueprintCatalog {
    type Error = BomError;

    fn try_from(value: Vec<Blueprint>) -> Result<Self, Self::Error> {
        BlueprintCatalog::new(value)
    }
}

impl From<BlueprintCatalog> for Vec<Blueprint> {
    fn from(catalog: BlueprintCatalog) -> Self {
        catalog.blueprints
    }
}
