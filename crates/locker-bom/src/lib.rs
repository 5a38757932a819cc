//! # locker-bom — Build Order to Bill of Materials
//!
//! Given a build order (quantities of locker-tower blueprints), derives the
//! total components and sheet metal required. The engine is a pure
//! requirements calculator: it never allocates or decrements stock.
//! Comparing requirements with the inventory ceiling is a separate,
//! read-only report (`inventory.rs`).
//!
//! ## Arithmetic
//!
//! Amounts are [`Units`], fixed-point thousandths held in a `u64`.
//! Fractional sheet-metal amounts (`1.5` sheets per kiosk) therefore add
//! exactly, and aggregation is commutative and associative regardless of
//! the order in which blueprints are visited.

pub mod blueprint;
pub mod engine;
pub mod inventory;
pub mod order;
pub mod units;

use thiserror::Error;

use locker_core::FacilityError;

pub use blueprint::{Blueprint, BlueprintCatalog};
pub use engine::{aggregate, compute_bom, RequiredBom, SHEET_METAL};
pub use inventory::{Inventory, Shortfall};
pub use order::{BuildOrder, OrderLine};
pub use units::Units;

/// Errors from catalog construction and order parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BomError {
    /// Two blueprints share a name.
    #[error("duplicate blueprint {0:?}")]
    DuplicateBlueprint(String),

    /// Blueprint name was empty.
    #[error("blueprint name must not be empty")]
    EmptyBlueprintName,

    /// A decimal amount was negative, NaN, or infinite.
    #[error("invalid amount {0}: must be finite and non-negative")]
    InvalidAmount(f64),

    /// An order line was not `NAME=QUANTITY`.
    #[error("invalid order line {0:?}: expected NAME=QUANTITY")]
    InvalidOrderLine(String),
}

impl From<BomError> for FacilityError {
    fn from(err: BomError) -> Self {
        match err {
            BomError::DuplicateBlueprint(_) | BomError::EmptyBlueprintName => {
                FacilityError::Fixture(err.to_string())
            }
            BomError::InvalidAmount(_) | BomError::InvalidOrderLine(_) => {
                FacilityError::Validation(err.to_string())
            }
        }
    }
}
