//! # locker-cli — `lockerctl`
//!
//! Command-line front end over a [`locker_app::Facility`] session.
//!
//! ## Subcommands
//!
//! - `lockerctl lockers` — the locker bank with status, label, and features.
//! - `lockerctl plans` — the subscription plan catalog.
//! - `lockerctl parcels` — a parcel collection, sorted or bucketed.
//! - `lockerctl bom` — blueprint catalog, or the bill of materials and
//!   inventory shortfall for a build order.
//! - `lockerctl replay` — dispatch a YAML script of intents in order.
//!
//! ```bash
//! lockerctl parcels --view user --buckets
//! lockerctl bom --order "7-Locker Tower=2" --order "Kiosk Tower=1"
//! lockerctl --seed site.yaml replay morning.yaml --json
//! ```

pub mod bom;
pub mod lockers;
pub mod parcels;
pub mod plans;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};

use locker_app::{Facility, FacilityConfig};
use locker_core::{Clock, SystemClock};

/// Load the configuration (if any), apply the `--seed` override, and open
/// a session on the wall clock.
pub fn open_facility(config: Option<&Path>, seed: Option<&Path>) -> Result<Facility> {
    open_facility_with_clock(config, seed, Box::new(SystemClock))
}

/// [`open_facility`] with an explicit clock.
pub fn open_facility_with_clock(
    config: Option<&Path>,
    seed: Option<&Path>,
    clock: Box<dyn Clock>,
) -> Result<Facility> {
    let mut facility_config = match config {
        Some(path) => FacilityConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FacilityConfig::default(),
    };
    if let Some(seed) = seed {
        facility_config.seed = Some(seed.to_path_buf());
    }
    tracing::debug!(
        seed = ?facility_config.seed,
        policy = ?facility_config.transition_policy,
        "opening facility session"
    );
    Facility::from_config(facility_config, clock).context("failed to open facility session")
}
