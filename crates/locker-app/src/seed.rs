//! # Seed Fixtures
//!
//! The static data a session starts from. The built-in document ships with
//! the crate (`fixtures/default_seed.yaml`); operators may point the
//! session at their own file instead.
//!
//! Loading checks every cross-reference the models cannot check on their
//! own: a parcel's `locker_id` must name a locker in the bank, plans must
//! be named, and the per-collection uniqueness rules hold.

use std::path::Path;

use serde::{Deserialize, Serialize};

use locker_bom::{BlueprintCatalog, Inventory};
use locker_core::{FacilityError, Plan};
use locker_state::{FamilyMember, Locker, Parcel};

const BUILTIN_SEED: &str = include_str!("../fixtures/default_seed.yaml");

/// Initial facility data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    pub lockers: Vec<Locker>,
    #[serde(default)]
    pub blueprints: BlueprintCatalog,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub plans: Vec<Plan>,
    /// Hub-side collection, changed from the admin desk.
    #[serde(default)]
    pub admin_parcels: Vec<Parcel>,
    /// Resident-side collection. Evolves independently of the hub copy.
    #[serde(default)]
    pub user_parcels: Vec<Parcel>,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub credits: u32,
}

impl Seed {
    /// The fixtures compiled into the crate.
    pub fn builtin() -> Result<Self, FacilityError> {
        Self::from_yaml(BUILTIN_SEED)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, FacilityError> {
        let seed: Seed = serde_yaml::from_str(content)
            .map_err(|e| FacilityError::Fixture(format!("invalid YAML: {e}")))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Load and validate a seed file.
    pub fn load(path: &Path) -> Result<Self, FacilityError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FacilityError::Fixture(format!("{}: cannot read file: {e}", path.display()))
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            FacilityError::Fixture(msg) => {
                FacilityError::Fixture(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Load from `path`, or the built-in fixtures when `None`.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, FacilityError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Cross-reference checks.
    ///
    /// Id uniqueness is re-checked when the models are built; it is
    /// checked here too so a bad file fails before a session exists.
    pub fn validate(&self) -> Result<(), FacilityError> {
        let mut locker_ids: Vec<_> = self.lockers.iter().map(|l| l.id()).collect();
        locker_ids.sort();
        if locker_ids.first().is_some_and(|id| id.get() == 0) {
            return Err(FacilityError::Fixture(
                "locker id must be positive, got 0".to_string(),
            ));
        }
        if let Some(pair) = locker_ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(FacilityError::Fixture(format!(
                "duplicate locker id {}",
                pair[0]
            )));
        }

        for (collection, parcels) in [
            ("admin_parcels", &self.admin_parcels),
            ("user_parcels", &self.user_parcels),
        ] {
            for (i, parcel) in parcels.iter().enumerate() {
                if parcels[..i].iter().any(|p| p.id == parcel.id) {
                    return Err(FacilityError::Fixture(format!(
                        "{collection}: duplicate parcel id {}",
                        parcel.id
                    )));
                }
                if let Some(locker_id) = parcel.locker_id {
                    if locker_ids.binary_search(&locker_id).is_err() {
                        return Err(FacilityError::Fixture(format!(
                            "{collection}: parcel {} references unknown locker {locker_id}",
                            parcel.id
                        )));
                    }
                }
            }
        }

        for (i, member) in self.family_members.iter().enumerate() {
            if self.family_members[..i].iter().any(|m| m.id == member.id) {
                return Err(FacilityError::Fixture(format!(
                    "duplicate family member id {}",
                    member.id
                )));
            }
        }

        for plan in &self.plans {
            plan.validate()?;
        }
        Ok(())
    }
}
