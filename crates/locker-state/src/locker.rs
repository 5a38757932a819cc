//! # Locker Bank State Machine
//!
//! Models the bank of parcel lockers and the two transitions residents can
//! trigger.
//!
//! ## States
//!
//! ```text
//!              receive_delivery(label)
//! Available ───────────────────────────▶ OccupiedByUser { parcel_info }
//!     ▲                                        │
//!     └──────── open(nearby = true) ───────────┘
//!
//! OccupiedByOther, Sanitizing: no exit transition (other tenants, cleaning cycle)
//! ```
//!
//! ## Invariants
//!
//! - A parcel label exists if and only if the locker is occupied by the
//!   user. The label lives inside `Occupancy::OccupiedByUser`, so no other
//!   state can carry one.
//! - Features are fixed at construction; there is no mutator.
//! - The bank is kept in ascending id order, so "first available in scan
//!   order" and "lowest-id available" select the same locker.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use locker_core::{FacilityError, Feature, LockerId, Timestamp};

// ─── Locker Status ───────────────────────────────────────────────────

/// The occupancy status of a locker, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockerStatus {
    /// Free for a new delivery.
    Available,
    /// Holds a parcel for this resident.
    OccupiedByUser,
    /// Holds a parcel for another tenant.
    OccupiedByOther,
    /// Running a cleaning cycle.
    Sanitizing,
}

impl LockerStatus {
    /// All statuses in canonical order.
    pub fn all() -> &'static [LockerStatus] {
        &[
            Self::Available,
            Self::OccupiedByUser,
            Self::OccupiedByOther,
            Self::Sanitizing,
        ]
    }

    /// Label shown on the locker tile.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OccupiedByUser => "Your Parcel",
            Self::OccupiedByOther => "In Use",
            Self::Sanitizing => "Sanitizing",
        }
    }
}

impl std::fmt::Display for LockerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Occupancy with its payload. Serialized with a `status` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Occupancy {
    /// Free for a new delivery.
    Available,
    /// Holds a parcel for this resident.
    OccupiedByUser {
        /// Free-text description of the parcel inside.
        parcel_info: String,
    },
    /// Holds a parcel for another tenant.
    OccupiedByOther,
    /// Running a cleaning cycle.
    Sanitizing,
}

impl Occupancy {
    /// The payload-free status.
    pub fn status(&self) -> LockerStatus {
        match self {
            Self::Available => LockerStatus::Available,
            Self::OccupiedByUser { .. } => LockerStatus::OccupiedByUser,
            Self::OccupiedByOther => LockerStatus::OccupiedByOther,
            Self::Sanitizing => LockerStatus::Sanitizing,
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from locker bank operations. None of them mutate the bank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockerError {
    /// No locker with this id.
    #[error("locker {0} not found")]
    NotFound(LockerId),

    /// Open attempted without proximity or on a locker not holding the
    /// resident's parcel.
    #[error("locker {id} cannot be opened (status {status}, nearby: {nearby})")]
    OpenNotPermitted {
        /// Target locker.
        id: LockerId,
        /// Its current status.
        status: LockerStatus,
        /// The proximity flag supplied.
        nearby: bool,
    },

    /// Every locker is occupied or sanitizing.
    #[error("no available locker for a new delivery")]
    NoCapacity,

    /// Delivery label was empty after trimming.
    #[error("delivery label must not be empty")]
    EmptyLabel,

    /// Two lockers in the initial catalog share an id.
    #[error("duplicate locker id {0}")]
    DuplicateId(LockerId),

    /// Locker ids start at 1.
    #[error("locker id must be positive, got {0}")]
    ZeroId(LockerId),
}

impl From<LockerError> for FacilityError {
    fn from(err: LockerError) -> Self {
        match err {
            LockerError::NotFound(_) => FacilityError::NotFound(err.to_string()),
            LockerError::OpenNotPermitted { .. } | LockerError::NoCapacity => {
                FacilityError::InvalidTransition(err.to_string())
            }
            LockerError::EmptyLabel => FacilityError::Validation(err.to_string()),
            LockerError::DuplicateId(_) | LockerError::ZeroId(_) => {
                FacilityError::Fixture(err.to_string())
            }
        }
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of a locker state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockerTransitionRecord {
    /// The locker that changed.
    pub locker_id: LockerId,
    /// Status before the transition.
    pub from_state: LockerStatus,
    /// Status after the transition.
    pub to_state: LockerStatus,
    /// When the transition occurred.
    pub timestamp: Timestamp,
}

// ─── Locker ──────────────────────────────────────────────────────────

/// One locker compartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locker {
    id: LockerId,
    #[serde(flatten)]
    occupancy: Occupancy,
    #[serde(default)]
    features: BTreeSet<Feature>,
}

impl Locker {
    /// Create a locker.
    pub fn new(id: LockerId, occupancy: Occupancy, features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            id,
            occupancy,
            features: features.into_iter().collect(),
        }
    }

    /// Stable identity.
    pub fn id(&self) -> LockerId {
        self.id
    }

    /// Current status without payload.
    pub fn status(&self) -> LockerStatus {
        self.occupancy.status()
    }

    /// Current occupancy including the parcel label.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// The parcel label, present only while occupied by the user.
    pub fn parcel_info(&self) -> Option<&str> {
        match &self.occupancy {
            Occupancy::OccupiedByUser { parcel_info } => Some(parcel_info),
            Occupancy::Available | Occupancy::OccupiedByOther | Occupancy::Sanitizing => None,
        }
    }

    /// Capability tags.
    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.features
    }

    /// Whether the locker has a given capability.
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// Count of lockers per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockerSummary {
    /// Free lockers.
    pub available: usize,
    /// Lockers holding the resident's parcels.
    pub occupied_by_user: usize,
    /// Lockers used by other tenants.
    pub occupied_by_other: usize,
    /// Lockers in a cleaning cycle.
    pub sanitizing: usize,
}

// ─── Locker Bank ─────────────────────────────────────────────────────

/// The facility's lockers and their transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockerBank {
    lockers: Vec<Locker>,
    transitions: Vec<LockerTransitionRecord>,
}

impl LockerBank {
    /// Build a bank from the initial catalog, ordered by id.
    pub fn new(mut lockers: Vec<Locker>) -> Result<Self, LockerError> {
        lockers.sort_by_key(|l| l.id);
        if let Some(first) = lockers.first().filter(|l| l.id.get() == 0) {
            return Err(LockerError::ZeroId(first.id));
        }
        if let Some(pair) = lockers.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(LockerError::DuplicateId(pair[0].id));
        }
        Ok(Self {
            lockers,
            transitions: Vec::new(),
        })
    }

    /// Look up a locker.
    pub fn get(&self, id: LockerId) -> Option<&Locker> {
        self.lockers.iter().find(|l| l.id == id)
    }

    /// Iterate in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Locker> {
        self.lockers.iter()
    }

    /// Number of lockers.
    pub fn len(&self) -> usize {
        self.lockers.len()
    }

    /// Whether the bank has no lockers.
    pub fn is_empty(&self) -> bool {
        self.lockers.is_empty()
    }

    /// Ordered log of all transitions.
    pub fn transitions(&self) -> &[LockerTransitionRecord] {
        &self.transitions
    }

    /// Whether the open action should be offered for this locker.
    pub fn can_open(&self, id: LockerId, nearby: bool) -> bool {
        nearby
            && self
                .get(id)
                .is_some_and(|l| l.status() == LockerStatus::OccupiedByUser)
    }

    /// Open a locker the resident is standing next to
    /// (OCCUPIED_BY_USER → AVAILABLE). Returns the label of the collected
    /// parcel.
    pub fn open(
        &mut self,
        id: LockerId,
        nearby: bool,
        now: Timestamp,
    ) -> Result<String, LockerError> {
        let locker = self
            .lockers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(LockerError::NotFound(id))?;

        let status = locker.status();
        if !nearby || status != LockerStatus::OccupiedByUser {
            return Err(LockerError::OpenNotPermitted { id, status, nearby });
        }

        let previous = std::mem::replace(&mut locker.occupancy, Occupancy::Available);
        let label = match previous {
            Occupancy::OccupiedByUser { parcel_info } => parcel_info,
            Occupancy::Available | Occupancy::OccupiedByOther | Occupancy::Sanitizing => {
                String::new()
            }
        };
        self.record(id, status, LockerStatus::Available, now);
        Ok(label)
    }

    /// Place a new delivery in the first available locker
    /// (AVAILABLE → OCCUPIED_BY_USER).
    pub fn receive_delivery(
        &mut self,
        parcel_info: &str,
        now: Timestamp,
    ) -> Result<LockerId, LockerError> {
        let label = parcel_info.trim();
        if label.is_empty() {
            return Err(LockerError::EmptyLabel);
        }

        let locker = self
            .lockers
            .iter_mut()
            .find(|l| l.status() == LockerStatus::Available)
            .ok_or(LockerError::NoCapacity)?;

        locker.occupancy = Occupancy::OccupiedByUser {
            parcel_info: label.to_string(),
        };
        let id = locker.id;
        self.record(id, LockerStatus::Available, LockerStatus::OccupiedByUser, now);
        Ok(id)
    }

    /// Count lockers per status.
    pub fn summary(&self) -> LockerSummary {
        let mut summary = LockerSummary::default();
        for locker in &self.lockers {
            match locker.status() {
                LockerStatus::Available => summary.available += 1,
                LockerStatus::OccupiedByUser => summary.occupied_by_user += 1,
                LockerStatus::OccupiedByOther => summary.occupied_by_other += 1,
                LockerStatus::Sanitizing => summary.sanitizing += 1,
            }
        }
        summary
    }

    fn record(&mut self, locker_id: LockerId, from: LockerStatus, to: LockerStatus, now: Timestamp) {
        self.transitions.push(LockerTransitionRecord {
            locker_id,
            from_state: from,
            to_state: to,
            timestamp: now,
        });
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::parse("2024-07-22T09:00:00Z").unwrap()
    }

    fn user_locker(id: u32, label: &str) -> Locker {
        Locker::new(
            LockerId(id),
            Occupancy::OccupiedByUser {
                parcel_info: label.to_string(),
            },
            [],
        )
    }

    fn bank(lockers: Vec<Locker>) -> LockerBank {
        LockerBank::new(lockers).unwrap()
    }

    // ── Delivery placement ───────────────────────────────────────────

    #[test]
    fn test_delivery_picks_lowest_available() {
        let mut bank = bank(vec![
            Locker::new(LockerId(3), Occupancy::Available, []),
            user_locker(1, "Shoes"),
            Locker::new(LockerId(2), Occupancy::Available, [Feature::Cold]),
        ]);
        let id = bank.receive_delivery("New Amazon Parcel", now()).unwrap();
        assert_eq!(id, LockerId(2));
        let locker = bank.get(LockerId(2)).unwrap();
        assert_eq!(locker.status(), LockerStatus::OccupiedByUser);
        assert_eq!(locker.parcel_info(), Some("New Amazon Parcel"));
        assert_eq!(bank.transitions().len(), 1);
    }

    #[test]
    fn test_delivery_without_capacity_is_noop() {
        let mut bank = bank(vec![
            user_locker(1, "Shoes"),
            Locker::new(LockerId(2), Occupancy::Sanitizing, []),
            Locker::new(LockerId(3), Occupancy::OccupiedByOther, []),
        ]);
        let before = bank.lockers.clone();
        assert_eq!(
            bank.receive_delivery("Parcel", now()),
            Err(LockerError::NoCapacity)
        );
        assert_eq!(bank.lockers, before);
        assert!(bank.transitions().is_empty());
    }

    #[test]
    fn test_delivery_rejects_blank_label() {
        let mut bank = bank(vec![Locker::new(LockerId(1), Occupancy::Available, [])]);
        assert_eq!(bank.receive_delivery("  ", now()), Err(LockerError::EmptyLabel));
        assert_eq!(bank.get(LockerId(1)).unwrap().status(), LockerStatus::Available);
    }

    // ── Open ─────────────────────────────────────────────────────────

    #[test]
    fn test_open_requires_proximity() {
        let mut bank = bank(vec![user_locker(1, "Laundry")]);
        assert!(!bank.can_open(LockerId(1), false));
        let err = bank.open(LockerId(1), false, now()).unwrap_err();
        assert!(matches!(err, LockerError::OpenNotPermitted { nearby: false, .. }));
        assert_eq!(bank.get(LockerId(1)).unwrap().parcel_info(), Some("Laundry"));
    }

    #[test]
    fn test_open_requires_user_occupancy() {
        let mut bank = bank(vec![
            Locker::new(LockerId(1), Occupancy::OccupiedByOther, []),
            Locker::new(LockerId(2), Occupancy::Sanitizing, []),
            Locker::new(LockerId(3), Occupancy::Available, []),
        ]);
        for id in 1..=3 {
            assert!(!bank.can_open(LockerId(id), true));
            assert!(bank.open(LockerId(id), true, now()).is_err());
        }
        assert!(bank.transitions().is_empty());
    }

    #[test]
    fn test_open_clears_label() {
        let mut bank = bank(vec![user_locker(5, "Hot Food Delivery")]);
        assert!(bank.can_open(LockerId(5), true));
        let label = bank.open(LockerId(5), true, now()).unwrap();
        assert_eq!(label, "Hot Food Delivery");
        let locker = bank.get(LockerId(5)).unwrap();
        assert_eq!(locker.status(), LockerStatus::Available);
        assert_eq!(locker.parcel_info(), None);
        assert_eq!(bank.transitions()[0].to_state, LockerStatus::Available);
    }

    #[test]
    fn test_open_unknown_locker() {
        let mut bank = bank(vec![]);
        assert_eq!(
            bank.open(LockerId(42), true, now()),
            Err(LockerError::NotFound(LockerId(42)))
        );
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = LockerBank::new(vec![
            Locker::new(LockerId(1), Occupancy::Available, []),
            Locker::new(LockerId(1), Occupancy::Sanitizing, []),
        ]);
        assert_eq!(result.unwrap_err(), LockerError::DuplicateId(LockerId(1)));
    }

    #[test]
    fn test_zero_id_rejected() {
        let result = LockerBank::new(vec![
            Locker::new(LockerId(3), Occupancy::Available, []),
            Locker::new(LockerId(0), Occupancy::Available, []),
        ]);
        assert_eq!(result.unwrap_err(), LockerError::ZeroId(LockerId(0)));
    }

    #[test]
    fn test_summary_counts() {
        let bank = bank(vec![
            user_locker(1, "a"),
            Locker::new(LockerId(2), Occupancy::Available, []),
            Locker::new(LockerId(3), Occupancy::Available, []),
            Locker::new(LockerId(4), Occupancy::Sanitizing, []),
        ]);
        let s = bank.summary();
        assert_eq!((s.available, s.occupied_by_user, s.occupied_by_other, s.sanitizing), (2, 1, 0, 1));
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn test_locker_yaml_shape() {
        let yaml = "id: 1\nstatus: occupied_by_user\nparcel_info: Flipkart - Shoes\nfeatures: [uv]\n";
        let locker: Locker = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(locker.parcel_info(), Some("Flipkart - Shoes"));
        assert!(locker.has_feature(Feature::Uv));
    }

    #[test]
    fn test_occupied_by_user_requires_label() {
        let yaml = "id: 1\nstatus: occupied_by_user\n";
        assert!(serde_yaml::from_str::<Locker>(yaml).is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(LockerStatus::OccupiedByUser.to_string(), "Your Parcel");
        assert_eq!(LockerStatus::OccupiedByOther.to_string(), "In Use");
        assert_eq!(LockerStatus::all().len(), 4);
    }
}
