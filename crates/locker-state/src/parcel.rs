//! # Parcel Lifecycle State Machine
//!
//! Models the lifecycle of a parcel from courier hand-off to collection or
//! return. The admin desk and the resident's own view hold separate
//! collections, but both mutate through [`ParcelLedger::set_status`].
//!
//! ## States
//!
//! ```text
//! Upcoming ──▶ AwaitingApproval ──approve()──▶ InLocker ──▶ Delivered (terminal)
//!    │                │                           ▲  │
//!    │                └──reject()──▶ Returned ◀───┼──┘
//!    ▼                               (terminal)   │
//! Received ──▶ Sanitizing ────────────────────────┘
//!    │
//!    └──▶ Returned
//! ```
//!
//! ## Transition Policy
//!
//! The product lets an operator pick any status from any status. That
//! behaviour is [`TransitionPolicy::Permissive`] and is the default. The
//! edge set drawn above is [`TransitionPolicy::Strict`], which rejects
//! everything else (including self-transitions and any exit from a
//! terminal state) with [`ParcelError::InvalidTransition`].
//!
//! ## Invariant
//!
//! `last_update` never decreases: a status change stamps
//! `max(now, previous last_update)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use locker_core::{FacilityError, LockerId, Notice, ParcelId, Timestamp};

use crate::view::ParcelBucket;

// ─── Parcel Status ───────────────────────────────────────────────────

/// The lifecycle status of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Checked in at the hub.
    Received,
    /// Going through the sanitisation cycle.
    Sanitizing,
    /// Placed in a locker, awaiting collection.
    InLocker,
    /// Collected by the recipient (terminal).
    Delivered,
    /// Sent back to the courier (terminal).
    Returned,
    /// Unknown sender; the resident must approve or reject.
    AwaitingApproval,
    /// Announced by the courier, not yet at the facility.
    Upcoming,
}

impl ParcelStatus {
    /// All statuses in canonical order.
    pub fn all() -> &'static [ParcelStatus] {
        &[
            Self::Received,
            Self::Sanitizing,
            Self::InLocker,
            Self::Delivered,
            Self::Returned,
            Self::AwaitingApproval,
            Self::Upcoming,
        ]
    }

    /// Statuses offered in the admin desk's status menu. Approval states
    /// belong to the resident and are not offered.
    pub fn admin_selectable() -> &'static [ParcelStatus] {
        &[
            Self::Received,
            Self::Sanitizing,
            Self::InLocker,
            Self::Delivered,
            Self::Returned,
        ]
    }

    /// The snake_case identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Sanitizing => "sanitizing",
            Self::InLocker => "in_locker",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
            Self::AwaitingApproval => "awaiting_approval",
            Self::Upcoming => "upcoming",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Received => "Received at Hub",
            Self::Sanitizing => "Sanitizing",
            Self::InLocker => "In Locker",
            Self::Delivered => "Delivered to Recipient",
            Self::Returned => "Returned",
            Self::AwaitingApproval => "Awaiting Approval",
            Self::Upcoming => "Upcoming",
        }
    }

    /// Whether this state is terminal under the strict policy.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Returned)
    }

    /// Whether the parcel's details (sender, recipient, locker) are shown.
    pub fn has_details(&self) -> bool {
        matches!(self, Self::InLocker | Self::Delivered | Self::Returned)
    }

    /// Whether approve/reject are offered.
    pub fn awaits_review(&self) -> bool {
        matches!(self, Self::AwaitingApproval)
    }

    /// The display bucket this status belongs to.
    ///
    /// Hub-side statuses (`Received`, `Sanitizing`) count as upcoming from
    /// the resident's point of view, so every status lands in exactly one
    /// bucket.
    pub fn bucket(&self) -> ParcelBucket {
        match self {
            Self::AwaitingApproval => ParcelBucket::AwaitingApproval,
            Self::Upcoming | Self::Received | Self::Sanitizing => ParcelBucket::Upcoming,
            Self::InLocker => ParcelBucket::InLocker,
            Self::Delivered | Self::Returned => ParcelBucket::History,
        }
    }

    /// Legal targets under the strict policy.
    pub fn valid_transitions(&self) -> &'static [ParcelStatus] {
        match self {
            Self::Upcoming => &[Self::Received, Self::AwaitingApproval],
            Self::AwaitingApproval => &[Self::InLocker, Self::Returned],
            Self::Received => &[Self::Sanitizing, Self::Returned],
            Self::Sanitizing => &[Self::InLocker],
            Self::InLocker => &[Self::Delivered, Self::Returned],
            Self::Delivered | Self::Returned => &[],
        }
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ParcelStatus {
    type Err = ParcelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParcelError::UnknownStatus(s.to_string()))
    }
}

/// Which transitions [`ParcelLedger::set_status`] admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status to any status.
    #[default]
    Permissive,
    /// Only the edges of [`ParcelStatus::valid_transitions`].
    Strict,
}

impl TransitionPolicy {
    /// Whether `from → to` is admitted.
    pub fn allows(&self, from: ParcelStatus, to: ParcelStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => from.valid_transitions().contains(&to),
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from parcel ledger operations. None of them mutate the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParcelError {
    /// No parcel with this id in the collection.
    #[error("parcel {0} not found")]
    NotFound(ParcelId),

    /// Transition rejected by the strict policy.
    #[error("invalid parcel transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: ParcelStatus,
        /// Attempted target state.
        to: ParcelStatus,
    },

    /// Approve/reject on a parcel that is not awaiting approval.
    #[error("parcel {id} is not awaiting approval (status {status})")]
    NotAwaitingApproval {
        /// The parcel.
        id: ParcelId,
        /// Its current status.
        status: ParcelStatus,
    },

    /// Two parcels in one collection share a tracking code.
    #[error("duplicate parcel id {0}")]
    DuplicateId(ParcelId),

    /// Status text not recognised.
    #[error("unknown parcel status {0:?}")]
    UnknownStatus(String),
}

impl From<ParcelError> for FacilityError {
    fn from(err: ParcelError) -> Self {
        match err {
            ParcelError::NotFound(_) => FacilityError::NotFound(err.to_string()),
            ParcelError::InvalidTransition { .. } | ParcelError::NotAwaitingApproval { .. } => {
                FacilityError::InvalidTransition(err.to_string())
            }
            ParcelError::DuplicateId(_) => FacilityError::Fixture(err.to_string()),
            ParcelError::UnknownStatus(_) => FacilityError::Validation(err.to_string()),
        }
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of a parcel status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelTransitionRecord {
    /// The parcel that changed.
    pub parcel_id: ParcelId,
    /// Status before the change.
    pub from_state: ParcelStatus,
    /// Status after the change.
    pub to_state: ParcelStatus,
    /// The stamp written to `last_update`.
    pub timestamp: Timestamp,
}

// ─── Parcel ──────────────────────────────────────────────────────────

/// A tracked parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Courier tracking code.
    pub id: ParcelId,
    /// Shipping company or merchant.
    pub sender: String,
    /// Addressee.
    pub recipient: String,
    /// Current lifecycle status.
    pub status: ParcelStatus,
    /// Locker holding the parcel, if placed.
    #[serde(default)]
    pub locker_id: Option<LockerId>,
    /// Time of the last status change.
    pub last_update: Timestamp,
}

impl Parcel {
    /// Locker number for display, `N/A` when unplaced.
    pub fn locker_display(&self) -> String {
        self.locker_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

// ─── Parcel Ledger ───────────────────────────────────────────────────

/// One parcel collection with its transition policy and history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelLedger {
    parcels: Vec<Parcel>,
    policy: TransitionPolicy,
    transitions: Vec<ParcelTransitionRecord>,
}

impl ParcelLedger {
    /// Build a ledger, keeping the given order.
    pub fn new(parcels: Vec<Parcel>, policy: TransitionPolicy) -> Result<Self, ParcelError> {
        for (i, parcel) in parcels.iter().enumerate() {
            if parcels[..i].iter().any(|p| p.id == parcel.id) {
                return Err(ParcelError::DuplicateId(parcel.id.clone()));
            }
        }
        Ok(Self {
            parcels,
            policy,
            transitions: Vec::new(),
        })
    }

    /// The active transition policy.
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// All parcels in insertion order.
    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// Look up a parcel.
    pub fn get(&self, id: &ParcelId) -> Option<&Parcel> {
        self.parcels.iter().find(|p| &p.id == id)
    }

    /// Ordered log of all status changes.
    pub fn transitions(&self) -> &[ParcelTransitionRecord] {
        &self.transitions
    }

    /// Whether approve/reject should be offered for this parcel.
    pub fn can_review(&self, id: &ParcelId) -> bool {
        self.get(id).is_some_and(|p| p.status.awaits_review())
    }

    /// Record a new delivery event for this collection.
    pub fn insert(&mut self, parcel: Parcel) -> Result<(), ParcelError> {
        if self.get(&parcel.id).is_some() {
            return Err(ParcelError::DuplicateId(parcel.id));
        }
        self.parcels.push(parcel);
        Ok(())
    }

    /// Replace a parcel's status and stamp `last_update`.
    ///
    /// Returns the notice this change raises: approval wording for
    /// `InLocker`, rejection wording for `Returned`, nothing otherwise.
    pub fn set_status(
        &mut self,
        id: &ParcelId,
        to: ParcelStatus,
        now: Timestamp,
    ) -> Result<Option<Notice>, ParcelError> {
        let policy = self.policy;
        let parcel = self
            .parcels
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ParcelError::NotFound(id.clone()))?;

        let from = parcel.status;
        if !policy.allows(from, to) {
            return Err(ParcelError::InvalidTransition { from, to });
        }

        let stamp = now.max(parcel.last_update);
        parcel.status = to;
        parcel.last_update = stamp;

        self.transitions.push(ParcelTransitionRecord {
            parcel_id: id.clone(),
            from_state: from,
            to_state: to,
            timestamp: stamp,
        });

        Ok(match to {
            ParcelStatus::InLocker => Some(Notice::ParcelApproved {
                parcel_id: id.clone(),
            }),
            ParcelStatus::Returned => Some(Notice::ParcelRejected {
                parcel_id: id.clone(),
            }),
            ParcelStatus::Received
            | ParcelStatus::Sanitizing
            | ParcelStatus::Delivered
            | ParcelStatus::AwaitingApproval
            | ParcelStatus::Upcoming => None,
        })
    }

    /// Accept a parcel from an unknown sender (AWAITING_APPROVAL → IN_LOCKER).
    pub fn approve(&mut self, id: &ParcelId, now: Timestamp) -> Result<Option<Notice>, ParcelError> {
        self.require_review(id)?;
        self.set_status(id, ParcelStatus::InLocker, now)
    }

    /// Refuse a parcel from an unknown sender (AWAITING_APPROVAL → RETURNED).
    pub fn reject(&mut self, id: &ParcelId, now: Timestamp) -> Result<Option<Notice>, ParcelError> {
        self.require_review(id)?;
        self.set_status(id, ParcelStatus::Returned, now)
    }

    fn require_review(&self, id: &ParcelId) -> Result<(), ParcelError> {
        let parcel = self.get(id).ok_or_else(|| ParcelError::NotFound(id.clone()))?;
        if !parcel.status.awaits_review() {
            return Err(ParcelError::NotAwaitingApproval {
                id: id.clone(),
                status: parcel.status,
            });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
