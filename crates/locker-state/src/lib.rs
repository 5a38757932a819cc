//! # locker-state — Facility State Machines
//!
//! Implements the mutable models of the facility. Each machine owns its
//! collection, validates every transition against its current state, and
//! appends a record of each successful transition.
//!
//! ## State Machines
//!
//! - **Locker bank** (`locker.rs`): `Available ⇄ OccupiedByUser` through
//!   delivery placement and the proximity-gated open action.
//!   `OccupiedByOther` and `Sanitizing` are backdrop states with no exit.
//!
//! - **Parcel ledger** (`parcel.rs`): seven-state parcel lifecycle with
//!   approve/reject branching out of `AwaitingApproval`, under a selectable
//!   transition policy (permissive or an explicit edge set).
//!
//! - **Parcel views** (`view.rs`): display buckets and the stable
//!   sender/date sort with toggling direction.
//!
//! - **Family plan** (`family.rs`): membership list plus credit balance
//!   with the fixed per-member bonus.
//!
//! ## Design
//!
//! Status enums are closed; behaviour keyed on status (labels, buckets,
//! legal edges) is an exhaustive `match`, never a lookup table. The
//! "parcel label present iff occupied by the user" invariant is carried by
//! the type of the locker occupancy, so it cannot be violated.

pub mod family;
pub mod locker;
pub mod parcel;
pub mod view;

// ─── Locker re-exports ──────────────────────────────────────────────

pub use locker::{
    Locker, LockerBank, LockerError, LockerStatus, LockerSummary, LockerTransitionRecord,
    Occupancy,
};

// ─── Parcel re-exports ──────────────────────────────────────────────

pub use parcel::{
    Parcel, ParcelError, ParcelLedger, ParcelStatus, ParcelTransitionRecord, TransitionPolicy,
};

// ─── View re-exports ────────────────────────────────────────────────

pub use view::{
    collate, sort_parcels, ParcelBucket, ParcelBuckets, SortDirection, SortKey, SortOrder,
};

// ─── Family re-exports ──────────────────────────────────────────────

pub use family::{FamilyError, FamilyMember, FamilyPlan, MEMBER_BONUS_CREDITS};
