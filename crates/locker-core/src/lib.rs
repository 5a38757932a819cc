//! # locker-core — Foundational Types for the Smart-Locker Facility
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate shares: identifier newtypes, the UTC `Timestamp` and the
//! `Clock` seam through which time enters the system, the closed
//! enumerations (locker features, billing periods), plan catalog entries,
//! user-facing notices, and the top-level error type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `locker-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Every closed set of values is an enum; consumers `match` exhaustively.

pub mod domain;
pub mod error;
pub mod identity;
pub mod notice;
pub mod plan;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use domain::{BillingPeriod, Feature};
pub use error::FacilityError;
pub use identity::{LockerId, MemberId, ParcelId};
pub use notice::Notice;
pub use plan::Plan;
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
