//! # locker-app — Facility Session
//!
//! Wires the models of `locker-state` and `locker-bom` into one session:
//!
//! - [`seed`]: the static fixtures a session starts from (built-in or a
//!   YAML file), validated for cross-references.
//! - [`config`]: session tunables (transition policy, notice lifetime,
//!   default delivery label, seed location).
//! - [`facility`]: the [`Facility`] itself; every read and every mutation.
//! - [`intent`]: the closed set of mutations as serializable [`Intent`]s,
//!   dispatched through [`Facility::dispatch`].
//! - [`notification`]: the single transient notice slot.
//!
//! Time enters only through the [`locker_core::Clock`] handed to the
//! session, so a script replayed against a `ManualClock` is deterministic.

pub mod config;
pub mod facility;
pub mod intent;
pub mod notification;
pub mod seed;

pub use config::FacilityConfig;
pub use facility::Facility;
pub use intent::{ClientRequest, Intent, Outcome, ParcelView};
pub use notification::{Notification, NotificationSlot};
pub use seed::Seed;
