//! # User-Facing Notices
//!
//! Every informational message the facility can raise, as one closed enum.
//! The display text is produced by an exhaustive `match`, so a new notice
//! cannot ship without its wording.

use serde::{Deserialize, Serialize};

use crate::identity::{LockerId, ParcelId};

/// An informational message for the operator or resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A delivery was placed in a locker.
    DeliveryArrived {
        /// Locker that received the parcel.
        locker_id: LockerId,
    },
    /// No locker was available for a delivery.
    NoCapacity,
    /// A parcel moved to `InLocker` (approval path).
    ParcelApproved {
        /// The approved parcel.
        parcel_id: ParcelId,
    },
    /// A parcel moved to `Returned` (rejection path).
    ParcelRejected {
        /// The rejected parcel.
        parcel_id: ParcelId,
    },
    /// A family member joined the plan and bonus credits were granted.
    MemberAdded {
        /// Name of the new member.
        name: String,
        /// Credits granted.
        bonus: u32,
    },
    /// A family member was renamed.
    MemberUpdated,
    /// A family member was removed.
    MemberRemoved,
    /// A client onboarding request was accepted for review.
    ClientRequestSubmitted,
}

impl Notice {
    /// The message shown to the user.
    pub fn message(&self) -> String {
        match self {
            Self::DeliveryArrived { locker_id } => {
                format!("Your parcel has arrived in Locker {locker_id}.")
            }
            Self::NoCapacity => "No available lockers for a new delivery.".to_string(),
            Self::ParcelApproved { parcel_id } => {
                format!("Parcel {parcel_id} approved and is being moved to a locker.")
            }
            Self::ParcelRejected { parcel_id } => format!("Parcel {parcel_id} was rejected."),
            Self::MemberAdded { name, bonus } => {
                format!("Added {name} to your plan! You received {bonus} bonus credits.")
            }
            Self::MemberUpdated => "Updated member details.".to_string(),
            Self::MemberRemoved => "Removed member from your plan.".to_string(),
            Self::ClientRequestSubmitted => "New client request submitted for review!".to_string(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
