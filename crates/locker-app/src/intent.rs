//! # Intents
//!
//! Every mutation a shell can request, as one closed, serializable enum.
//! Scripts of intents replay deterministically against a session with a
//! manual clock.

use serde::{Deserialize, Serialize};

use locker_core::{FacilityError, LockerId, MemberId, Notice, ParcelId};
use locker_state::{Parcel, ParcelStatus, SortDirection, SortKey};

/// Which parcel collection an intent targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelView {
    /// The hub's collection, edited from the admin desk.
    Admin,
    /// The resident's own collection.
    #[default]
    User,
}

impl ParcelView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for ParcelView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParcelView {
    type Err = FacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(FacilityError::Validation(format!(
                "unknown parcel view {other:?}, expected admin or user"
            ))),
        }
    }
}

/// A prospective client's onboarding request. Nothing is stored; the
/// request is checked and acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRequest {
    pub company: String,
    pub contact: String,
    pub email: String,
    #[serde(default)]
    pub requirements: String,
}

impl ClientRequest {
    /// Company, contact, and email must be non-blank.
    pub fn validate(&self) -> Result<(), FacilityError> {
        for (field, value) in [
            ("company", &self.company),
            ("contact", &self.contact),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(FacilityError::Validation(format!(
                    "client request {field} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// A requested mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Toggle the simulated proximity sensor.
    SetNearby { nearby: bool },
    /// Collect the parcel from a locker.
    OpenLocker { locker_id: LockerId },
    /// Place an incoming delivery in the first free locker.
    ReceiveDelivery {
        #[serde(default)]
        label: Option<String>,
    },
    SetParcelStatus {
        #[serde(default)]
        view: ParcelView,
        parcel_id: ParcelId,
        status: ParcelStatus,
    },
    ApproveParcel {
        #[serde(default)]
        view: ParcelView,
        parcel_id: ParcelId,
    },
    RejectParcel {
        #[serde(default)]
        view: ParcelView,
        parcel_id: ParcelId,
    },
    /// A courier announced a new parcel for one collection.
    RecordParcel {
        #[serde(default)]
        view: ParcelView,
        parcel: Parcel,
    },
    /// Select a sort column. Without a direction the same column flips
    /// and a new column starts ascending.
    SortParcels {
        key: SortKey,
        #[serde(default)]
        direction: Option<SortDirection>,
    },
    UpdateBuildOrderQuantity { blueprint: String, quantity: i64 },
    AddMember { name: String },
    EditMember { member_id: MemberId, name: String },
    DeleteMember { member_id: MemberId },
    SubmitClientRequest(ClientRequest),
}

impl Intent {
    /// Short snake_case name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetNearby { .. } => "set_nearby",
            Self::OpenLocker { .. } => "open_locker",
            Self::ReceiveDelivery { .. } => "receive_delivery",
            Self::SetParcelStatus { .. } => "set_parcel_status",
            Self::ApproveParcel { .. } => "approve_parcel",
            Self::RejectParcel { .. } => "reject_parcel",
            Self::RecordParcel { .. } => "record_parcel",
            Self::SortParcels { .. } => "sort_parcels",
            Self::UpdateBuildOrderQuantity { .. } => "update_build_order_quantity",
            Self::AddMember { .. } => "add_member",
            Self::EditMember { .. } => "edit_member",
            Self::DeleteMember { .. } => "delete_member",
            Self::SubmitClientRequest(_) => "submit_client_request",
        }
    }
}

/// Result of an applied intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether any state changed.
    pub applied: bool,
    /// Notice raised, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl Outcome {
    /// State changed, nothing to announce.
    pub fn applied() -> Self {
        Self {
            applied: true,
            notice: None,
        }
    }

    /// Nothing changed.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Attach a notice.
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
