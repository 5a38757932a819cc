//! # Parcel Views
//!
//! Pure, derived views over a parcel collection: display buckets and the
//! sortable list. Nothing here is cached; callers recompute on every read.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::parcel::Parcel;

// ─── Buckets ─────────────────────────────────────────────────────────

/// Display section a parcel is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelBucket {
    /// Needs the resident's decision.
    AwaitingApproval,
    /// Not yet in a locker.
    Upcoming,
    /// Ready for collection.
    InLocker,
    /// Delivered or returned.
    History,
}

impl ParcelBucket {
    /// Buckets in display order.
    pub fn all() -> &'static [ParcelBucket] {
        &[Self::AwaitingApproval, Self::Upcoming, Self::InLocker, Self::History]
    }

    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::AwaitingApproval => "Awaiting Your Approval",
            Self::Upcoming => "Upcoming Deliveries",
            Self::InLocker => "Ready for Pickup",
            Self::History => "History",
        }
    }
}

/// A collection split into its four display buckets, preserving the
/// input order inside each bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelBuckets {
    /// Parcels awaiting approval.
    pub awaiting_approval: Vec<Parcel>,
    /// Parcels on their way.
    pub upcoming: Vec<Parcel>,
    /// Parcels ready for collection.
    pub in_locker: Vec<Parcel>,
    /// Delivered and returned parcels.
    pub history: Vec<Parcel>,
}

impl ParcelBuckets {
    /// Partition parcels by their current status.
    pub fn partition<'a>(parcels: impl IntoIterator<Item = &'a Parcel>) -> Self {
        let mut buckets = Self::default();
        for parcel in parcels {
            buckets.bucket_mut(parcel.status.bucket()).push(parcel.clone());
        }
        buckets
    }

    /// Parcels in one bucket.
    pub fn bucket(&self, bucket: ParcelBucket) -> &[Parcel] {
        match bucket {
            ParcelBucket::AwaitingApproval => &self.awaiting_approval,
            ParcelBucket::Upcoming => &self.upcoming,
            ParcelBucket::InLocker => &self.in_locker,
            ParcelBucket::History => &self.history,
        }
    }

    /// Total parcels across all buckets.
    pub fn len(&self) -> usize {
        ParcelBucket::all().iter().map(|b| self.bucket(*b).len()).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, bucket: ParcelBucket) -> &mut Vec<Parcel> {
        match bucket {
            ParcelBucket::AwaitingApproval => &mut self.awaiting_approval,
            ParcelBucket::Upcoming => &mut self.upcoming,
            ParcelBucket::InLocker => &mut self.in_locker,
            ParcelBucket::History => &mut self.history,
        }
    }
}

// ─── Sorting ─────────────────────────────────────────────────────────

/// Column a parcel list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Sender name, collated: letters compare case-insensitively first,
    /// and only an otherwise equal pair is ordered lowercase first.
    Sender,
    /// Time of last status change, chronological.
    LastUpdate,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current sort selection of a parcel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
    /// Column.
    pub key: SortKey,
    /// Direction.
    pub direction: SortDirection,
}

impl Default for SortOrder {
    /// Newest first.
    fn default() -> Self {
        Self {
            key: SortKey::LastUpdate,
            direction: SortDirection::Descending,
        }
    }
}

impl SortOrder {
    /// Ascending order on `key`.
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Select a column: the same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.reversed(),
            }
        } else {
            Self::ascending(key)
        }
    }

    /// Compare two parcels under this order.
    pub fn compare(&self, a: &Parcel, b: &Parcel) -> Ordering {
        let ordering = match self.key {
            SortKey::Sender => collate(&a.sender, &b.sender),
            SortKey::LastUpdate => a.last_update.cmp(&b.last_update),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Locale-style string order: case-folded text first, then a tertiary
/// pass where lowercase precedes uppercase at the first differing letter.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

/// Stable sort of a parcel list.
pub fn sort_parcels<'a>(parcels: impl IntoIterator<Item = &'a Parcel>, order: SortOrder) -> Vec<Parcel> {
    let mut sorted: Vec<Parcel> = parcels.into_iter().cloned().collect();
    sorted.sort_by(|a, b| order.compare(a, b));
    sorted
}
