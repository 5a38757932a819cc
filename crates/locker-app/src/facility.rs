//! # Facility Session
//!
//! Owns every snapshot of one simulated facility: the locker bank, both
//! parcel collections, the family plan, the build order, and the reference
//! catalogs. Each operation runs to completion on `&mut self` and validates
//! before it mutates, so a caller never observes a half-applied change.
//!
//! ## Refusals
//!
//! Conditions the product treats as non-fatal never surface as errors:
//!
//! - no free locker: the delivery is dropped and a notice says so;
//! - unknown parcel or member ids: nothing happens.
//!
//! Requests the shell should never have offered (opening a locker while
//! away, approving a parcel that is not awaiting approval, a strict-policy
//! violation, a blank name) are returned as [`FacilityError`]s, again
//! without mutation.

use locker_bom::{
    compute_bom, BlueprintCatalog, BuildOrder, Inventory, RequiredBom, Shortfall,
};
use locker_core::{Clock, FacilityError, LockerId, MemberId, Notice, ParcelId, Plan, Timestamp};
use locker_state::{
    sort_parcels, FamilyPlan, LockerBank, LockerError, Parcel, ParcelBuckets, ParcelError,
    ParcelLedger, ParcelStatus, SortDirection, SortKey, SortOrder,
};

use crate::config::FacilityConfig;
use crate::intent::{ClientRequest, Intent, Outcome, ParcelView};
use crate::notification::{Notification, NotificationSlot};
use crate::seed::Seed;

/// One facility session.
#[derive(Debug)]
pub struct Facility {
    config: FacilityConfig,
    clock: Box<dyn Clock>,
    lockers: LockerBank,
    admin_parcels: ParcelLedger,
    user_parcels: ParcelLedger,
    family: FamilyPlan,
    plans: Vec<Plan>,
    blueprints: BlueprintCatalog,
    inventory: Inventory,
    build_order: BuildOrder,
    nearby: bool,
    sort_order: SortOrder,
    notification: NotificationSlot,
}

impl Facility {
    /// Build a session from seed data.
    pub fn new(
        seed: Seed,
        config: FacilityConfig,
        clock: Box<dyn Clock>,
    ) -> Result<Self, FacilityError> {
        seed.validate()?;
        let policy = config.transition_policy;
        let facility = Self {
            lockers: LockerBank::new(seed.lockers)?,
            admin_parcels: ParcelLedger::new(seed.admin_parcels, policy)?,
            user_parcels: ParcelLedger::new(seed.user_parcels, policy)?,
            family: FamilyPlan::new(seed.family_members, seed.credits)?,
            plans: seed.plans,
            blueprints: seed.blueprints,
            inventory: seed.inventory,
            build_order: BuildOrder::new(),
            nearby: false,
            sort_order: SortOrder::default(),
            notification: NotificationSlot::new(config.notification_ttl_secs),
            config,
            clock,
        };
        tracing::debug!(
            lockers = facility.lockers.len(),
            admin_parcels = facility.admin_parcels.parcels().len(),
            user_parcels = facility.user_parcels.parcels().len(),
            policy = ?policy,
            "facility session created"
        );
        Ok(facility)
    }

    /// Build a session from the seed the configuration names, or the
    /// built-in fixtures.
    pub fn from_config(config: FacilityConfig, clock: Box<dyn Clock>) -> Result<Self, FacilityError> {
        let seed = Seed::load_or_builtin(config.seed.as_deref())?;
        Self::new(seed, config, clock)
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Configuration the session was opened with.
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Current time according to the session clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// The locker bank.
    pub fn lockers(&self) -> &LockerBank {
        &self.lockers
    }

    /// Proximity sensor state.
    pub fn is_nearby(&self) -> bool {
        self.nearby
    }

    /// Whether the open action is offered for a locker right now.
    pub fn can_open(&self, id: LockerId) -> bool {
        self.lockers.can_open(id, self.nearby)
    }

    /// One parcel collection.
    pub fn parcels(&self, view: ParcelView) -> &ParcelLedger {
        match view {
            ParcelView::Admin => &self.admin_parcels,
            ParcelView::User => &self.user_parcels,
        }
    }

    /// Current sort selection of the resident's parcel list.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// A collection under the current sort order.
    pub fn sorted_parcels(&self, view: ParcelView) -> Vec<Parcel> {
        sort_parcels(self.parcels(view).parcels(), self.sort_order)
    }

    /// A collection split into display buckets, each in sort order.
    pub fn parcel_buckets(&self, view: ParcelView) -> ParcelBuckets {
        let sorted = self.sorted_parcels(view);
        let buckets = ParcelBuckets::partition(&sorted);
        tracing::debug!(
            view = %view,
            awaiting_approval = buckets.awaiting_approval.len(),
            upcoming = buckets.upcoming.len(),
            in_locker = buckets.in_locker.len(),
            history = buckets.history.len(),
            "parcel buckets computed"
        );
        buckets
    }

    /// Whether approve/reject is offered for a parcel.
    pub fn can_review(&self, view: ParcelView, id: &ParcelId) -> bool {
        self.parcels(view).can_review(id)
    }

    /// Members and credit balance.
    pub fn family(&self) -> &FamilyPlan {
        &self.family
    }

    /// Parcel credit balance.
    pub fn credits(&self) -> u32 {
        self.family.credits()
    }

    /// Subscription plan catalog.
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Tower blueprints available to order.
    pub fn blueprints(&self) -> &BlueprintCatalog {
        &self.blueprints
    }

    /// Stock ceiling for shortfall reports.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Quantities requested so far.
    pub fn build_order(&self) -> &BuildOrder {
        &self.build_order
    }

    /// Bill of materials for the current build order.
    pub fn required_bom(&self) -> RequiredBom {
        compute_bom(&self.build_order, &self.blueprints)
    }

    /// Components the current build order needs beyond stock.
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        self.inventory.shortfalls(&self.required_bom())
    }

    /// The visible notice, if any has not yet expired.
    pub fn active_notification(&self) -> Option<&Notification> {
        self.notification.active(self.clock.now())
    }

    /// Drop the notice if it has expired.
    pub fn clear_expired_notification(&mut self) -> bool {
        self.notification.clear_expired(self.clock.now())
    }

    // ── Lockers ─────────────────────────────────────────────────────

    /// Toggle the simulated proximity sensor.
    pub fn set_nearby(&mut self, nearby: bool) -> Outcome {
        if self.nearby == nearby {
            return Outcome::unchanged();
        }
        self.nearby = nearby;
        tracing::info!(nearby, "proximity changed");
        Outcome::applied()
    }

    /// Collect the resident's parcel from a locker.
    pub fn open_locker(&mut self, id: LockerId) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        match self.lockers.open(id, self.nearby, now) {
            Ok(label) => {
                tracing::info!(locker_id = %id, parcel_info = %label, "locker opened");
                Ok(Outcome::applied())
            }
            Err(e) => {
                tracing::warn!(locker_id = %id, nearby = self.nearby, "open refused: {e}");
                Err(e.into())
            }
        }
    }

    /// Place an incoming delivery in the lowest-numbered free locker.
    ///
    /// `label` falls back to the configured delivery label.
    pub fn receive_delivery(&mut self, label: Option<&str>) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        let label = label.unwrap_or(&self.config.delivery_label).to_string();
        match self.lockers.receive_delivery(&label, now) {
            Ok(locker_id) => {
                tracing::info!(locker_id = %locker_id, parcel_info = %label, "delivery placed");
                Ok(self.announce(
                    Outcome::applied().with_notice(Notice::DeliveryArrived { locker_id }),
                    now,
                ))
            }
            Err(LockerError::NoCapacity) => {
                tracing::warn!(parcel_info = %label, "no available locker for delivery");
                Ok(self.announce(Outcome::unchanged().with_notice(Notice::NoCapacity), now))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Parcels ─────────────────────────────────────────────────────

    /// Change a parcel's status in one collection.
    pub fn set_parcel_status(
        &mut self,
        view: ParcelView,
        id: &ParcelId,
        status: ParcelStatus,
    ) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        let result = self.ledger_mut(view).set_status(id, status, now);
        self.parcel_outcome(view, id, "status changed", result, now)
    }

    /// Accept a parcel awaiting approval.
    pub fn approve_parcel(&mut self, view: ParcelView, id: &ParcelId) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        let result = self.ledger_mut(view).approve(id, now);
        self.parcel_outcome(view, id, "parcel approved", result, now)
    }

    /// Refuse a parcel awaiting approval.
    pub fn reject_parcel(&mut self, view: ParcelView, id: &ParcelId) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        let result = self.ledger_mut(view).reject(id, now);
        self.parcel_outcome(view, id, "parcel rejected", result, now)
    }

    /// Add a parcel announced by a courier to one collection.
    ///
    /// The tracking code must be new to that collection and a `locker_id`,
    /// when given, must name a locker in the bank.
    pub fn record_parcel(
        &mut self,
        view: ParcelView,
        parcel: Parcel,
    ) -> Result<Outcome, FacilityError> {
        if let Some(locker_id) = parcel.locker_id {
            if self.lockers.get(locker_id).is_none() {
                tracing::warn!(
                    view = %view,
                    parcel_id = %parcel.id,
                    locker_id = %locker_id,
                    "parcel names an unknown locker"
                );
                return Err(FacilityError::Validation(format!(
                    "parcel {} references unknown locker {locker_id}",
                    parcel.id
                )));
            }
        }
        let id = parcel.id.clone();
        let status = parcel.status;
        self.ledger_mut(view).insert(parcel).map_err(|e| {
            tracing::warn!(view = %view, parcel_id = %id, "parcel not recorded: {e}");
            match e {
                ParcelError::DuplicateId(_) => FacilityError::Validation(e.to_string()),
                other => other.into(),
            }
        })?;
        tracing::info!(view = %view, parcel_id = %id, status = ?status, "parcel recorded");
        Ok(Outcome::applied())
    }

    /// Select the sort column, flipping direction on a repeat selection
    /// unless one is given.
    pub fn sort_parcels(&mut self, key: SortKey, direction: Option<SortDirection>) -> Outcome {
        let next = match direction {
            Some(direction) => SortOrder { key, direction },
            None => self.sort_order.toggle(key),
        };
        if next == self.sort_order {
            return Outcome::unchanged();
        }
        self.sort_order = next;
        tracing::debug!(key = ?next.key, direction = ?next.direction, "parcel sort changed");
        Outcome::applied()
    }

    fn ledger_mut(&mut self, view: ParcelView) -> &mut ParcelLedger {
        match view {
            ParcelView::Admin => &mut self.admin_parcels,
            ParcelView::User => &mut self.user_parcels,
        }
    }

    fn parcel_outcome(
        &mut self,
        view: ParcelView,
        id: &ParcelId,
        action: &str,
        result: Result<Option<Notice>, ParcelError>,
        now: Timestamp,
    ) -> Result<Outcome, FacilityError> {
        match result {
            Ok(notice) => {
                let status = self.parcels(view).get(id).map(|p| p.status);
                tracing::info!(view = %view, parcel_id = %id, status = ?status, "{action}");
                let outcome = Outcome {
                    applied: true,
                    notice,
                };
                Ok(self.announce(outcome, now))
            }
            Err(ParcelError::NotFound(_)) => {
                tracing::warn!(view = %view, parcel_id = %id, "parcel not found, ignoring");
                Ok(Outcome::unchanged())
            }
            Err(e) => {
                tracing::warn!(view = %view, parcel_id = %id, "parcel change refused: {e}");
                Err(e.into())
            }
        }
    }

    // ── Build order ─────────────────────────────────────────────────

    /// Set a blueprint's requested quantity, clamped to zero or more.
    pub fn update_build_order_quantity(&mut self, blueprint: &str, quantity: i64) -> Outcome {
        let before = self.build_order.quantity(blueprint);
        let stored = self.build_order.set_quantity(blueprint, quantity);
        if self.blueprints.get(blueprint).is_none() {
            tracing::warn!(blueprint, "build order names a blueprint not in the catalog");
        }
        tracing::info!(blueprint, requested = quantity, stored, "build order updated");
        if before == stored {
            Outcome::unchanged()
        } else {
            Outcome::applied()
        }
    }

    // ── Family ──────────────────────────────────────────────────────

    /// Add a member and grant the bonus credits.
    pub fn add_member(&mut self, name: &str) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        let (member, notice) = self.family.add_member(name).map_err(|e| {
            tracing::warn!("add member refused: {e}");
            FacilityError::from(e)
        })?;
        tracing::info!(
            member_id = %member.id,
            name = %member.name,
            credits = self.family.credits(),
            "member added"
        );
        Ok(self.announce(Outcome::applied().with_notice(notice), now))
    }

    /// Rename a member. Unknown ids are ignored.
    pub fn edit_member(&mut self, id: MemberId, name: &str) -> Result<Outcome, FacilityError> {
        let now = self.clock.now();
        match self.family.edit_member(id, name) {
            Ok(notice) => {
                tracing::info!(member_id = %id, "member renamed");
                Ok(self.announce(Outcome::applied().with_notice(notice), now))
            }
            Err(locker_state::FamilyError::NotFound(_)) => {
                tracing::warn!(member_id = %id, "member not found, ignoring");
                Ok(Outcome::unchanged())
            }
            Err(e) => {
                tracing::warn!(member_id = %id, "edit member refused: {e}");
                Err(e.into())
            }
        }
    }

    /// Remove a member. Idempotent; credits are kept.
    pub fn delete_member(&mut self, id: MemberId) -> Outcome {
        let now = self.clock.now();
        if !self.family.delete_member(id) {
            tracing::debug!(member_id = %id, "member already absent");
            return Outcome::unchanged();
        }
        tracing::info!(member_id = %id, credits = self.family.credits(), "member removed");
        self.announce(Outcome::applied().with_notice(Notice::MemberRemoved), now)
    }

    // ── Client intake ───────────────────────────────────────────────

    /// Acknowledge a client onboarding request. Nothing is stored.
    pub fn submit_client_request(&mut self, request: &ClientRequest) -> Result<Outcome, FacilityError> {
        request.validate()?;
        let now = self.clock.now();
        tracing::info!(company = %request.company, "client request submitted");
        Ok(self.announce(
            Outcome::unchanged().with_notice(Notice::ClientRequestSubmitted),
            now,
        ))
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Apply one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, FacilityError> {
        tracing::debug!(intent = intent.kind(), "dispatching intent");
        match intent {
            Intent::SetNearby { nearby } => Ok(self.set_nearby(nearby)),
            Intent::OpenLocker { locker_id } => self.open_locker(locker_id),
            Intent::ReceiveDelivery { label } => self.receive_delivery(label.as_deref()),
            Intent::SetParcelStatus {
                view,
                parcel_id,
                status,
            } => self.set_parcel_status(view, &parcel_id, status),
            Intent::ApproveParcel { view, parcel_id } => self.approve_parcel(view, &parcel_id),
            Intent::RejectParcel { view, parcel_id } => self.reject_parcel(view, &parcel_id),
            Intent::RecordParcel { view, parcel } => self.record_parcel(view, parcel),
            Intent::SortParcels { key, direction } => Ok(self.sort_parcels(key, direction)),
            Intent::UpdateBuildOrderQuantity {
                blueprint,
                quantity,
            } => Ok(self.update_build_order_quantity(&blueprint, quantity)),
            Intent::AddMember { name } => self.add_member(&name),
            Intent::EditMember { member_id, name } => self.edit_member(member_id, &name),
            Intent::DeleteMember { member_id } => Ok(self.delete_member(member_id)),
            Intent::SubmitClientRequest(request) => self.submit_client_request(&request),
        }
    }

    fn announce(&mut self, outcome: Outcome, now: Timestamp) -> Outcome {
        if let Some(notice) = &outcome.notice {
            self.notification.raise(notice.clone(), now);
        }
        outcome
    }
}
