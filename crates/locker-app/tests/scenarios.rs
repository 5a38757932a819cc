//! End-to-end behaviour of a facility session against seed data.

use locker_app::{Facility, FacilityConfig, Outcome, ParcelView, Seed};
use locker_bom::Units;
use locker_core::{Clock, FacilityError, LockerId, ManualClock, MemberId, Notice, ParcelId, Timestamp};
use locker_state::{LockerStatus, ParcelBucket, ParcelStatus, SortKey, TransitionPolicy};

fn clock() -> ManualClock {
    ManualClock::new(Timestamp::parse_fixture("2024-07-22 11:00 AM").unwrap())
}

fn builtin(config: FacilityConfig) -> (Facility, ManualClock) {
    let clock = clock();
    let facility = Facility::new(Seed::builtin().unwrap(), config, Box::new(clock.clone())).unwrap();
    (facility, clock)
}

fn pid(s: &str) -> ParcelId {
    ParcelId::new(s).unwrap()
}

#[test]
fn test_two_locker_delivery_and_collection() {
    let seed = Seed::from_yaml(
        r#"
lockers:
  - { id: 1, status: available }
  - { id: 2, status: occupied_by_user, parcel_info: Earlier Parcel }
"#,
    )
    .unwrap();
    let clock = clock();
    let mut f = Facility::new(seed, FacilityConfig::default(), Box::new(clock)).unwrap();

    f.receive_delivery(None).unwrap();
    let locker = f.lockers().get(LockerId(1)).unwrap();
    assert_eq!(locker.status(), LockerStatus::OccupiedByUser);
    assert_eq!(locker.parcel_info(), Some("New Amazon Parcel"));

    assert!(f.open_locker(LockerId(1)).is_err());
    assert_eq!(
        f.lockers().get(LockerId(1)).unwrap().status(),
        LockerStatus::OccupiedByUser
    );

    f.set_nearby(true);
    f.open_locker(LockerId(1)).unwrap();
    let locker = f.lockers().get(LockerId(1)).unwrap();
    assert_eq!(locker.status(), LockerStatus::Available);
    assert_eq!(locker.parcel_info(), None);
    assert_eq!(f.lockers().transitions().len(), 2);
}

#[test]
fn test_deliveries_fill_lowest_ids_then_report_capacity() {
    let (mut f, _) = builtin(FacilityConfig::default());
    let mut placed = Vec::new();
    for _ in 0..4 {
        match f.receive_delivery(Some("Box")).unwrap().notice {
            Some(Notice::DeliveryArrived { locker_id }) => placed.push(locker_id.get()),
            other => panic!("unexpected notice {other:?}"),
        }
    }
    assert_eq!(placed, vec![2, 6, 9, 10]);

    let before = f.lockers().summary();
    let outcome = f.receive_delivery(Some("Box")).unwrap();
    assert_eq!(outcome, Outcome::unchanged().with_notice(Notice::NoCapacity));
    assert_eq!(f.lockers().summary(), before);
    assert_eq!(
        f.active_notification().unwrap().message(),
        "No available lockers for a new delivery."
    );
}

#[test]
fn test_open_refused_on_other_tenants_locker() {
    let (mut f, _) = builtin(FacilityConfig::default());
    f.set_nearby(true);
    assert!(!f.can_open(LockerId(3)));
    let err = f.open_locker(LockerId(3)).unwrap_err();
    assert!(matches!(err, FacilityError::InvalidTransition(_)));
    assert!(matches!(
        f.open_locker(LockerId(99)).unwrap_err(),
        FacilityError::NotFound(_)
    ));
}

#[test]
fn test_approve_and_reject_in_user_view() {
    let (mut f, clock) = builtin(FacilityConfig::default());
    assert!(f.can_review(ParcelView::User, &pid("UNX-001A")));

    let outcome = f.approve_parcel(ParcelView::User, &pid("UNX-001A")).unwrap();
    assert_eq!(
        outcome.notice.unwrap().message(),
        "Parcel UNX-001A approved and is being moved to a locker."
    );
    let parcel = f.parcels(ParcelView::User).get(&pid("UNX-001A")).unwrap();
    assert_eq!(parcel.status, ParcelStatus::InLocker);
    assert_eq!(parcel.last_update, clock.now());

    clock.advance_secs(60);
    let outcome = f.reject_parcel(ParcelView::User, &pid("FRN-002C")).unwrap();
    assert_eq!(
        outcome.notice.unwrap().message(),
        "Parcel FRN-002C was rejected."
    );

    // Neither parcel awaits review any more.
    assert!(!f.can_review(ParcelView::User, &pid("UNX-001A")));
    assert!(f.approve_parcel(ParcelView::User, &pid("UNX-001A")).is_err());
}

#[test]
fn test_status_change_without_notice() {
    let (mut f, _) = builtin(FacilityConfig::default());
    let outcome = f
        .set_parcel_status(ParcelView::Admin, &pid("AMZ-334N"), ParcelStatus::Sanitizing)
        .unwrap();
    assert!(outcome.applied);
    assert_eq!(outcome.notice, None);
    assert!(f.active_notification().is_none());
}

#[test]
fn test_permissive_policy_allows_any_transition() {
    let (mut f, _) = builtin(FacilityConfig::default());
    f.set_parcel_status(ParcelView::Admin, &pid("BLU-112M"), ParcelStatus::Upcoming)
        .unwrap();
    assert_eq!(
        f.parcels(ParcelView::Admin).get(&pid("BLU-112M")).unwrap().status,
        ParcelStatus::Upcoming
    );
}

#[test]
fn test_strict_policy_rejects_leaving_terminal_state() {
    let config = FacilityConfig {
        transition_policy: TransitionPolicy::Strict,
        ..FacilityConfig::default()
    };
    let (mut f, _) = builtin(config);
    let err = f
        .set_parcel_status(ParcelView::Admin, &pid("BLU-112M"), ParcelStatus::InLocker)
        .unwrap_err();
    assert!(matches!(err, FacilityError::InvalidTransition(_)));
    assert_eq!(
        f.parcels(ParcelView::Admin).get(&pid("BLU-112M")).unwrap().status,
        ParcelStatus::Delivered
    );

    f.set_parcel_status(ParcelView::Admin, &pid("AMZ-334N"), ParcelStatus::Sanitizing)
        .unwrap();
    f.set_parcel_status(ParcelView::Admin, &pid("AMZ-334N"), ParcelStatus::InLocker)
        .unwrap();
}

#[test]
fn test_bucket_partition_of_user_parcels() {
    let (f, _) = builtin(FacilityConfig::default());
    let buckets = f.parcel_buckets(ParcelView::User);
    assert_eq!(buckets.len(), f.parcels(ParcelView::User).parcels().len());

    let ids = |b: ParcelBucket| -> Vec<String> {
        buckets
            .bucket(b)
            .iter()
            .map(|p| p.id.as_str().to_string())
            .collect()
    };
    // Newest first within each bucket.
    assert_eq!(ids(ParcelBucket::AwaitingApproval), vec!["FRN-002C", "UNX-001A"]);
    assert_eq!(ids(ParcelBucket::Upcoming), vec!["MYN-451B"]);
    assert_eq!(ids(ParcelBucket::InLocker), vec!["AMZ-834J", "ZOM-556L"]);
    assert_eq!(ids(ParcelBucket::History), vec!["BLD-112M"]);
}

#[test]
fn test_sort_toggle_reverses_sender_order() {
    let (mut f, _) = builtin(FacilityConfig::default());
    f.sort_parcels(SortKey::Sender, None);
    let ascending: Vec<String> = f
        .sorted_parcels(ParcelView::User)
        .into_iter()
        .map(|p| p.sender)
        .collect();
    assert_eq!(
        ascending,
        vec!["Amazon", "BlueDart", "Ferns N Petals", "Myntra", "Unknown Courier", "Zomato"]
    );

    f.sort_parcels(SortKey::Sender, None);
    let descending: Vec<String> = f
        .sorted_parcels(ParcelView::User)
        .into_iter()
        .map(|p| p.sender)
        .collect();
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn test_family_bonus_and_asymmetric_delete() {
    let (mut f, _) = builtin(FacilityConfig::default());
    assert_eq!(f.credits(), 12);

    let outcome = f.add_member("Grandma").unwrap();
    assert_eq!(
        outcome.notice.unwrap().message(),
        "Added Grandma to your plan! You received 5 bonus credits."
    );
    assert_eq!(f.credits(), 17);
    let grandma = f.family().members().last().unwrap().id;
    assert_eq!(grandma, MemberId(3));

    f.edit_member(grandma, "Nana").unwrap();
    assert_eq!(f.family().get(grandma).unwrap().name, "Nana");

    assert!(f.delete_member(grandma).applied);
    assert!(!f.delete_member(grandma).applied);
    assert_eq!(f.credits(), 17);
    assert_eq!(f.family().members().len(), 2);
}

#[test]
fn test_blank_member_name_changes_nothing() {
    let (mut f, _) = builtin(FacilityConfig::default());
    let err = f.add_member("   ").unwrap_err();
    assert!(matches!(err, FacilityError::Validation(_)));
    assert_eq!(f.credits(), 12);
    assert!(f.edit_member(MemberId(1), "").is_err());
    assert_eq!(f.family().get(MemberId(1)).unwrap().name, "Spouse");
    assert_eq!(
        f.edit_member(MemberId(42), "Ghost").unwrap(),
        Outcome::unchanged()
    );
}

#[test]
fn test_large_build_order_reports_shortfall_only() {
    let (mut f, _) = builtin(FacilityConfig::default());
    f.update_build_order_quantity("Hot/Cold Unit", 200);
    let bom = f.required_bom();
    assert_eq!(bom.sheet_metal(), Some(Units::whole(600)));
    assert_eq!(bom.get("Temp Modules"), Some(Units::whole(1200)));

    let short = f.shortfalls();
    let items: Vec<&str> = short.iter().map(|s| s.item.as_str()).collect();
    assert_eq!(items, vec!["Sheet Metal", "Temp Modules"]);
    assert_eq!(short[1].missing, Units::whole(1000));
    assert_eq!(f.inventory().available("Temp Modules"), Units::whole(200));
}
