//! Seat rules validation tests.
//!
//! Drive `SeatRulesValidator` end to end against `InMemoryInventory`:
//! snapshot loading, full-group rows, fragmentation and its skip heuristics.
//!
//! Run with: `cargo test --test seat_rules_test`

use std::sync::Arc;

use fake::faker::lorem::en::Words;
use fake::Fake;
use seat_rules::inventory::InMemoryInventory;
use seat_rules::models::{FullGroupRestrictions, RequestedSeats, Seat, SeatsPerPriceCategory};
use seat_rules::rules::ScanStrategy;
use seat_rules::{SeatRuleError, SeatRulesValidator};

const ORG: &str = "org-1";
const PLAN: &str = "spl-1";

fn validator(inventory: &Arc<InMemoryInventory>) -> SeatRulesValidator {
    SeatRulesValidator::new(inventory.clone(), inventory.clone())
}

fn pick(row: &[Seat], nums: &[i32]) -> Vec<Seat> {
    row.iter().filter(|s| nums.contains(&s.num)).cloned().collect()
}

fn request(plan: &str, row_id: &str, seats: Vec<Seat>) -> RequestedSeats {
    let mut request = RequestedSeats::new();
    request.entry(plan.to_string()).or_default().insert(row_id.to_string(), seats);
    request
}

/// Схема из двух рядов по 6 мест одной ценовой категории.
fn two_rows_of_six() -> (Arc<InMemoryInventory>, Vec<Seat>) {
    let inventory = Arc::new(InMemoryInventory::new());
    let first = inventory.add_row(ORG, PLAN, "row-1", 1..=6, Some("pc-1"));
    inventory.add_row(ORG, PLAN, "row-2", 1..=6, Some("pc-1"));
    (inventory, first)
}

#[tokio::test]
async fn snapshot_contains_available_and_requested_seats_per_row() {
    let (inventory, row) = two_rows_of_six();
    let request = request(PLAN, "row-1", row.clone());

    let snapshot = validator(&inventory).load_snapshot(ORG, &request).await.unwrap();

    assert_eq!(snapshot.rows.len(), 1);
    assert_eq!(snapshot.rows[0].available.len(), 6);
    assert_eq!(snapshot.rows[0].requested, row);

    let aggregates = snapshot.plan_aggregates(PLAN);
    assert_eq!(aggregates.available, vec![SeatsPerPriceCategory::new(Some("pc-1"), 12)]);
    assert_eq!(aggregates.all, vec![SeatsPerPriceCategory::new(Some("pc-1"), 12)]);
}

#[tokio::test]
async fn whole_row_booking_passes() {
    let (inventory, row) = two_rows_of_six();

    let result = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", row))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn full_group_restriction_requires_whole_row() {
    let (inventory, row) = two_rows_of_six();
    let title = Words(2..4).fake::<Vec<String>>().join(" ");
    let restrictions = FullGroupRestrictions::from([(PLAN.to_string(), title.clone())]);

    let err = validator(&inventory)
        .validate(ORG, &restrictions, &request(PLAN, "row-1", pick(&row, &[1, 2])))
        .await
        .unwrap_err();
    match err {
        SeatRuleError::FullGroupRestriction { event_title, row } => {
            assert_eq!(event_title, title);
            assert_eq!(row.row_id, "row-1");
        }
        other => panic!("expected full group restriction, got {other:?}"),
    }

    let ok = validator(&inventory)
        .validate(ORG, &restrictions, &request(PLAN, "row-1", row))
        .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn restriction_is_scoped_to_its_seating_plan() {
    let inventory = Arc::new(InMemoryInventory::new());
    let restricted = inventory.add_row(ORG, "spl-a", "row-1", 1..=4, Some("pc-1"));
    let open = inventory.add_row(ORG, "spl-b", "row-1", 1..=4, Some("pc-1"));

    let mut req = request("spl-a", "row-1", restricted);
    req.entry("spl-b".to_string())
        .or_default()
        .insert("row-1".to_string(), pick(&open, &[1, 2]));
    let restrictions = FullGroupRestrictions::from([("spl-a".to_string(), "Premiere".to_string())]);

    assert!(validator(&inventory).validate(ORG, &restrictions, &req).await.is_ok());
}

#[tokio::test]
async fn repeated_seat_does_not_pass_for_whole_row() {
    let (inventory, row) = two_rows_of_six();
    let restrictions = FullGroupRestrictions::from([(PLAN.to_string(), "Premiere".to_string())]);
    let mut seats = pick(&row, &[1, 2, 3, 4, 5]);
    seats.insert(1, row[0].clone());

    let err = validator(&inventory)
        .validate(ORG, &restrictions, &request(PLAN, "row-1", seats))
        .await
        .unwrap_err();

    assert!(matches!(err, SeatRuleError::Inconsistent { seat_num: 1 }));
}

#[tokio::test]
async fn over_request_is_reported_before_anything_else() {
    let (inventory, row) = two_rows_of_six();
    let mut seats = row.clone();
    seats.push(Seat {
        id: "row-1-7".to_string(),
        num: 7,
        ..row[0].clone()
    });

    let err = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", seats))
        .await
        .unwrap_err();

    assert!(matches!(err, SeatRuleError::OverRequest { requested: 7, available: 6, .. }));
}

#[tokio::test]
async fn lone_seat_is_rejected() {
    let (inventory, row) = two_rows_of_six();

    let err = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", pick(&row, &[2, 3])))
        .await
        .unwrap_err();

    assert!(matches!(err, SeatRuleError::Fragmentation { .. }));
    assert_eq!(err.to_string(), "seating plan fragmentation detected");
}

#[tokio::test]
async fn lone_seat_allowed_when_request_is_small_share_of_category() {
    let (inventory, row) = two_rows_of_six();
    // ещё 40 мест той же категории: 2 запрошенных < 10% от 52
    inventory.add_row(ORG, PLAN, "row-3", 1..=40, Some("pc-1"));

    let result = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", pick(&row, &[2, 3])))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn lone_seat_allowed_when_it_is_the_last_of_its_category() {
    let inventory = Arc::new(InMemoryInventory::new());
    let row = inventory.add_row(ORG, PLAN, "row-1", 1..=6, Some("pc-1"));
    for seat in pick(&row, &[4, 5, 6]) {
        inventory.set_available(&seat.id, false);
    }

    // свободны 1-3, бронь 2-3 оставит одно место категории на всю схему
    let result = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", pick(&row, &[2, 3])))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn lone_seat_allowed_when_category_is_sold_out() {
    let inventory = Arc::new(InMemoryInventory::new());
    inventory.add_row(ORG, PLAN, "row-1", [1], Some("pc-b"));
    let row = inventory.add_row(ORG, PLAN, "row-1", 2..=6, Some("pc-a"));
    for seat in pick(&row, &[4, 5, 6]) {
        inventory.set_available(&seat.id, false);
    }

    let result = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", pick(&row, &[2, 3])))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn stale_request_is_inconsistent() {
    let (inventory, row) = two_rows_of_six();
    inventory.set_available("row-1-3", false);

    let err = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", pick(&row, &[3, 4])))
        .await
        .unwrap_err();

    assert!(matches!(err, SeatRuleError::Inconsistent { seat_num: 3 }));
    assert!(!err.is_rule_violation());
}

#[tokio::test]
async fn storage_failure_is_propagated_with_context() {
    let (inventory, row) = two_rows_of_six();
    inventory.fail_plan(PLAN);

    let err = validator(&inventory)
        .validate(ORG, &FullGroupRestrictions::new(), &request(PLAN, "row-1", row))
        .await
        .unwrap_err();

    assert!(matches!(err, SeatRuleError::DataAccess { .. }));
    assert!(err.to_string().starts_with("error while querying seats:"));
}

#[tokio::test]
async fn scan_strategies_agree() {
    let (inventory, row) = two_rows_of_six();
    let req = request(PLAN, "row-1", pick(&row, &[4, 5]));

    for strategy in [ScanStrategy::EveryIndex, ScanStrategy::RunStarts] {
        let err = validator(&inventory)
            .with_scan_strategy(strategy)
            .validate(ORG, &FullGroupRestrictions::new(), &req)
            .await
            .unwrap_err();
        match err {
            SeatRuleError::Fragmentation { conflicting_seat_id } => {
                assert_eq!(conflicting_seat_id.as_deref(), Some("row-1-4"));
            }
            other => panic!("expected fragmentation, got {other:?}"),
        }
    }
}
