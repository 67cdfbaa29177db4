use std::collections::BTreeMap;

use crate::models::{PlanAggregates, Seat};

/// Когда проверку фрагментации можно не делать.
///
/// По каждой ценовой категории запрошенных мест ряда (места без категории не
/// учитываются) пропускаем проверку, если хотя бы для одной категории:
/// - запрошено меньше 10% всех мест категории в схеме зала;
/// - после брони останется ровно одно свободное место категории;
/// - бронь выкупает категорию целиком.
pub fn skip_fragmentation_check(requested: &[Seat], aggregates: &PlanAggregates) -> bool {
    let mut requested_per_category: BTreeMap<&str, i64> = BTreeMap::new();
    for seat in requested {
        if let Some(category) = seat.price_category_id.as_deref() {
            *requested_per_category.entry(category).or_default() += 1;
        }
    }

    requested_per_category.into_iter().any(|(category, count)| {
        // без агрегата по свободным местам категория не рассматривается
        let Some(available) = aggregates.available_count(category) else {
            return false;
        };
        let total = aggregates.total_count(category).unwrap_or(0);

        (count as f64) < (total as f64) / 10.0 || count == available - 1 || count == available
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeatsPerPriceCategory;
    use crate::rules::test_support::priced;

    fn aggregates(available: i64, total: i64) -> PlanAggregates {
        PlanAggregates {
            available: vec![SeatsPerPriceCategory::new(Some("pc-1"), available)],
            all: vec![SeatsPerPriceCategory::new(Some("pc-1"), total)],
        }
    }

    fn two_requested() -> Vec<Seat> {
        vec![priced(2, "pc-1"), priced(3, "pc-1")]
    }

    #[test]
    fn small_share_of_category_skips() {
        assert!(skip_fragmentation_check(&two_requested(), &aggregates(4, 45)));
        assert!(!skip_fragmentation_check(&two_requested(), &aggregates(4, 19)));
    }

    #[test]
    fn exactly_ten_percent_does_not_skip() {
        assert!(!skip_fragmentation_check(&two_requested(), &aggregates(10, 20)));
        assert!(skip_fragmentation_check(&two_requested(), &aggregates(10, 21)));
    }

    #[test]
    fn one_seat_left_in_category_skips() {
        assert!(skip_fragmentation_check(&two_requested(), &aggregates(3, 5)));
        // остаётся два места: проверку не пропускаем
        assert!(!skip_fragmentation_check(&two_requested(), &aggregates(4, 5)));
    }

    #[test]
    fn last_seats_in_category_skip() {
        assert!(skip_fragmentation_check(&two_requested(), &aggregates(2, 2)));
    }

    #[test]
    fn seats_without_category_are_ignored() {
        let requested = vec![crate::rules::test_support::seat(1), crate::rules::test_support::seat(2)];
        let aggregates = PlanAggregates {
            available: vec![SeatsPerPriceCategory::new(None, 2)],
            all: vec![SeatsPerPriceCategory::new(None, 100)],
        };

        assert!(!skip_fragmentation_check(&requested, &aggregates));
    }

    #[test]
    fn any_qualifying_category_is_enough() {
        let requested = vec![priced(1, "pc-1"), priced(2, "pc-1"), priced(3, "pc-2")];
        let aggregates = PlanAggregates {
            available: vec![
                SeatsPerPriceCategory::new(Some("pc-1"), 10),
                SeatsPerPriceCategory::new(Some("pc-2"), 1),
            ],
            all: vec![
                SeatsPerPriceCategory::new(Some("pc-1"), 12),
                SeatsPerPriceCategory::new(Some("pc-2"), 4),
            ],
        };

        assert!(skip_fragmentation_check(&requested, &aggregates));
    }

    #[test]
    fn category_missing_from_available_aggregate_does_not_skip() {
        let aggregates = PlanAggregates {
            available: vec![],
            all: vec![SeatsPerPriceCategory::new(Some("pc-1"), 1000)],
        };

        assert!(!skip_fragmentation_check(&two_requested(), &aggregates));
    }
}
