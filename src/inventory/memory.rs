use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::{PriceCategoryAggregator, RowSeatsLoader};
use crate::error::InventoryError;
use crate::models::{PriceCategoryScope, Seat, SeatsPerPriceCategory};

#[derive(Debug, Clone)]
struct StoredSeat {
    org_id: String,
    seating_plan_id: String,
    seat: Seat,
    available: bool,
}

/// Инвентарь в памяти: для тестов и локальных прогонов без Postgres.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    seats: RwLock<Vec<StoredSeat>>,
    failing_plans: RwLock<HashSet<String>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_seat(&self, org_id: &str, seating_plan_id: &str, seat: Seat, available: bool) {
        self.seats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredSeat {
                org_id: org_id.to_string(),
                seating_plan_id: seating_plan_id.to_string(),
                seat,
                available,
            });
    }

    /// Добавляет свободный ряд с номерами `nums`; id мест вида `{row_id}-{num}`.
    pub fn add_row(
        &self,
        org_id: &str,
        seating_plan_id: &str,
        row_id: &str,
        nums: impl IntoIterator<Item = i32>,
        price_category_id: Option<&str>,
    ) -> Vec<Seat> {
        nums.into_iter()
            .map(|num| {
                let seat = Seat {
                    id: format!("{row_id}-{num}"),
                    row_id: row_id.to_string(),
                    num,
                    price_category_id: price_category_id.map(str::to_string),
                    linked_seat_id: None,
                };
                self.add_seat(org_id, seating_plan_id, seat.clone(), true);
                seat
            })
            .collect()
    }

    pub fn set_available(&self, seat_id: &str, available: bool) {
        let mut seats = self.seats.write().unwrap_or_else(PoisonError::into_inner);
        for stored in seats.iter_mut().filter(|s| s.seat.id == seat_id) {
            stored.available = available;
        }
    }

    /// Все чтения по этой схеме зала будут падать.
    pub fn fail_plan(&self, seating_plan_id: &str) {
        self.failing_plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(seating_plan_id.to_string());
    }

    fn ensure_reachable(&self, seating_plan_id: &str) -> Result<(), InventoryError> {
        let failing = self.failing_plans.read().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(seating_plan_id) {
            return Err(InventoryError::Unavailable(format!(
                "seating plan {seating_plan_id} is not reachable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RowSeatsLoader for InMemoryInventory {
    async fn load_row_seats(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        row_id: &str,
    ) -> Result<Vec<Seat>, InventoryError> {
        self.ensure_reachable(seating_plan_id)?;

        let seats = self.seats.read().unwrap_or_else(PoisonError::into_inner);
        let mut row: Vec<Seat> = seats
            .iter()
            .filter(|s| {
                s.available
                    && s.org_id == org_id
                    && s.seating_plan_id == seating_plan_id
                    && s.seat.row_id == row_id
            })
            .map(|s| s.seat.clone())
            .collect();
        row.sort_by_key(|s| s.num);
        Ok(row)
    }
}

#[async_trait]
impl PriceCategoryAggregator for InMemoryInventory {
    async fn load_price_category_aggregates(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        scope: PriceCategoryScope,
    ) -> Result<Vec<SeatsPerPriceCategory>, InventoryError> {
        self.ensure_reachable(seating_plan_id)?;

        let seats = self.seats.read().unwrap_or_else(PoisonError::into_inner);
        let mut counts: BTreeMap<Option<String>, i64> = BTreeMap::new();
        for stored in seats.iter().filter(|s| {
            s.org_id == org_id
                && s.seating_plan_id == seating_plan_id
                && (!scope.only_available() || s.available)
        }) {
            *counts.entry(stored.seat.price_category_id.clone()).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(price_category_id, count)| SeatsPerPriceCategory { price_category_id, count })
            .collect())
    }
}
