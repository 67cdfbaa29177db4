//! Синхронное ядро проверки правил рассадки.
//!
//! Никакого I/O: всё, что нужно, приходит готовым снимком `ValidationSnapshot`.
//! Загрузку снимка делает `services::seat_rules`.

pub mod fragmentation;
pub mod group;
pub mod mapping;
pub mod skip;

use std::collections::HashMap;

use tracing::debug;

use crate::error::SeatRuleError;
use crate::models::{FullGroupRestrictions, PlanAggregates, RequestedSeats, RowKey, Seat};

pub use fragmentation::{check_mapped_row, ScanStrategy};
pub use group::check_full_group_restriction;
pub use mapping::{ensure_distinct_requested, map_row_seats, MappedRow, MappedRowSeat};
pub use skip::skip_fragmentation_check;

static NO_AGGREGATES: PlanAggregates = PlanAggregates {
    available: Vec::new(),
    all: Vec::new(),
};

/// Свободные места ряда на момент чтения и запрошенная их часть.
#[derive(Debug, Clone)]
pub struct RowSnapshot {
    pub key: RowKey,
    pub available: Vec<Seat>,
    pub requested: Vec<Seat>,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationSnapshot {
    pub rows: Vec<RowSnapshot>,
    /// seating plan id -> агрегаты по ценовым категориям
    pub aggregates: HashMap<String, PlanAggregates>,
}

impl ValidationSnapshot {
    pub fn plan_aggregates(&self, seating_plan_id: &str) -> &PlanAggregates {
        self.aggregates.get(seating_plan_id).unwrap_or(&NO_AGGREGATES)
    }
}

/// Прогоняет ряды по очереди и останавливается на первом нарушении.
pub fn check_rows(
    snapshot: &ValidationSnapshot,
    restrictions: &FullGroupRestrictions,
    request: &RequestedSeats,
    strategy: ScanStrategy,
) -> Result<(), SeatRuleError> {
    for row in &snapshot.rows {
        // повтор места раздул бы счётчики группы и эвристики пропуска
        ensure_distinct_requested(&row.requested)?;
        check_full_group_restriction(
            &row.key,
            row.available.len(),
            row.requested.len(),
            restrictions,
            request,
        )?;

        if skip_fragmentation_check(&row.requested, snapshot.plan_aggregates(&row.key.seating_plan_id)) {
            debug!(row = %row.key, "fragmentation check skipped by price category heuristic");
            continue;
        }

        let mapped = map_row_seats(&row.available, &row.requested)?;
        check_mapped_row(&mapped, strategy)?;
    }
    Ok(())
}
