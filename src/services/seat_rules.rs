//! seat_rules.rs
//!
//! Проверка запроса на бронь мест против правил рассадки площадки.
//!
//! Порядок работы:
//! 1.  Загрузка снимка: свободные места каждого запрошенного ряда и агрегаты
//!     по ценовым категориям (свободные и все места) для каждой схемы зала.
//! 2.  Синхронная проверка снимка ядром `rules`: ряд за рядом, до первого
//!     нарушения.
//!
//! Сервис ничего не бронирует и не меняет инвентарь. Согласованность снимка с
//! реальными бронированиями обеспечивает вызывающая сторона (транзакция).

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::SeatRuleError;
use crate::inventory::{PriceCategoryAggregator, RowSeatsLoader};
use crate::models::request::requested_rows;
use crate::models::{FullGroupRestrictions, PlanAggregates, PriceCategoryScope, RequestedSeats};
use crate::rules::{self, RowSnapshot, ScanStrategy, ValidationSnapshot};

#[derive(Clone)]
pub struct SeatRulesValidator {
    rows: Arc<dyn RowSeatsLoader>,
    aggregates: Arc<dyn PriceCategoryAggregator>,
    strategy: ScanStrategy,
}

impl SeatRulesValidator {
    pub fn new(rows: Arc<dyn RowSeatsLoader>, aggregates: Arc<dyn PriceCategoryAggregator>) -> Self {
        Self {
            rows,
            aggregates,
            strategy: ScanStrategy::default(),
        }
    }

    pub fn with_scan_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Возвращает `Ok(())`, если бронь допустима, иначе первое нарушение.
    pub async fn validate(
        &self,
        org_id: &str,
        restrictions: &FullGroupRestrictions,
        request: &RequestedSeats,
    ) -> Result<(), SeatRuleError> {
        let validation_id = Uuid::new_v4();
        let span = info_span!("seat_rules.validate", %validation_id, org_id, plans = request.len());

        async move {
            let snapshot = self.load_snapshot(org_id, request).await?;
            let result = rules::check_rows(&snapshot, restrictions, request, self.strategy);
            log_outcome(&result, snapshot.rows.len());
            result
        }
        .instrument(span)
        .await
    }

    /// Читает всё, что нужно ядру, через внешние загрузчики.
    pub async fn load_snapshot(
        &self,
        org_id: &str,
        request: &RequestedSeats,
    ) -> Result<ValidationSnapshot, SeatRuleError> {
        let mut rows = Vec::new();
        for (key, requested) in requested_rows(request) {
            let available = self
                .rows
                .load_row_seats(&key.seating_plan_id, org_id, &key.row_id)
                .await
                .map_err(|e| {
                    error!(row = %key, error = %e, "failed to load row seats");
                    SeatRuleError::data_access("error while querying seats")(e)
                })?;
            rows.push(RowSnapshot {
                key,
                available,
                requested: requested.to_vec(),
            });
        }

        let mut aggregates = HashMap::with_capacity(request.len());
        for seating_plan_id in request.keys() {
            let (available, all) = futures::try_join!(
                self.aggregates.load_price_category_aggregates(
                    seating_plan_id,
                    org_id,
                    PriceCategoryScope::OnlyAvailable,
                ),
                self.aggregates.load_price_category_aggregates(
                    seating_plan_id,
                    org_id,
                    PriceCategoryScope::AllSeats,
                ),
            )
            .map_err(|e| {
                error!(seating_plan_id, error = %e, "failed to load price category aggregates");
                SeatRuleError::data_access("error while querying seats price categories")(e)
            })?;
            aggregates.insert(seating_plan_id.clone(), PlanAggregates { available, all });
        }

        Ok(ValidationSnapshot { rows, aggregates })
    }
}

fn log_outcome(result: &Result<(), SeatRuleError>, rows: usize) {
    match result {
        Ok(()) => debug!(rows, "seat rules passed"),
        Err(e) if e.is_rule_violation() => info!(kind = e.kind(), error = %e, "seat rules violated"),
        Err(e) => warn!(kind = e.kind(), error = %e, "seat rules check aborted"),
    }
}
