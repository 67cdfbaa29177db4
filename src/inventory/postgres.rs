use async_trait::async_trait;
use sqlx::PgPool;

use super::{PriceCategoryAggregator, RowSeatsLoader};
use crate::error::InventoryError;
use crate::models::{PriceCategoryScope, Seat, SeatsPerPriceCategory};

/// status_code свободного места в таблице seats
const SEAT_STATUS_AVAILABLE: i32 = 1;

/// Чтение инвентаря мест из Postgres.
#[derive(Clone)]
pub struct PgSeatStore {
    pool: PgPool,
}

impl PgSeatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RowSeatsLoader for PgSeatStore {
    async fn load_row_seats(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        row_id: &str,
    ) -> Result<Vec<Seat>, InventoryError> {
        // цена приходит с запрошенными местами, из ряда нужны только номера
        let seats = sqlx::query_as::<_, Seat>(
            r#"
            SELECT id, seat_row_id, num, NULL::TEXT AS price_category_id, linked_seat_id
            FROM seats
            WHERE seating_plan_id = $1
              AND org_id = $2
              AND seat_row_id = $3
              AND status_code = $4
              AND deleted_at IS NULL
            ORDER BY num
            "#,
        )
        .bind(seating_plan_id)
        .bind(org_id)
        .bind(row_id)
        .bind(SEAT_STATUS_AVAILABLE)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }
}

#[async_trait]
impl PriceCategoryAggregator for PgSeatStore {
    async fn load_price_category_aggregates(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        scope: PriceCategoryScope,
    ) -> Result<Vec<SeatsPerPriceCategory>, InventoryError> {
        let rows = sqlx::query_as::<_, SeatsPerPriceCategory>(
            r#"
            SELECT price_category_id, COUNT(*)::BIGINT AS count
            FROM seats
            WHERE seating_plan_id = $1
              AND org_id = $2
              AND deleted_at IS NULL
              AND ($3 = FALSE OR status_code = $4)
            GROUP BY price_category_id
            "#,
        )
        .bind(seating_plan_id)
        .bind(org_id)
        .bind(scope.only_available())
        .bind(SEAT_STATUS_AVAILABLE)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
