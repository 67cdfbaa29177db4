//! Контракты внешнего слоя данных, которые нужны проверке правил.
//! Только чтение: ядро ничего не меняет в инвентаре.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::InventoryError;
use crate::models::{PriceCategoryScope, Seat, SeatsPerPriceCategory};

pub use memory::InMemoryInventory;
pub use postgres::PgSeatStore;

#[async_trait]
pub trait RowSeatsLoader: Send + Sync {
    /// Свободные на момент вызова места ряда.
    async fn load_row_seats(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        row_id: &str,
    ) -> Result<Vec<Seat>, InventoryError>;
}

#[async_trait]
pub trait PriceCategoryAggregator: Send + Sync {
    /// Количество мест по ценовым категориям схемы зала (плюс, возможно,
    /// одна запись для мест без категории).
    async fn load_price_category_aggregates(
        &self,
        seating_plan_id: &str,
        org_id: &str,
        scope: PriceCategoryScope,
    ) -> Result<Vec<SeatsPerPriceCategory>, InventoryError>;
}
