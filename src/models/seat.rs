use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    #[sqlx(rename = "seat_row_id")]
    pub row_id: String,
    // Номер места внутри ряда, порядок значим
    pub num: i32,
    #[serde(default)]
    pub price_category_id: Option<String>,
    #[serde(default)]
    pub linked_seat_id: Option<String>,
}

/// Идентичность ряда: ряд всегда рассматривается в рамках своей схемы зала.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowKey {
    pub seating_plan_id: String,
    pub row_id: String,
}

impl RowKey {
    pub fn new(seating_plan_id: impl Into<String>, row_id: impl Into<String>) -> Self {
        Self {
            seating_plan_id: seating_plan_id.into(),
            row_id: row_id.into(),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.seating_plan_id, self.row_id)
    }
}

/// Количество мест одной ценовой категории в схеме зала.
/// `price_category_id == None` означает места без категории.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct SeatsPerPriceCategory {
    pub price_category_id: Option<String>,
    pub count: i64,
}

impl SeatsPerPriceCategory {
    pub fn new(price_category_id: Option<&str>, count: i64) -> Self {
        Self {
            price_category_id: price_category_id.map(str::to_string),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceCategoryScope {
    /// Только свободные места
    OnlyAvailable,
    /// Все места схемы
    AllSeats,
}

impl PriceCategoryScope {
    pub fn only_available(self) -> bool {
        matches!(self, PriceCategoryScope::OnlyAvailable)
    }
}

/// Агрегаты по ценовым категориям для одной схемы зала в обоих разрезах.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanAggregates {
    pub available: Vec<SeatsPerPriceCategory>,
    pub all: Vec<SeatsPerPriceCategory>,
}

impl PlanAggregates {
    pub fn available_count(&self, price_category_id: &str) -> Option<i64> {
        find_count(&self.available, price_category_id)
    }

    pub fn total_count(&self, price_category_id: &str) -> Option<i64> {
        find_count(&self.all, price_category_id)
    }
}

fn find_count(aggregates: &[SeatsPerPriceCategory], price_category_id: &str) -> Option<i64> {
    aggregates
        .iter()
        .find(|a| a.price_category_id.as_deref() == Some(price_category_id))
        .map(|a| a.count)
}
