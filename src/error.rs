use thiserror::Error;

use crate::models::RowKey;

/// Ошибки внешнего слоя данных (БД, кеш, фейки в тестах).
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("inventory unavailable: {0}")]
    Unavailable(String),
}

/// Результат проверки правил рассадки: первое найденное нарушение.
#[derive(Error, Debug)]
pub enum SeatRuleError {
    /// Не удалось прочитать места или агрегаты
    #[error("{context}: {source}")]
    DataAccess {
        context: &'static str,
        #[source]
        source: InventoryError,
    },

    #[error("requested amount of tickets exceed available seats")]
    OverRequest {
        row: RowKey,
        requested: usize,
        available: usize,
    },

    #[error("violate event restriction for event {event_title}, only full group seats ordering allowed")]
    FullGroupRestriction { row: RowKey, event_title: String },

    /// `conflicting_seat_id == None`: фрагментация была до этого запроса
    #[error("seating plan fragmentation detected")]
    Fragmentation { conflicting_seat_id: Option<String> },

    /// Запрошенного места нет среди свободных: снимок устарел
    #[error("something went wrong. requested seat num {seat_num} is unavailable")]
    Inconsistent { seat_num: i32 },

    /// Номера мест ряда разбросаны так, что плотный массив не построить
    #[error("malformed row: seat numbers {first_num}..={last_num} for {seats} available seats")]
    MalformedRow {
        first_num: i32,
        last_num: i32,
        seats: usize,
    },
}

impl SeatRuleError {
    pub(crate) fn data_access(context: &'static str) -> impl FnOnce(InventoryError) -> Self {
        move |source| SeatRuleError::DataAccess { context, source }
    }

    /// Нарушение бизнес-правила (в отличие от ошибок данных и рассинхронизации).
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            SeatRuleError::OverRequest { .. }
                | SeatRuleError::FullGroupRestriction { .. }
                | SeatRuleError::Fragmentation { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SeatRuleError::DataAccess { .. } => "data_access",
            SeatRuleError::OverRequest { .. } => "over_request",
            SeatRuleError::FullGroupRestriction { .. } => "full_group_restriction",
            SeatRuleError::Fragmentation { .. } => "fragmentation",
            SeatRuleError::Inconsistent { .. } => "inconsistent_request",
            SeatRuleError::MalformedRow { .. } => "malformed_row",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
