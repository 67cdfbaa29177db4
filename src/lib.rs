pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod inventory;
pub mod models;
pub mod redis_client;
pub mod rules;
pub mod services;

pub use error::{InventoryError, SeatRuleError};
pub use services::SeatRulesValidator;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub validator: SeatRulesValidator,
}

impl AppState {
    pub fn new(validator: SeatRulesValidator) -> Self {
        Self { validator }
    }
}
