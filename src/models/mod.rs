pub mod request;
pub mod seat;

pub use request::{FullGroupRestrictions, RequestedSeats};
pub use seat::{PlanAggregates, PriceCategoryScope, RowKey, Seat, SeatsPerPriceCategory};
