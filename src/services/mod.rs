pub mod seat_rules;

pub use seat_rules::SeatRulesValidator;
