use std::collections::BTreeMap;

use super::seat::{RowKey, Seat};

/// seating plan id -> row id -> места, запрошенные в этом ряду.
pub type RequestedSeats = BTreeMap<String, BTreeMap<String, Vec<Seat>>>;

/// seating plan id -> название события, где ряды продаются только целиком.
pub type FullGroupRestrictions = BTreeMap<String, String>;

/// Все ряды запроса в детерминированном порядке (по плану, затем по ряду).
pub fn requested_rows(request: &RequestedSeats) -> impl Iterator<Item = (RowKey, &[Seat])> {
    request.iter().flat_map(|(plan_id, rows)| {
        rows.iter()
            .map(move |(row_id, seats)| (RowKey::new(plan_id.as_str(), row_id.as_str()), seats.as_slice()))
    })
}

/// Есть ли ряд в запросе именно под этой схемой зала.
pub fn contains_row(request: &RequestedSeats, row: &RowKey) -> bool {
    request
        .get(&row.seating_plan_id)
        .is_some_and(|rows| rows.contains_key(&row.row_id))
}
