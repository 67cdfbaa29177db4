use crate::error::SeatRuleError;
use crate::models::request::contains_row;
use crate::models::{FullGroupRestrictions, RequestedSeats, RowKey};

/// Ряды событий с флагом "только целиком" продаются все сразу или никак.
/// Превышение количества свободных мест проверяется всегда, флаг не важен.
pub fn check_full_group_restriction(
    row: &RowKey,
    available: usize,
    requested: usize,
    restrictions: &FullGroupRestrictions,
    request: &RequestedSeats,
) -> Result<(), SeatRuleError> {
    if requested > available {
        return Err(SeatRuleError::OverRequest {
            row: row.clone(),
            requested,
            available,
        });
    }

    let Some(event_title) = restrictions.get(&row.seating_plan_id) else {
        return Ok(());
    };
    if contains_row(request, row) && requested != available {
        return Err(SeatRuleError::FullGroupRestriction {
            row: row.clone(),
            event_title: event_title.clone(),
        });
    }

    Ok(())
}
