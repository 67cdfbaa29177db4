use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use crate::error::SeatRuleError;
use crate::models::{FullGroupRestrictions, RequestedSeats};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/seat-rules/validate", post(validate_seat_rules))
}

/* ---------- helpers ---------- */

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "valid": false, "error": { "kind": "bad_request", "message": message } })),
    )
}

fn rejection(err: SeatRuleError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        SeatRuleError::DataAccess { .. } | SeatRuleError::MalformedRow { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        // снимок устарел: клиенту стоит перечитать места и повторить
        SeatRuleError::Inconsistent { .. } => StatusCode::CONFLICT,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };

    let mut error = json!({ "kind": err.kind(), "message": err.to_string() });
    match &err {
        SeatRuleError::DataAccess { .. } => {
            tracing::error!("validate_seat_rules data access error: {:?}", err);
            error["message"] = json!("Не удалось получить данные о местах");
        }
        SeatRuleError::OverRequest { row, requested, available } => {
            error["seating_plan_id"] = json!(row.seating_plan_id);
            error["row_id"] = json!(row.row_id);
            error["requested"] = json!(requested);
            error["available"] = json!(available);
        }
        SeatRuleError::FullGroupRestriction { row, event_title } => {
            error["seating_plan_id"] = json!(row.seating_plan_id);
            error["row_id"] = json!(row.row_id);
            error["event_title"] = json!(event_title);
        }
        SeatRuleError::Fragmentation { conflicting_seat_id } => {
            error["conflicting_seat_id"] = json!(conflicting_seat_id);
        }
        SeatRuleError::Inconsistent { seat_num } => {
            error["seat_num"] = json!(seat_num);
        }
        SeatRuleError::MalformedRow { .. } => {
            tracing::error!("validate_seat_rules malformed inventory row: {:?}", err);
            error["message"] = json!("Не удалось получить данные о местах");
        }
    }

    (status, Json(json!({ "valid": false, "error": error })))
}

/* ---------- SEAT RULES ---------- */

// POST /api/seat-rules/validate
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateSeatRulesRequest {
    #[validate(length(min = 1, message = "org_id не может быть пустым"))]
    pub org_id: String,
    #[serde(default)]
    pub full_group_restrictions: FullGroupRestrictions,
    pub requested_seats: RequestedSeats,
}

async fn validate_seat_rules(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValidateSeatRulesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    // axum отвечает на кривое тело 415/422 plain-text, а 422 у нас занят нарушениями правил
    let Json(req) = payload.map_err(|e| bad_request(e.body_text()))?;
    req.validate().map_err(|e| bad_request(e.to_string()))?;

    state
        .validator
        .validate(&req.org_id, &req.full_group_restrictions, &req.requested_seats)
        .await
        .map_err(rejection)?;

    Ok((StatusCode::OK, Json(json!({ "valid": true }))))
}
