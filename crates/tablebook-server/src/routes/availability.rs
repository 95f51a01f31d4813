//! Availability Routes - Table layout, gate status and catalog

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use tablebook::{GroupId, SlotId, MAX_BOOKING_PER_GROUP, MAX_TABLES};

use super::{api_error, today, ApiError};
use crate::models::{
    AvailabilityResponse, CatalogResponse, ErrorResponse, SlotInfo, StatusResponse,
};
use crate::AppState;

/// Free and booked tables for one slot
#[utoipa::path(
    get,
    path = "/tablebook/slots/{slot}/availability",
    params(
        ("slot" = String, Path, description = "Slot key (thu-am, fri-am, fri-pm) or label")
    ),
    responses(
        (status = 200, description = "Table layout for the slot", body = AvailabilityResponse),
        (status = 400, description = "Unknown slot", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Availability"
)]
pub async fn slot_availability(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let slot: SlotId = slot.parse().map_err(api_error)?;

    let layout = state
        .booking_service
        .query_layout(slot)
        .await
        .map_err(api_error)?;

    Ok(Json(AvailabilityResponse {
        slot: slot.label().to_string(),
        slot_key: slot.key().to_string(),
        available: layout.available.into_iter().map(|t| t.get()).collect(),
        booked: layout.booked.into_iter().map(|t| t.get()).collect(),
    }))
}

/// Whether the booking system is open today
#[utoipa::path(
    get,
    path = "/tablebook/status",
    responses(
        (status = 200, description = "Gate status", body = StatusResponse)
    ),
    tag = "Availability"
)]
pub async fn system_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let today = today();
    Json(StatusResponse {
        open: state.booking_service.is_system_open(today),
        today,
        open_date: state.booking_service.gate().open_date(),
        storage: state.storage_kind.to_string(),
    })
}

/// Fixed groups, slots and limits
#[utoipa::path(
    get,
    path = "/tablebook/catalog",
    responses(
        (status = 200, description = "Booking catalog", body = CatalogResponse)
    ),
    tag = "Availability"
)]
pub async fn catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        groups: GroupId::catalog().iter().map(|g| g.to_string()).collect(),
        slots: SlotId::ALL
            .iter()
            .map(|s| SlotInfo {
                key: s.key().to_string(),
                label: s.label().to_string(),
            })
            .collect(),
        max_tables: MAX_TABLES,
        max_booking_per_group: MAX_BOOKING_PER_GROUP,
    })
}

/// Routes reachable while the gate is closed
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/tablebook/status", get(system_status))
        .route("/tablebook/catalog", get(catalog))
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/tablebook/slots/:slot/availability",
        get(slot_availability),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app, json_request, read_json};
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_layout_after_booking() {
        let app = app(true);
        let resp = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/tablebook/bookings",
                serde_json::json!({ "group": "A1", "slot": "fri-pm", "table": 20 }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(json_request(
                Method::GET,
                "/tablebook/slots/fri-pm/availability",
                serde_json::Value::Null,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let layout: AvailabilityResponse = read_json(resp).await;
        assert_eq!(layout.booked, vec![20]);
        assert_eq!(layout.available, (1..=19).collect::<Vec<u8>>());
    }

    #[tokio::test]
    async fn test_status_and_catalog_reachable_when_closed() {
        let app = app(false);

        let resp = app
            .clone()
            .oneshot(json_request(Method::GET, "/tablebook/status", serde_json::Value::Null))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let status: StatusResponse = read_json(resp).await;
        assert!(!status.open);
        assert_eq!(status.storage, "memory");

        let resp = app
            .oneshot(json_request(Method::GET, "/tablebook/catalog", serde_json::Value::Null))
            .await
            .unwrap();
        let catalog: CatalogResponse = read_json(resp).await;
        assert_eq!(catalog.groups.len(), 28);
        assert_eq!(catalog.slots.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_slot() {
        let resp = app(true)
            .oneshot(json_request(
                Method::GET,
                "/tablebook/slots/sat-am/availability",
                serde_json::Value::Null,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
