//! Booking Routes - Book, list and cancel reservations
//!
//! HTTP handlers that delegate to BookingService for business logic.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use tablebook::GroupId;

use super::{api_error, today, ApiError};
use crate::models::{
    BookingRequest, BookingResponse, BookingsQuery, CancellationResponse, ErrorResponse,
    GroupSummary,
};
use crate::AppState;

/// Book a table
#[utoipa::path(
    post,
    path = "/tablebook/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking confirmed and persisted", body = BookingResponse),
        (status = 400, description = "Unknown group, slot or table", body = ErrorResponse),
        (status = 403, description = "Booking system not open yet", body = ErrorResponse),
        (status = 409, description = "Group cap reached or table taken", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let (group, slot, table) = payload.parse().map_err(api_error)?;

    let reservation = state
        .booking_service
        .submit_booking(today(), group, slot, table)
        .await
        .map_err(api_error)?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse::from_domain(reservation)),
    ))
}

/// List bookings, optionally for one group
#[utoipa::path(
    get,
    path = "/tablebook/bookings",
    params(BookingsQuery),
    responses(
        (status = 200, description = "Bookings in ledger order", body = Vec<BookingResponse>),
        (status = 400, description = "Unknown group", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = match query.group {
        Some(group) => {
            let group: GroupId = group.parse().map_err(api_error)?;
            state.booking_service.query_bookings_for_group(group).await
        }
        None => state.booking_service.query_all_bookings().await,
    }
    .map_err(api_error)?;

    Ok(Json(
        bookings
            .into_iter()
            .map(BookingResponse::from_domain)
            .collect(),
    ))
}

/// Cancel a booking
#[utoipa::path(
    post,
    path = "/tablebook/bookings/cancel",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Cancellation result", body = CancellationResponse),
        (status = 400, description = "Unknown group, slot or table", body = ErrorResponse),
        (status = 403, description = "Booking system not open yet", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<CancellationResponse>, ApiError> {
    let (group, slot, table) = payload.parse().map_err(api_error)?;

    let cancelled = state
        .booking_service
        .submit_cancellation(today(), group, slot, table)
        .await
        .map_err(api_error)?;

    let message = if cancelled {
        "Booking cancelled successfully".to_string()
    } else {
        "Nothing to cancel".to_string()
    };

    Ok(Json(CancellationResponse { cancelled, message }))
}

/// Groups that hold at least one booking
#[utoipa::path(
    get,
    path = "/tablebook/groups",
    responses(
        (status = 200, description = "Sorted group identifiers", body = Vec<String>),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn list_groups_with_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let groups = state
        .booking_service
        .query_groups_with_bookings()
        .await
        .map_err(api_error)?;

    Ok(Json(groups.into_iter().map(|g| g.to_string()).collect()))
}

/// Booking count per group
#[utoipa::path(
    get,
    path = "/tablebook/summary",
    responses(
        (status = 200, description = "Bookings per group", body = Vec<GroupSummary>),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn booking_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    let summary = state
        .booking_service
        .query_summary_by_group()
        .await
        .map_err(api_error)?;

    Ok(Json(
        summary
            .into_iter()
            .map(|(group, total_bookings)| GroupSummary {
                group: group.to_string(),
                total_bookings,
            })
            .collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tablebook/bookings", get(list_bookings).post(create_booking))
        .route("/tablebook/bookings/cancel", post(cancel_booking))
        .route("/tablebook/groups", get(list_groups_with_bookings))
        .route("/tablebook/summary", get(booking_summary))
}
