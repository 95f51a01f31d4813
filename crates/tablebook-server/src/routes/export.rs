//! Export Route - Download all bookings as CSV

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{api_error, ApiError};
use crate::adapters::formatters::{encode_csv, CSV_CONTENT_TYPE};
use crate::models::ErrorResponse;
use crate::AppState;

const EXPORT_FILENAME: &str = "bookings.csv";

/// Download all bookings as a CSV file
#[utoipa::path(
    get,
    path = "/tablebook/export",
    responses(
        (
            status = 200,
            description = "CSV with Group, Time Slot and Table columns",
            content_type = "text/csv"
        ),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Booking"
)]
pub async fn export_bookings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bookings = state
        .booking_service
        .query_all_bookings()
        .await
        .map_err(api_error)?;
    let bytes = encode_csv(&bookings).map_err(api_error)?;

    tracing::debug!(count = bookings.len(), "Exporting bookings");

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        bytes,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tablebook/export", get(export_bookings))
}
