//! Tablebook API Routes
//!
//! - /tablebook/status - Gate state (always reachable)
//! - /tablebook/catalog - Groups, slots and limits (always reachable)
//! - /tablebook/bookings - Book, list and cancel
//! - /tablebook/groups, /tablebook/summary - Cancellation menus and summary
//! - /tablebook/slots/:slot/availability - Table layout per slot
//! - /tablebook/export - CSV download

pub mod availability;
pub mod booking;
pub mod export;
pub mod swagger;

use axum::{http::StatusCode, Json};
use chrono::NaiveDate;

use tablebook::DomainError;

use crate::models::ErrorResponse;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain error to its HTTP status and body
pub fn api_error(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::GroupCapExceeded { .. } | DomainError::TableAlreadyBooked { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::SystemClosed => StatusCode::FORBIDDEN,
        DomainError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    if err.is_rejection() {
        tracing::debug!("Request rejected: {}", err);
    } else if status == StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!("Storage failure: {}", err);
    }

    (status, Json(ErrorResponse::from_domain(&err)))
}

/// Today's date on the server's local calendar
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
