//! Gate middleware
//!
//! Re-evaluates the open date on every request. While closed, no booking
//! route is reachable.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use tablebook::DomainError;

use crate::routes::{api_error, today};
use crate::AppState;

pub async fn gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let today = today();

    if !state.booking_service.is_system_open(today) {
        tracing::warn!(
            "Booking system closed until {}, refused {} {}",
            state.booking_service.gate().open_date(),
            request.method(),
            request.uri().path()
        );
        return api_error(DomainError::SystemClosed).into_response();
    }

    next.run(request).await
}
