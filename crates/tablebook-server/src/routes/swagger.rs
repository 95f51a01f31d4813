//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AvailabilityResponse,
    // Booking models
    BookingRequest,
    BookingResponse,
    CancellationResponse,
    // Catalog models
    CatalogResponse,
    ErrorResponse,
    GroupSummary,
    SlotInfo,
    StatusResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Booking endpoints
        super::booking::create_booking,
        super::booking::list_bookings,
        super::booking::cancel_booking,
        super::booking::list_groups_with_bookings,
        super::booking::booking_summary,
        super::export::export_bookings,
        // Availability endpoints
        super::availability::slot_availability,
        super::availability::system_status,
        super::availability::catalog,
    ),
    info(
        title = "Tablebook API",
        version = "0.1.0",
        description = "Table booking across fixed time slots with a per-group cap.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Booking", description = "Booking - Reserve, cancel, list and export"),
        (
            name = "Availability",
            description = "Availability - Table layout, gate status and catalog"
        ),
    ),
    components(
        schemas(
            // Booking
            BookingRequest,
            BookingResponse,
            CancellationResponse,
            GroupSummary,
            ErrorResponse,
            // Availability
            AvailabilityResponse,
            StatusResponse,
            CatalogResponse,
            SlotInfo,
        )
    ),
)]
pub struct ApiDoc;
