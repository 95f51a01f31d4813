//! Booking request/response DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use tablebook::{DomainError, GroupId, Reservation, SlotId, TableNumber};

/// Booking or cancellation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingRequest {
    /// Group identifier, e.g. "A1"
    pub group: String,
    /// Slot label or short key ("thu-am", "fri-am", "fri-pm")
    pub slot: String,
    pub table: u32,
}

impl BookingRequest {
    pub fn parse(&self) -> Result<(GroupId, SlotId, TableNumber), DomainError> {
        Ok((
            self.group.parse()?,
            self.slot.parse()?,
            TableNumber::try_from(self.table)?,
        ))
    }
}

/// One reservation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub group: String,
    pub slot: String,
    pub slot_key: String,
    pub table: u8,
    /// Display label used by cancellation menus
    pub label: String,
}

impl BookingResponse {
    pub fn from_domain(reservation: Reservation) -> Self {
        Self {
            group: reservation.group.to_string(),
            slot: reservation.slot.label().to_string(),
            slot_key: reservation.slot.key().to_string(),
            table: reservation.table.get(),
            label: reservation.label(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancellationResponse {
    pub cancelled: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingsQuery {
    /// Restrict to one group's bookings
    pub group: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub slot: String,
    pub slot_key: String,
    pub available: Vec<u8>,
    pub booked: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupSummary {
    pub group: String,
    pub total_bookings: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub open: bool,
    pub today: NaiveDate,
    pub open_date: NaiveDate,
    pub storage: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotInfo {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponse {
    pub groups: Vec<String>,
    pub slots: Vec<SlotInfo>,
    pub max_tables: u8,
    pub max_booking_per_group: usize,
}

/// Error body for rejected or failed operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable kind, e.g. "group_cap_exceeded"
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_domain(err: &DomainError) -> Self {
        let kind = match err {
            DomainError::SystemClosed => "system_closed",
            DomainError::GroupCapExceeded { .. } => "group_cap_exceeded",
            DomainError::TableAlreadyBooked { .. } => "table_already_booked",
            DomainError::Validation(_) => "validation",
            DomainError::Persistence(_) => "persistence",
        };
        Self {
            error: kind.to_string(),
            message: err.to_string(),
        }
    }
}
