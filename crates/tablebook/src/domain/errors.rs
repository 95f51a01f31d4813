//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

use super::services::RejectReason;
use super::value_objects::{GroupId, SlotId, TableNumber};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Booking system is not open yet")]
    SystemClosed,

    #[error("Group {group} has already booked {cap} time slots")]
    GroupCapExceeded { group: GroupId, cap: usize },

    #[error("Table {table} is already booked for {slot}")]
    TableAlreadyBooked { slot: SlotId, table: TableNumber },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn persistence<E: std::fmt::Display>(err: E) -> Self {
        Self::Persistence(err.to_string())
    }

    /// True for rejections the user can recover from by choosing differently
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::GroupCapExceeded { .. } | Self::TableAlreadyBooked { .. }
        )
    }
}

impl From<RejectReason> for DomainError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::GroupCapReached { group, cap } => Self::GroupCapExceeded { group, cap },
            RejectReason::TableAlreadyBooked { slot, table } => {
                Self::TableAlreadyBooked { slot, table }
            }
        }
    }
}
