//! Reservation Store Port
//!
//! Uniform read/overwrite access to the table of reservation records.
//! Backends: process memory, local spreadsheet file, remote spreadsheet
//! service.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Reservation};

/// Storage interface for the reservation table
///
/// `save` replaces the whole table. Saving the same snapshot twice is a
/// no-op on content, so retrying a failed save is safe.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Load the full reservation table; an empty backend yields an empty Vec
    async fn load(&self) -> Result<Vec<Reservation>, DomainError>;

    /// Replace the persisted table with `reservations`
    ///
    /// Fails with `DomainError::Persistence` when the backend is
    /// unreachable or rejects the write. Callers must not assume partial
    /// success.
    async fn save(&self, reservations: &[Reservation]) -> Result<(), DomainError>;
}
