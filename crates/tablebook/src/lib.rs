//! Tablebook Domain Library
//!
//! Core domain types and interfaces for allocating tables across fixed
//! time slots to a catalog of groups.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Reservation)
//!   - `value_objects/`: Immutable value types (GroupId, SlotId, TableNumber)
//!   - `services/`: Gate, Ledger, allocation policy and availability queries
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Reservation table persistence
//!
//! # Usage
//!
//! ```rust,ignore
//! use tablebook::domain::{GroupId, Ledger, SlotId, TableNumber};
//! use tablebook::ports::ReservationStore;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    availability, can_book, DomainError, Gate, GroupId, GroupSeries, Ledger, RejectReason,
    Reservation, SlotId, TableNumber, Verdict, MAX_BOOKING_PER_GROUP, MAX_TABLES, OPEN_DATE,
};
pub use ports::ReservationStore;
