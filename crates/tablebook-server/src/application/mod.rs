//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the ledger and the reservation store.

mod booking_service;

pub use booking_service::BookingService;
