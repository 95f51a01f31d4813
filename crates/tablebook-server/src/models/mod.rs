//! Tablebook API Models
//!
//! - Booking: requests, reservations, availability, summary, status

mod booking;

pub use booking::*;
