//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.
//! Every value object is drawn from a fixed catalog; construction
//! outside the catalog fails.

mod group_id;
mod slot;
mod table_number;

pub use group_id::*;
pub use slot::*;
pub use table_number::*;

use chrono::NaiveDate;

/// Number of bookable tables per slot
pub const MAX_TABLES: u8 = 20;

/// Maximum reservations a single group may hold across all slots
pub const MAX_BOOKING_PER_GROUP: usize = 2;

/// First day on which the booking system accepts requests
pub const OPEN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2026, 2, 15) {
    Some(date) => date,
    None => panic!("invalid open date"),
};
