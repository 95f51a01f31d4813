//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Reservation: one (group, slot, table) booking row

mod reservation;

pub use reservation::*;
