//! Domain Services
//!
//! - Gate: system open/closed by date
//! - Ledger: current reservations for one operation
//! - Policy: accept/reject decision for a booking request
//! - Availability: read-only projections of the ledger

pub mod availability;
mod gate;
mod ledger;
mod policy;

pub use gate::*;
pub use ledger::*;
pub use policy::*;
