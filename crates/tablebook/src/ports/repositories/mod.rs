//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod reservation_store;

pub use reservation_store::*;
