//! Reservation Table Formatters
//!
//! Transform the reservation table into spreadsheet interchange formats.
//! Shared by the file backend and the export endpoint.

mod csv;

pub use self::csv::{decode_csv, encode_csv, CSV_CONTENT_TYPE};
