//! CSV encoding of the reservation table
//!
//! Header row `Group,Time Slot,Table` is always written, even for an
//! empty table. No index column.

use tablebook::domain::RESERVATION_COLUMNS;
use tablebook::{DomainError, Reservation};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Encode reservations as CSV bytes
pub fn encode_csv(reservations: &[Reservation]) -> Result<Vec<u8>, DomainError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(RESERVATION_COLUMNS)
        .map_err(DomainError::persistence)?;

    for reservation in reservations {
        writer
            .serialize(reservation)
            .map_err(DomainError::persistence)?;
    }

    writer
        .into_inner()
        .map_err(|e| DomainError::Persistence(e.to_string()))
}

/// Decode CSV bytes into reservations; empty input yields an empty table
pub fn decode_csv(bytes: &[u8]) -> Result<Vec<Reservation>, DomainError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(bytes);

    reader
        .deserialize::<Reservation>()
        .enumerate()
        .map(|(i, row)| {
            row.map_err(|e| DomainError::Persistence(format!("Invalid row {}: {}", i + 1, e)))
        })
        .collect()
}
