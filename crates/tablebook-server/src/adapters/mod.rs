//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

mod configured;
pub mod csv_file;
pub mod formatters;
pub mod memory;
pub mod sheets;

// Re-exports
pub use configured::ConfiguredStore;
pub use csv_file::CsvFileStore;
pub use memory::MemoryStore;
pub use sheets::{ServiceAccountKey, SheetsConfig, SheetsCredentials, SheetsStore};
