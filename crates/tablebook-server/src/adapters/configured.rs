//! Backend selected at deployment time

use async_trait::async_trait;

use tablebook::{DomainError, Reservation, ReservationStore};

use super::{CsvFileStore, MemoryStore, SheetsStore};

/// One of the three storage backends, chosen by configuration
pub enum ConfiguredStore {
    Memory(MemoryStore),
    File(CsvFileStore),
    Sheets(SheetsStore),
}

impl ConfiguredStore {
    pub fn kind(&self) -> &'static str {
        match self {
            ConfiguredStore::Memory(_) => "memory",
            ConfiguredStore::File(_) => "file",
            ConfiguredStore::Sheets(_) => "sheets",
        }
    }
}

#[async_trait]
impl ReservationStore for ConfiguredStore {
    async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
        match self {
            ConfiguredStore::Memory(store) => store.load().await,
            ConfiguredStore::File(store) => store.load().await,
            ConfiguredStore::Sheets(store) => store.load().await,
        }
    }

    async fn save(&self, reservations: &[Reservation]) -> Result<(), DomainError> {
        match self {
            ConfiguredStore::Memory(store) => store.save(reservations).await,
            ConfiguredStore::File(store) => store.save(reservations).await,
            ConfiguredStore::Sheets(store) => store.save(reservations).await,
        }
    }
}
