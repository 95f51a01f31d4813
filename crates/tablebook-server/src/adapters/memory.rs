//! In-memory implementation of ReservationStore
//!
//! Volatile: the table lives as long as the process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use tablebook::{DomainError, Reservation, ReservationStore};

#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Reservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.rows.read().await.clone())
    }

    async fn save(&self, reservations: &[Reservation]) -> Result<(), DomainError> {
        *self.rows.write().await = reservations.to_vec();
        Ok(())
    }
}
