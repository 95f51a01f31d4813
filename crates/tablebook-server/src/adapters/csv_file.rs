//! CSV file implementation of ReservationStore
//!
//! Persists across restarts. Single writer, no file locking.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use tablebook::{DomainError, Reservation, ReservationStore};

use super::formatters::{decode_csv, encode_csv};

pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "bookings.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

#[async_trait]
impl ReservationStore for CsvFileStore {
    async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No booking file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DomainError::Persistence(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )))
            }
        };

        decode_csv(&bytes)
    }

    async fn save(&self, reservations: &[Reservation]) -> Result<(), DomainError> {
        let bytes = encode_csv(reservations)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::Persistence(format!("Failed to create {:?}: {}", dir, e))
            })?;
        }

        // Write a synced sibling file and rename it over the target.
        // The sibling never outlives a failed save.
        let tmp = self.temp_path();
        if let Err(e) = write_synced(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(DomainError::Persistence(format!(
                "Failed to write {:?}: {}",
                tmp, e
            )));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(DomainError::Persistence(format!(
                "Failed to replace {:?}: {}",
                self.path, e
            )));
        }

        tracing::debug!(count = reservations.len(), "Saved bookings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablebook::{SlotId, TableNumber};

    fn rows() -> Vec<Reservation> {
        vec![
            Reservation::new(
                "A1".parse().unwrap(),
                SlotId::ThursdayMorning,
                TableNumber::try_from(5).unwrap(),
            ),
            Reservation::new(
                "A1".parse().unwrap(),
                SlotId::FridayMorning,
                TableNumber::try_from(5).unwrap(),
            ),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("bookings.csv"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookings.csv");

        CsvFileStore::new(&path).save(&rows()).await.unwrap();

        let reopened = CsvFileStore::new(&path);
        assert_eq!(reopened.load().await.unwrap(), rows());
        assert!(!reopened.temp_path().exists());
    }

    #[tokio::test]
    async fn test_save_of_load_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("bookings.csv"));
        store.save(&rows()).await.unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();

        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("bookings.csv"));
        store.save(&rows()).await.unwrap();
        store.save(&rows()[..1]).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 1);

        store.save(&[]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_target_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // The target path is an existing directory, so the rename fails
        let taken = dir.path().join("taken");
        std::fs::create_dir(&taken).unwrap();
        let store = CsvFileStore::new(&taken);
        let result = store.save(&rows()).await;
        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert!(!dir.path().join("taken.tmp").exists());
        assert!(taken.is_dir());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.csv");
        let store = CsvFileStore::new(&path);
        store.save(&rows()).await.unwrap();

        // A directory squatting on the temp name makes the write fail
        std::fs::create_dir(store.temp_path()).unwrap();
        let result = store.save(&rows()[..1]).await;
        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert_eq!(store.load().await.unwrap(), rows());
    }
}
