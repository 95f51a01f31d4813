//! Booking Application Service (Use Case)
//!
//! Orchestrates gate, ledger, policy and store for every booking
//! operation. The ledger is reloaded from the store at the start of each
//! call, queries included, so no state is carried between requests.
//! Mutations are serialized through a single-writer lock in front of the
//! store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use tablebook::{
    availability, can_book, DomainError, Gate, GroupId, Ledger, Reservation, ReservationStore,
    SlotId, TableNumber,
};

/// Table layout of one slot; `available` and `booked` partition all tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    pub available: Vec<TableNumber>,
    pub booked: Vec<TableNumber>,
}

/// Application service for booking operations
pub struct BookingService<S: ReservationStore> {
    store: Arc<S>,
    gate: Gate,
    write_lock: Mutex<()>,
}

impl<S: ReservationStore> BookingService<S> {
    pub fn new(store: Arc<S>, gate: Gate) -> Self {
        Self {
            store,
            gate,
            write_lock: Mutex::new(()),
        }
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn is_system_open(&self, today: NaiveDate) -> bool {
        self.gate.is_open(today)
    }

    async fn ledger(&self) -> Result<Ledger, DomainError> {
        Ledger::load(self.store.as_ref()).await
    }

    /// Book `table` in `slot` for `group`
    ///
    /// Returns only after the store confirmed the write.
    pub async fn submit_booking(
        &self,
        today: NaiveDate,
        group: GroupId,
        slot: SlotId,
        table: TableNumber,
    ) -> Result<Reservation, DomainError> {
        self.gate.ensure_open(today)?;

        let _guard = self.write_lock.lock().await;
        let mut ledger = self.ledger().await?;

        if let Err(reason) = can_book(&ledger, group, slot, table).into_result() {
            tracing::info!(
                "Booking rejected for {} ({} | Table {}): {}",
                group,
                slot,
                table,
                reason
            );
            return Err(reason.into());
        }

        let reservation = Reservation::new(group, slot, table);
        ledger.add(self.store.as_ref(), reservation).await?;

        tracing::info!("Booked: {} reserved {}", group, reservation.label());

        Ok(reservation)
    }

    /// Cancel the reservation matching all three attributes
    ///
    /// `Ok(false)` when nothing matched; the store is left untouched.
    pub async fn submit_cancellation(
        &self,
        today: NaiveDate,
        group: GroupId,
        slot: SlotId,
        table: TableNumber,
    ) -> Result<bool, DomainError> {
        self.gate.ensure_open(today)?;

        let _guard = self.write_lock.lock().await;
        let mut ledger = self.ledger().await?;

        let removed = ledger
            .remove(self.store.as_ref(), group, slot, table)
            .await?;

        if removed {
            tracing::info!("Cancelled: {} {} | Table {}", group, slot, table);
        } else {
            tracing::debug!("Nothing to cancel for {} {} | Table {}", group, slot, table);
        }

        Ok(removed)
    }

    /// Free and reserved tables for `slot` from one ledger snapshot
    pub async fn query_layout(&self, slot: SlotId) -> Result<SlotLayout, DomainError> {
        let ledger = self.ledger().await?;
        Ok(SlotLayout {
            available: availability::available_tables(&ledger, slot),
            booked: availability::booked_tables(&ledger, slot),
        })
    }

    pub async fn query_groups_with_bookings(&self) -> Result<BTreeSet<GroupId>, DomainError> {
        Ok(availability::groups_with_bookings(&self.ledger().await?))
    }

    pub async fn query_bookings_for_group(
        &self,
        group: GroupId,
    ) -> Result<Vec<Reservation>, DomainError> {
        Ok(availability::bookings_for_group(&self.ledger().await?, group))
    }

    pub async fn query_all_bookings(&self) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.ledger().await?.reservations().to_vec())
    }

    pub async fn query_summary_by_group(&self) -> Result<BTreeMap<GroupId, usize>, DomainError> {
        Ok(availability::summary_by_group(&self.ledger().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CsvFileStore, MemoryStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn open_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()
    }

    fn closed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn service() -> BookingService<MemoryStore> {
        BookingService::new(Arc::new(MemoryStore::new()), Gate::default())
    }

    fn g(s: &str) -> GroupId {
        s.parse().unwrap()
    }

    fn t(n: u32) -> TableNumber {
        TableNumber::try_from(n).unwrap()
    }

    const SLOT1: SlotId = SlotId::ThursdayMorning;
    const SLOT2: SlotId = SlotId::FridayMorning;
    const SLOT3: SlotId = SlotId::FridayAfternoon;

    /// Store whose saves always fail
    struct BrokenStore;

    #[async_trait]
    impl ReservationStore for BrokenStore {
        async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
            Ok(Vec::new())
        }

        async fn save(&self, _: &[Reservation]) -> Result<(), DomainError> {
            Err(DomainError::Persistence("quota exceeded".to_string()))
        }
    }

    /// Store that alternates between a seeded table and an empty one on
    /// every load, like a writer landing between two reads
    struct FlickeringStore {
        loads: AtomicUsize,
        seeded: Vec<Reservation>,
    }

    #[async_trait]
    impl ReservationStore for FlickeringStore {
        async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
            if self.loads.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                Ok(self.seeded.clone())
            } else {
                Ok(Vec::new())
            }
        }

        async fn save(&self, _: &[Reservation]) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn assert_partition(layout: &SlotLayout) {
        let mut all: Vec<u8> = layout
            .available
            .iter()
            .chain(layout.booked.iter())
            .map(|t| t.get())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=20).collect::<Vec<u8>>());
    }

    #[tokio::test]
    async fn test_scenario_a_first_booking() {
        let svc = service();
        svc.submit_booking(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap();
        assert_eq!(svc.query_layout(SLOT1).await.unwrap().booked, vec![t(5)]);
    }

    #[tokio::test]
    async fn test_scenario_b_group_cap() {
        let svc = service();
        svc.submit_booking(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap();
        svc.submit_booking(open_day(), g("A1"), SLOT2, t(5))
            .await
            .unwrap();

        let result = svc.submit_booking(open_day(), g("A1"), SLOT3, t(5)).await;
        assert!(matches!(result, Err(DomainError::GroupCapExceeded { .. })));
        assert_eq!(svc.query_all_bookings().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scenario_c_table_taken() {
        let svc = service();
        svc.submit_booking(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap();

        let result = svc.submit_booking(open_day(), g("A2"), SLOT1, t(5)).await;
        assert!(matches!(
            result,
            Err(DomainError::TableAlreadyBooked { .. })
        ));
    }

    #[tokio::test]
    async fn test_scenario_d_cancel_frees_table() {
        let svc = service();
        svc.submit_booking(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap();

        assert!(svc
            .submit_cancellation(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap());
        assert!(svc.query_all_bookings().await.unwrap().is_empty());
        assert!(svc.query_layout(SLOT1).await.unwrap().available.contains(&t(5)));
    }

    #[tokio::test]
    async fn test_scenario_e_closed_gate_blocks_mutations() {
        let store = Arc::new(MemoryStore::new());
        let seeded = vec![Reservation::new(g("B1"), SLOT2, t(3))];
        store.save(&seeded).await.unwrap();
        let svc = BookingService::new(store.clone(), Gate::default());

        assert!(!svc.is_system_open(closed_day()));
        assert!(matches!(
            svc.submit_booking(closed_day(), g("A1"), SLOT1, t(5)).await,
            Err(DomainError::SystemClosed)
        ));
        assert!(matches!(
            svc.submit_cancellation(closed_day(), g("B1"), SLOT2, t(3))
                .await,
            Err(DomainError::SystemClosed)
        ));
        assert_eq!(store.load().await.unwrap(), seeded);
    }

    #[tokio::test]
    async fn test_cancel_twice_is_noop() {
        let svc = service();
        svc.submit_booking(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap();

        assert!(svc
            .submit_cancellation(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap());
        assert!(!svc
            .submit_cancellation(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap());
        assert!(svc.query_all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_reports_error_and_keeps_state() {
        let svc = BookingService::new(Arc::new(BrokenStore), Gate::default());
        let result = svc.submit_booking(open_day(), g("A1"), SLOT1, t(5)).await;
        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert!(svc.query_all_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reload_sees_writes_from_another_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.csv");
        let first = BookingService::new(Arc::new(CsvFileStore::new(&path)), Gate::default());
        let second = BookingService::new(Arc::new(CsvFileStore::new(&path)), Gate::default());

        first
            .submit_booking(open_day(), g("A1"), SLOT1, t(5))
            .await
            .unwrap();

        let result = second.submit_booking(open_day(), g("A2"), SLOT1, t(5)).await;
        assert!(matches!(
            result,
            Err(DomainError::TableAlreadyBooked { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_requests_for_same_table() {
        let svc = Arc::new(service());
        let mut handles = Vec::new();
        for group in GroupId::catalog().into_iter().take(10) {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.submit_booking(open_day(), group, SLOT1, t(7)).await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(svc.query_layout(SLOT1).await.unwrap().booked, vec![t(7)]);
    }

    #[tokio::test]
    async fn test_layout_partitions_tables_after_bookings() {
        let svc = service();
        for (group, table) in [("A1", 5), ("A2", 9), ("B4", 20)] {
            svc.submit_booking(open_day(), g(group), SLOT1, t(table))
                .await
                .unwrap();
        }

        let layout = svc.query_layout(SLOT1).await.unwrap();
        assert_eq!(layout.booked, vec![t(5), t(9), t(20)]);
        assert_partition(&layout);
        assert_partition(&svc.query_layout(SLOT2).await.unwrap());
    }

    #[tokio::test]
    async fn test_layout_reads_one_snapshot() {
        let store = Arc::new(FlickeringStore {
            loads: AtomicUsize::new(0),
            seeded: vec![Reservation::new(g("A1"), SLOT1, t(5))],
        });
        let svc = BookingService::new(store.clone(), Gate::default());

        let layout = svc.query_layout(SLOT1).await.unwrap();
        assert_eq!(layout.booked, vec![t(5)]);
        assert_partition(&layout);
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_queries() {
        let svc = service();
        svc.submit_booking(open_day(), g("A10"), SLOT1, t(1))
            .await
            .unwrap();
        svc.submit_booking(open_day(), g("A2"), SLOT1, t(2))
            .await
            .unwrap();
        svc.submit_booking(open_day(), g("A10"), SLOT3, t(1))
            .await
            .unwrap();

        let groups: Vec<GroupId> = svc
            .query_groups_with_bookings()
            .await
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(groups, vec![g("A2"), g("A10")]);

        let a10 = svc.query_bookings_for_group(g("A10")).await.unwrap();
        assert_eq!(a10.len(), 2);
        assert_eq!(a10[0].slot, SLOT1);
        assert_eq!(a10[1].slot, SLOT3);

        let summary = svc.query_summary_by_group().await.unwrap();
        assert_eq!(summary[&g("A10")], 2);
        assert_eq!(summary[&g("A2")], 1);

        assert_eq!(svc.query_layout(SLOT1).await.unwrap().available.len(), 18);
    }
}
