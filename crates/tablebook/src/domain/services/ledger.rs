//! Ledger - Current reservations, source of truth for admissibility
//!
//! A ledger is loaded from a [`ReservationStore`] and every accepted
//! mutation writes the full table back. A mutation whose save fails is
//! rolled back so the ledger never claims state the store does not hold.

use std::collections::BTreeSet;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{GroupId, SlotId, TableNumber};
use crate::domain::Reservation;
use crate::ports::ReservationStore;

/// Ordered collection of reservations, insertion order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    reservations: Vec<Reservation>,
}

impl Ledger {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        Self { reservations }
    }

    /// Load the ledger from persisted storage
    pub async fn load<S: ReservationStore + ?Sized>(store: &S) -> Result<Self, DomainError> {
        let reservations = store.load().await?;
        tracing::debug!(count = reservations.len(), "Ledger loaded");
        Ok(Self::new(reservations))
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Tables already reserved for `slot`
    pub fn booked_tables(&self, slot: SlotId) -> BTreeSet<TableNumber> {
        self.reservations
            .iter()
            .filter(|r| r.slot == slot)
            .map(|r| r.table)
            .collect()
    }

    pub fn group_booking_count(&self, group: GroupId) -> usize {
        self.reservations.iter().filter(|r| r.group == group).count()
    }

    /// Append a reservation and persist the full ledger
    ///
    /// The caller must have validated the request with [`super::can_book`].
    pub async fn add<S: ReservationStore + ?Sized>(
        &mut self,
        store: &S,
        reservation: Reservation,
    ) -> Result<(), DomainError> {
        self.reservations.push(reservation);

        if let Err(e) = store.save(&self.reservations).await {
            self.reservations.pop();
            tracing::warn!("Save failed, booking rolled back: {}", e);
            return Err(e);
        }

        Ok(())
    }

    /// Remove the first reservation matching all three attributes
    ///
    /// Returns `Ok(false)` without touching the store when nothing matches.
    pub async fn remove<S: ReservationStore + ?Sized>(
        &mut self,
        store: &S,
        group: GroupId,
        slot: SlotId,
        table: TableNumber,
    ) -> Result<bool, DomainError> {
        let Some(index) = self
            .reservations
            .iter()
            .position(|r| r.matches(group, slot, table))
        else {
            return Ok(false);
        };

        let removed = self.reservations.remove(index);

        if let Err(e) = store.save(&self.reservations).await {
            self.reservations.insert(index, removed);
            tracing::warn!("Save failed, cancellation rolled back: {}", e);
            return Err(e);
        }

        Ok(true)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store backed by a plain Vec, optionally failing every save
    #[derive(Default)]
    pub(crate) struct VecStore {
        pub rows: Mutex<Vec<Reservation>>,
        pub fail_saves: bool,
    }

    #[async_trait]
    impl ReservationStore for VecStore {
        async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn save(&self, reservations: &[Reservation]) -> Result<(), DomainError> {
            if self.fail_saves {
                return Err(DomainError::Persistence("backend unreachable".to_string()));
            }
            *self.rows.lock().unwrap() = reservations.to_vec();
            Ok(())
        }
    }

    pub(crate) fn res(group: &str, slot: SlotId, table: u32) -> Reservation {
        Reservation::new(
            group.parse().unwrap(),
            slot,
            TableNumber::try_from(table).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_add_persists_full_ledger() {
        let store = VecStore::default();
        let mut ledger = Ledger::load(&store).await.unwrap();
        assert!(ledger.is_empty());

        ledger
            .add(&store, res("A1", SlotId::ThursdayMorning, 5))
            .await
            .unwrap();
        ledger
            .add(&store, res("A2", SlotId::FridayMorning, 5))
            .await
            .unwrap();

        assert_eq!(store.rows.lock().unwrap().as_slice(), ledger.reservations());
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn test_add_rolls_back_on_save_failure() {
        let store = VecStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut ledger = Ledger::default();

        let result = ledger
            .add(&store, res("A1", SlotId::ThursdayMorning, 5))
            .await;

        assert!(matches!(result, Err(DomainError::Persistence(_))));
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_remove_first_match_only() {
        let store = VecStore::default();
        let mut ledger = Ledger::new(vec![
            res("A1", SlotId::ThursdayMorning, 5),
            res("A1", SlotId::ThursdayMorning, 5),
            res("B1", SlotId::FridayMorning, 1),
        ]);

        let removed = ledger
            .remove(
                &store,
                "A1".parse().unwrap(),
                SlotId::ThursdayMorning,
                TableNumber::try_from(5).unwrap(),
            )
            .await
            .unwrap();

        assert!(removed);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.reservations()[0], res("A1", SlotId::ThursdayMorning, 5));
        assert_eq!(ledger.reservations()[1], res("B1", SlotId::FridayMorning, 1));
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let store = VecStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut ledger = Ledger::new(vec![res("A1", SlotId::ThursdayMorning, 5)]);

        let removed = ledger
            .remove(
                &store,
                "A1".parse().unwrap(),
                SlotId::FridayMorning,
                TableNumber::try_from(5).unwrap(),
            )
            .await
            .unwrap();

        assert!(!removed);
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_rolls_back_in_place() {
        let store = VecStore {
            fail_saves: true,
            ..Default::default()
        };
        let original = vec![
            res("A1", SlotId::ThursdayMorning, 1),
            res("A2", SlotId::ThursdayMorning, 2),
            res("A3", SlotId::ThursdayMorning, 3),
        ];
        let mut ledger = Ledger::new(original.clone());

        let result = ledger
            .remove(
                &store,
                "A2".parse().unwrap(),
                SlotId::ThursdayMorning,
                TableNumber::try_from(2).unwrap(),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(ledger.reservations(), original.as_slice());
    }

    #[test]
    fn test_booked_tables_per_slot() {
        let ledger = Ledger::new(vec![
            res("A1", SlotId::ThursdayMorning, 5),
            res("A2", SlotId::ThursdayMorning, 7),
            res("A3", SlotId::FridayMorning, 9),
        ]);

        let booked: Vec<u8> = ledger
            .booked_tables(SlotId::ThursdayMorning)
            .into_iter()
            .map(|t| t.get())
            .collect();
        assert_eq!(booked, vec![5, 7]);
        assert!(ledger.booked_tables(SlotId::FridayAfternoon).is_empty());
        assert_eq!(ledger.group_booking_count("A1".parse().unwrap()), 1);
        assert_eq!(ledger.group_booking_count("B1".parse().unwrap()), 0);
    }
}
