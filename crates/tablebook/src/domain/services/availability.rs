//! Availability Query - Read-only projections of the ledger
//!
//! Presentation code reads the ledger through these functions only.

use std::collections::{BTreeMap, BTreeSet};

use super::Ledger;
use crate::domain::value_objects::{GroupId, SlotId, TableNumber};
use crate::domain::Reservation;

/// Free tables for `slot`, ascending
pub fn available_tables(ledger: &Ledger, slot: SlotId) -> Vec<TableNumber> {
    let booked = ledger.booked_tables(slot);
    TableNumber::all().filter(|t| !booked.contains(t)).collect()
}

/// Tables already reserved for `slot`, ascending
pub fn booked_tables(ledger: &Ledger, slot: SlotId) -> Vec<TableNumber> {
    ledger.booked_tables(slot).into_iter().collect()
}

/// Groups holding at least one reservation, sorted
pub fn groups_with_bookings(ledger: &Ledger) -> BTreeSet<GroupId> {
    ledger.reservations().iter().map(|r| r.group).collect()
}

/// Reservations of `group` in ledger order
pub fn bookings_for_group(ledger: &Ledger, group: GroupId) -> Vec<Reservation> {
    ledger
        .reservations()
        .iter()
        .filter(|r| r.group == group)
        .copied()
        .collect()
}

/// Booking count per group, only groups with bookings
pub fn summary_by_group(ledger: &Ledger) -> BTreeMap<GroupId, usize> {
    let mut summary = BTreeMap::new();
    for r in ledger.reservations() {
        *summary.entry(r.group).or_insert(0) += 1;
    }
    summary
}
