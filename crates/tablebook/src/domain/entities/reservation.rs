//! Reservation - One booked table in one slot for one group
//!
//! A reservation has no identity beyond its three attributes. It is
//! created by an accepted booking and destroyed by a cancellation that
//! names it exactly; it is never edited in place.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GroupId, SlotId, TableNumber};

/// Column headers of the persisted reservation table
pub const RESERVATION_COLUMNS: [&str; 3] = ["Group", "Time Slot", "Table"];

/// Reservation row
///
/// Field names serialize to the persisted column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "Group")]
    pub group: GroupId,
    #[serde(rename = "Time Slot")]
    pub slot: SlotId,
    #[serde(rename = "Table")]
    pub table: TableNumber,
}

impl Reservation {
    pub fn new(group: GroupId, slot: SlotId, table: TableNumber) -> Self {
        Self { group, slot, table }
    }

    /// Label shown for a cancellation candidate
    pub fn label(&self) -> String {
        format!("{} | Table {}", self.slot.label(), self.table)
    }

    /// True when all three attributes match
    pub fn matches(&self, group: GroupId, slot: SlotId, table: TableNumber) -> bool {
        self.group == group && self.slot == slot && self.table == table
    }
}
