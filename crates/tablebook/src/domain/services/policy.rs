//! Allocation Policy - Accept or reject a booking request
//!
//! Checks run in a fixed order and the first failure wins, so the
//! rejection reason for a given ledger and request is always the same.
//! The group cap is checked before table exclusivity.

use super::Ledger;
use crate::domain::value_objects::{GroupId, SlotId, TableNumber, MAX_BOOKING_PER_GROUP};

/// Why a booking request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GroupCapReached { group: GroupId, cap: usize },
    TableAlreadyBooked { slot: SlotId, table: TableNumber },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::GroupCapReached { .. } => write!(f, "group booking cap reached"),
            RejectReason::TableAlreadyBooked { .. } => {
                write!(f, "table already booked for this slot")
            }
        }
    }
}

/// Policy verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn into_result(self) -> Result<(), RejectReason> {
        match self {
            Verdict::Accept => Ok(()),
            Verdict::Reject(reason) => Err(reason),
        }
    }
}

/// Decide whether `group` may book `table` in `slot`
pub fn can_book(ledger: &Ledger, group: GroupId, slot: SlotId, table: TableNumber) -> Verdict {
    // Priority 1: group cap
    if ledger.group_booking_count(group) >= MAX_BOOKING_PER_GROUP {
        return Verdict::Reject(RejectReason::GroupCapReached {
            group,
            cap: MAX_BOOKING_PER_GROUP,
        });
    }

    // Priority 2: per-slot table exclusivity
    if ledger.booked_tables(slot).contains(&table) {
        return Verdict::Reject(RejectReason::TableAlreadyBooked { slot, table });
    }

    Verdict::Accept
}
