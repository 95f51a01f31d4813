//! Gate - Global open/closed precondition

use chrono::NaiveDate;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::OPEN_DATE;

/// Date gate guarding every mutating operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    open_date: NaiveDate,
}

impl Gate {
    pub fn new(open_date: NaiveDate) -> Self {
        Self { open_date }
    }

    pub fn open_date(&self) -> NaiveDate {
        self.open_date
    }

    /// Open on and after the configured date
    pub fn is_open(&self, today: NaiveDate) -> bool {
        today >= self.open_date
    }

    pub fn ensure_open(&self, today: NaiveDate) -> Result<(), DomainError> {
        if self.is_open(today) {
            Ok(())
        } else {
            Err(DomainError::SystemClosed)
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(OPEN_DATE)
    }
}
