//! TableNumber - Numbered bookable table, 1..=MAX_TABLES

use serde::{Deserialize, Serialize};

use super::MAX_TABLES;
use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableNumber(u8);

impl TableNumber {
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Every table, ascending
    pub fn all() -> impl Iterator<Item = TableNumber> {
        (1..=MAX_TABLES).map(TableNumber)
    }
}

impl TryFrom<u32> for TableNumber {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (1..=u32::from(MAX_TABLES)).contains(&value) {
            Ok(TableNumber(value as u8))
        } else {
            Err(DomainError::Validation(format!(
                "Table must be between 1 and {}, got {}",
                MAX_TABLES, value
            )))
        }
    }
}

impl From<TableNumber> for u32 {
    fn from(value: TableNumber) -> Self {
        u32::from(value.0)
    }
}

impl std::fmt::Display for TableNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TableNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::Validation(format!("Invalid table number: {}", s)))?;
        Self::try_from(value)
    }
}
