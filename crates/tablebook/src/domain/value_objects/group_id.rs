//! GroupId - Identifier of a requesting group
//!
//! Groups come from a generated catalog: `A1..A20` and `B1..B8`.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Group series letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupSeries {
    A,
    B,
}

impl GroupSeries {
    /// Number of groups in this series
    pub const fn size(self) -> u8 {
        match self {
            GroupSeries::A => 20,
            GroupSeries::B => 8,
        }
    }

    fn letter(self) -> char {
        match self {
            GroupSeries::A => 'A',
            GroupSeries::B => 'B',
        }
    }
}

/// Catalog group identifier
///
/// Orders by series then number, so `A2` sorts before `A10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId {
    series: GroupSeries,
    number: u8,
}

impl GroupId {
    pub fn new(series: GroupSeries, number: u8) -> Result<Self, DomainError> {
        if number == 0 || number > series.size() {
            return Err(DomainError::Validation(format!(
                "Unknown group: {}{}",
                series.letter(),
                number
            )));
        }
        Ok(Self { series, number })
    }

    pub fn series(&self) -> GroupSeries {
        self.series
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// All 28 catalog groups in catalog order
    pub fn catalog() -> Vec<GroupId> {
        [GroupSeries::A, GroupSeries::B]
            .into_iter()
            .flat_map(|series| (1..=series.size()).map(move |number| GroupId { series, number }))
            .collect()
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.series.letter(), self.number)
    }
}

impl std::str::FromStr for GroupId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unknown = || DomainError::Validation(format!("Unknown group: {}", s));
        let mut chars = s.chars();
        let series = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('A') => GroupSeries::A,
            Some('B') => GroupSeries::B,
            _ => return Err(unknown()),
        };
        // Canonical decimal only: no sign, no padding
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(unknown());
        }
        let number: u8 = digits.parse().map_err(|_| unknown())?;
        Self::new(series, number)
    }
}

impl TryFrom<String> for GroupId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GroupId> for String {
    fn from(value: GroupId) -> Self {
        value.to_string()
    }
}
