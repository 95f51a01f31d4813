//! SlotId - One bookable time window
//!
//! Slots are opaque labels. The day and time range in a label are never
//! parsed as real dates.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Catalog time slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotId {
    ThursdayMorning,
    FridayMorning,
    FridayAfternoon,
}

impl SlotId {
    /// All slots in catalog order
    pub const ALL: [SlotId; 3] = [
        SlotId::ThursdayMorning,
        SlotId::FridayMorning,
        SlotId::FridayAfternoon,
    ];

    /// Display and persistence label
    pub fn label(&self) -> &'static str {
        match self {
            SlotId::ThursdayMorning => "Thursday, Feb 26 | 08:30 - 12:30",
            SlotId::FridayMorning => "Friday, Feb 27 | 08:30 - 12:30",
            SlotId::FridayAfternoon => "Friday, Feb 27 | 13:30 - 17:30",
        }
    }

    /// Short key for command lines and URLs
    pub fn key(&self) -> &'static str {
        match self {
            SlotId::ThursdayMorning => "thu-am",
            SlotId::FridayMorning => "fri-am",
            SlotId::FridayAfternoon => "fri-pm",
        }
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SlotId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SlotId::ALL
            .into_iter()
            .find(|slot| slot.label() == s || slot.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Validation(format!("Unknown time slot: {}", s)))
    }
}

impl TryFrom<String> for SlotId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotId> for String {
    fn from(value: SlotId) -> Self {
        value.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_key() {
        assert_eq!(
            "Friday, Feb 27 | 13:30 - 17:30".parse::<SlotId>().unwrap(),
            SlotId::FridayAfternoon
        );
        assert_eq!("THU-AM".parse::<SlotId>().unwrap(), SlotId::ThursdayMorning);
        assert!("Saturday".parse::<SlotId>().is_err());
    }

    #[test]
    fn test_serialized_by_label() {
        let json = serde_json::to_string(&SlotId::FridayMorning).unwrap();
        assert_eq!(json, "\"Friday, Feb 27 | 08:30 - 12:30\"");
    }
}
