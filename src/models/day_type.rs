//! Day-type model.
//!
//! A day type is the categorical label an attendance classifier attaches to a
//! worked day. It selects the pay multipliers for that day.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The pay category of a worked day.
///
/// Wire labels are kebab-case (`"sunday-restday"`, `"regular-holiday"`, ...).
///
/// # Example
///
/// ```
/// use payroll_engine::models::DayType;
/// use std::str::FromStr;
///
/// let day_type = DayType::from_str("sunday-regular-holiday").unwrap();
/// assert_eq!(day_type, DayType::SundayRegularHoliday);
/// assert_eq!(day_type.to_string(), "sunday-regular-holiday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayType {
    /// An ordinary scheduled workday.
    Regular,
    /// Work on the employee's rest day.
    SundayRestday,
    /// Work on a special non-working holiday.
    NonWorkingHoliday,
    /// Work on a regular holiday.
    RegularHoliday,
    /// Work on a special holiday that is also the rest day.
    SundaySpecialHoliday,
    /// Work on a regular holiday that is also the rest day.
    SundayRegularHoliday,
}

impl DayType {
    /// Every day type, in table order.
    pub const ALL: [DayType; 6] = [
        DayType::Regular,
        DayType::SundayRestday,
        DayType::NonWorkingHoliday,
        DayType::RegularHoliday,
        DayType::SundaySpecialHoliday,
        DayType::SundayRegularHoliday,
    ];

    /// The wire label of this day type.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Regular => "regular",
            DayType::SundayRestday => "sunday-restday",
            DayType::NonWorkingHoliday => "non-working-holiday",
            DayType::RegularHoliday => "regular-holiday",
            DayType::SundaySpecialHoliday => "sunday-special-holiday",
            DayType::SundayRegularHoliday => "sunday-regular-holiday",
        }
    }

    /// Looks up a day type by label, returning `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<DayType> {
        DayType::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayType::from_label(s).ok_or_else(|| EngineError::UnclassifiedDayType {
            label: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_serde_names() {
        for day_type in DayType::ALL {
            let json = serde_json::to_string(&day_type).unwrap();
            assert_eq!(json, format!("\"{}\"", day_type.label()));
        }
    }

    #[test]
    fn test_from_str_round_trips_every_label() {
        for day_type in DayType::ALL {
            assert_eq!(DayType::from_str(day_type.label()).unwrap(), day_type);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_label() {
        match DayType::from_str("double-holiday") {
            Err(EngineError::UnclassifiedDayType { label }) => {
                assert_eq!(label, "double-holiday");
            }
            _ => panic!("Expected UnclassifiedDayType error"),
        }
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(DayType::from_label("Regular"), None);
        assert_eq!(DayType::from_label("regular"), Some(DayType::Regular));
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(DayType::NonWorkingHoliday.to_string(), "non-working-holiday");
    }
}
