//! Day-type rate table and day classification.
//!
//! The multiplier table is immutable static data: adding a holiday
//! combination means adding a row, not a branch.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DayType, Holiday, HolidayKind};

/// Pay multipliers for one day type.
///
/// The overtime multiplier applies on top of the day's already-multiplied
/// regular rate: `overtime_multiplier = regular_multiplier × overtime_premium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTypeRates {
    /// The day type this row prices.
    pub day_type: DayType,
    /// Multiplier on the hourly rate for regular hours.
    pub regular_multiplier: Decimal,
    /// Premium applied to the regular multiplier for overtime hours.
    pub overtime_premium: Decimal,
}

impl DayTypeRates {
    /// The effective overtime multiplier on the hourly rate.
    pub fn overtime_multiplier(&self) -> Decimal {
        self.regular_multiplier * self.overtime_premium
    }
}

/// Premium on top of the regular rate for overtime on an ordinary workday.
pub const REGULAR_DAY_OVERTIME_PREMIUM: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Premium on top of the day's rate for overtime on rest days and holidays.
pub const PREMIUM_DAY_OVERTIME_PREMIUM: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// Night differential as a fraction of the hourly rate, additive to every day type.
pub const NIGHT_DIFF_PREMIUM: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// The multiplier table, one row per day type, in [`DayType::ALL`] order.
///
/// | day type | regular | overtime |
/// |---|---|---|
/// | regular | 1.0 | 1.25 |
/// | sunday-restday | 1.3 | 1.69 |
/// | non-working-holiday | 1.3 | 1.69 |
/// | regular-holiday | 2.0 | 2.6 |
/// | sunday-special-holiday | 1.5 | 1.95 |
/// | sunday-regular-holiday | 2.6 | 3.38 |
pub static DAY_TYPE_RATES: [DayTypeRates; 6] = [
    DayTypeRates {
        day_type: DayType::Regular,
        regular_multiplier: Decimal::from_parts(10, 0, 0, false, 1),
        overtime_premium: REGULAR_DAY_OVERTIME_PREMIUM,
    },
    DayTypeRates {
        day_type: DayType::SundayRestday,
        regular_multiplier: Decimal::from_parts(13, 0, 0, false, 1),
        overtime_premium: PREMIUM_DAY_OVERTIME_PREMIUM,
    },
    DayTypeRates {
        day_type: DayType::NonWorkingHoliday,
        regular_multiplier: Decimal::from_parts(13, 0, 0, false, 1),
        overtime_premium: PREMIUM_DAY_OVERTIME_PREMIUM,
    },
    DayTypeRates {
        day_type: DayType::RegularHoliday,
        regular_multiplier: Decimal::from_parts(20, 0, 0, false, 1),
        overtime_premium: PREMIUM_DAY_OVERTIME_PREMIUM,
    },
    DayTypeRates {
        day_type: DayType::SundaySpecialHoliday,
        regular_multiplier: Decimal::from_parts(15, 0, 0, false, 1),
        overtime_premium: PREMIUM_DAY_OVERTIME_PREMIUM,
    },
    DayTypeRates {
        day_type: DayType::SundayRegularHoliday,
        regular_multiplier: Decimal::from_parts(26, 0, 0, false, 1),
        overtime_premium: PREMIUM_DAY_OVERTIME_PREMIUM,
    },
];

/// Looks up the multiplier row for a day type.
pub fn rates_for(day_type: DayType) -> &'static DayTypeRates {
    &DAY_TYPE_RATES[day_type as usize]
}

/// Looks up the multiplier row for a raw day-type label.
///
/// Returns `None` for labels outside the known set.
pub fn rates_for_label(label: &str) -> Option<&'static DayTypeRates> {
    DAY_TYPE_RATES.iter().find(|r| r.day_type.label() == label)
}

/// Classifies a worked day from its rest-day status and any declared holiday.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::classify_day;
/// use payroll_engine::models::{DayType, HolidayKind};
///
/// assert_eq!(classify_day(false, None), DayType::Regular);
/// assert_eq!(classify_day(true, Some(HolidayKind::Regular)), DayType::SundayRegularHoliday);
/// ```
pub fn classify_day(is_rest_day: bool, holiday: Option<HolidayKind>) -> DayType {
    match (holiday, is_rest_day) {
        (Some(HolidayKind::Regular), true) => DayType::SundayRegularHoliday,
        (Some(HolidayKind::Regular), false) => DayType::RegularHoliday,
        (Some(HolidayKind::SpecialNonWorking), true) => DayType::SundaySpecialHoliday,
        (Some(HolidayKind::SpecialNonWorking), false) => DayType::NonWorkingHoliday,
        (None, true) => DayType::SundayRestday,
        (None, false) => DayType::Regular,
    }
}

/// Returns the kind of holiday declared on `date`, if any.
///
/// When a date carries both a regular and a special declaration, the regular
/// holiday wins.
pub fn holiday_kind_on(holidays: &[Holiday], date: NaiveDate) -> Option<HolidayKind> {
    holidays
        .iter()
        .filter(|h| h.date == date)
        .map(|h| h.kind)
        .reduce(|a, b| {
            if a == HolidayKind::Regular || b == HolidayKind::Regular {
                HolidayKind::Regular
            } else {
                HolidayKind::SpecialNonWorking
            }
        })
}
