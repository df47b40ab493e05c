//! Per-day pay calculation.
//!
//! Prices one worked day from its day type, hour counts and hourly rate using
//! the [`DAY_TYPE_RATES`](super::DAY_TYPE_RATES) table. Night differential is
//! an orthogonal additive term applied to every day type.
//!
//! Components are computed at full precision and rounded only when written
//! into the returned [`PayBreakdown`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{AttendanceDay, DayType, PayBreakdown, PayComponent, PayLineItem};

use super::day_rates::{DayTypeRates, NIGHT_DIFF_PREMIUM, rates_for, rates_for_label};
use super::money::round_money;

/// Hours worked on one day, split by pay component.
///
/// All values are expected to be zero or greater; fractional hours are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    /// Hours within the schedule.
    pub regular: Decimal,
    /// Hours beyond the schedule.
    pub overtime: Decimal,
    /// Hours inside the night window.
    pub night_diff: Decimal,
}

impl From<&AttendanceDay> for DayHours {
    fn from(day: &AttendanceDay) -> Self {
        Self {
            regular: day.regular_hours,
            overtime: day.overtime_hours,
            night_diff: day.night_diff_hours,
        }
    }
}

/// Calculates the pay breakdown for one day.
///
/// - `regular_pay = regular × rate × regular_multiplier`
/// - `overtime_pay = overtime × rate × overtime_multiplier`
/// - `night_diff_pay = night_diff × rate × 0.1`
/// - `total` = the sum of the three, rounded once
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{DayHours, calculate_day_pay};
/// use payroll_engine::models::DayType;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = DayHours {
///     regular: Decimal::from(8),
///     overtime: Decimal::from(2),
///     night_diff: Decimal::ZERO,
/// };
/// let breakdown = calculate_day_pay(DayType::RegularHoliday, hours, Decimal::from(100));
///
/// // 8h × 100 × 2.0 and 2h × 100 × 2.6
/// assert_eq!(breakdown.regular_pay, Decimal::from_str("1600.00").unwrap());
/// assert_eq!(breakdown.overtime_pay, Decimal::from_str("520.00").unwrap());
/// assert_eq!(breakdown.total, Decimal::from_str("2120.00").unwrap());
/// ```
pub fn calculate_day_pay(day_type: DayType, hours: DayHours, rate_per_hour: Decimal) -> PayBreakdown {
    price_day(rates_for(day_type), hours, rate_per_hour)
}

/// Calculates the pay breakdown for a day identified by a raw day-type label.
///
/// An unrecognized label yields an all-zero breakdown and a warning. Use
/// [`DayType::from_str`](std::str::FromStr::from_str) first to reject unknown
/// labels instead.
pub fn calculate_day_pay_for_label(
    label: &str,
    hours: DayHours,
    rate_per_hour: Decimal,
) -> PayBreakdown {
    match rates_for_label(label) {
        Some(rates) => price_day(rates, hours, rate_per_hour),
        None => {
            warn!(day_type = %label, "Unrecognized day type, pricing day at zero");
            PayBreakdown::zero()
        }
    }
}

/// Calculates the pay breakdown for a classified attendance day.
pub fn calculate_attendance_day_pay(day: &AttendanceDay, rate_per_hour: Decimal) -> PayBreakdown {
    calculate_day_pay(day.day_type, DayHours::from(day), rate_per_hour)
}

/// Unrounded pay components of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DayAmounts {
    pub(crate) regular: Decimal,
    pub(crate) overtime: Decimal,
    pub(crate) night_diff: Decimal,
}

impl DayAmounts {
    fn compute(rates: &DayTypeRates, hours: DayHours, rate_per_hour: Decimal) -> Self {
        Self {
            regular: hours.regular * rate_per_hour * rates.regular_multiplier,
            overtime: hours.overtime * rate_per_hour * rates.overtime_multiplier(),
            night_diff: hours.night_diff * rate_per_hour * NIGHT_DIFF_PREMIUM,
        }
    }
}

/// The unrounded components of an attendance day's pay, for callers that
/// aggregate several days before rounding.
pub(crate) fn attendance_day_amounts(day: &AttendanceDay, rate_per_hour: Decimal) -> DayAmounts {
    DayAmounts::compute(rates_for(day.day_type), DayHours::from(day), rate_per_hour)
}

fn price_day(rates: &DayTypeRates, hours: DayHours, rate_per_hour: Decimal) -> PayBreakdown {
    let overtime_multiplier = rates.overtime_multiplier();

    let DayAmounts {
        regular: regular_pay,
        overtime: overtime_pay,
        night_diff: night_diff_pay,
    } = DayAmounts::compute(rates, hours, rate_per_hour);
    let total = regular_pay + overtime_pay + night_diff_pay;

    let line_items = [
        (PayComponent::Regular, hours.regular, rates.regular_multiplier, regular_pay),
        (PayComponent::Overtime, hours.overtime, overtime_multiplier, overtime_pay),
        (
            PayComponent::NightDifferential,
            hours.night_diff,
            NIGHT_DIFF_PREMIUM,
            night_diff_pay,
        ),
    ]
    .into_iter()
    .filter(|(_, hours, _, _)| *hours > Decimal::ZERO)
    .map(|(component, hours, multiplier, amount)| PayLineItem {
        component,
        hours,
        multiplier: multiplier.normalize(),
        rate: round_money(rate_per_hour * multiplier),
        amount: round_money(amount),
    })
    .collect();

    debug!(
        day_type = %rates.day_type,
        regular_hours = %hours.regular,
        overtime_hours = %hours.overtime,
        night_diff_hours = %hours.night_diff,
        rate_per_hour = %rate_per_hour,
        total = %total,
        "Priced day"
    );

    PayBreakdown {
        regular_pay: round_money(regular_pay),
        overtime_pay: round_money(overtime_pay),
        night_diff_pay: round_money(night_diff_pay),
        total: round_money(total),
        line_items,
    }
}
