//! Per-day pay breakdown models.
//!
//! A [`PayBreakdown`] is recomputed on every call and never cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The component of daily pay a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayComponent {
    /// Hours within the schedule at the day-type multiplier.
    Regular,
    /// Hours beyond the schedule at the overtime multiplier.
    Overtime,
    /// The night-window premium, additive to every other component.
    NightDifferential,
}

/// A single priced component of a day's pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayComponent, PayLineItem};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = PayLineItem {
///     component: PayComponent::Overtime,
///     hours: Decimal::from_str("2").unwrap(),
///     multiplier: Decimal::from_str("2.6").unwrap(),
///     rate: Decimal::from_str("260.00").unwrap(),
///     amount: Decimal::from_str("520.00").unwrap(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLineItem {
    /// Which component this line prices.
    pub component: PayComponent,
    /// Hours priced on this line.
    pub hours: Decimal,
    /// Multiplier applied to the hourly rate.
    pub multiplier: Decimal,
    /// Effective hourly rate (hourly rate × multiplier), rounded.
    pub rate: Decimal,
    /// Amount for this line, rounded.
    pub amount: Decimal,
}

/// The monetary breakdown of one worked day.
///
/// `total` is rounded from the unrounded sum of the components, so it can
/// differ from the sum of the rounded component fields by a centavo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Night differential premium.
    pub night_diff_pay: Decimal,
    /// Sum of all components.
    pub total: Decimal,
    /// One entry per component with non-zero hours.
    pub line_items: Vec<PayLineItem>,
}

impl PayBreakdown {
    /// A breakdown with every component at zero.
    pub fn zero() -> Self {
        Self {
            regular_pay: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            night_diff_pay: Decimal::ZERO,
            total: Decimal::ZERO,
            line_items: Vec::new(),
        }
    }
}
