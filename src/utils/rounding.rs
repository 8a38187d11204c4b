//! Decimal rounding rules for billing and display

use rust_decimal::{Decimal, RoundingStrategy};

/// Electricity consumption is reported to the nearest 0.001 kWh.
/// For billing, consumption is rounded to the nearest 0.01 kWh before it is
/// multiplied by the price, using round half to even: 0.015 rounds up to 0.02
/// while 0.025 rounds down to 0.02.
pub fn round_to_nearest_even_hundredth(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Rounding for display values. Halves round away from zero.
pub fn round_to_two_decimal_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Cost of a metered consumption at a unit price, rounding the consumption
/// the way the bill does first.
pub fn billable_cost(consumption_kwh: Decimal, unit_price: Decimal) -> Decimal {
    round_to_nearest_even_hundredth(consumption_kwh) * unit_price
}
