use rust_decimal::{Decimal, RoundingStrategy};

/// Scale of every money amount in the salon (two decimal places)
pub const MONEY_SCALE: u32 = 2;

/// Round a money amount to two decimal places, half away from zero.
///
/// The result always carries scale 2, so `50` renders as `50.00`.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Average money amount over `count` rows, zero when there are no rows
pub fn average_money(total: Decimal, count: i64) -> Decimal {
    if count <= 0 {
        return round_money(Decimal::ZERO);
    }
    round_money(total / Decimal::from(count))
}

/// Round a float to two decimal places
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 * part / total` rounded to two decimals, zero when `total` is zero
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round_hundredths(part as f64 * 100.0 / total as f64)
}

/// Minutes expressed as hours, without rounding
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}
