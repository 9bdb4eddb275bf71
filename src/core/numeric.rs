use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Rounds to `digits` significant decimal digits.
///
/// Applied after every label-step addition to keep accumulated tick values on
/// a stable lattice. Without it, repeated addition drifts visibly after a few
/// hundred steps.
#[must_use]
pub fn round_to_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }

    format!("{:.*e}", digits - 1, value)
        .parse::<f64>()
        .unwrap_or(value)
}

const MAX_DECIMAL_DIGITS: u32 = 15;

/// Number of decimal digits needed to represent `value` exactly.
///
/// Bounded at 15 digits, past which f64 cannot distinguish further decimals.
#[must_use]
pub fn decimal_precision(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }

    let mut scale = 1.0f64;
    for digits in 0..MAX_DECIMAL_DIGITS {
        if (value * scale).round() / scale == value {
            return digits;
        }
        scale *= 10.0;
    }

    MAX_DECIMAL_DIGITS
}

/// Smallest absolute gap between adjacent values, or `None` when fewer than
/// two values exist or no positive finite gap is found.
#[must_use]
pub fn min_adjacent_gap(values: impl Iterator<Item = f64> + Clone) -> Option<f64> {
    let shifted = values.clone().skip(1);
    let mut best: Option<f64> = None;

    for (left, right) in values.zip(shifted) {
        let gap = (right - left).abs();
        if !gap.is_finite() {
            continue;
        }
        best = Some(match best {
            Some(current) => current.min(gap),
            None => gap,
        });
    }

    best
}

#[cfg(test)]
mod tests {
    use super::{decimal_precision, min_adjacent_gap, round_to_significant};

    #[test]
    fn significant_rounding_snaps_accumulated_drift() {
        let drifted = 0.1 + 0.2;
        assert_eq!(round_to_significant(drifted, 10), 0.3);
    }

    #[test]
    fn significant_rounding_keeps_zero_and_non_finite() {
        assert_eq!(round_to_significant(0.0, 10), 0.0);
        assert!(round_to_significant(f64::NAN, 10).is_nan());
    }

    #[test]
    fn precision_counts_decimal_digits() {
        assert_eq!(decimal_precision(42.0), 0);
        assert_eq!(decimal_precision(0.5), 1);
        assert_eq!(decimal_precision(0.125), 3);
    }

    #[test]
    fn adjacent_gap_requires_two_values() {
        assert_eq!(min_adjacent_gap([7.0].into_iter()), None);
        assert_eq!(min_adjacent_gap([0.0, 10.0, 15.0].into_iter()), Some(5.0));
    }
}
