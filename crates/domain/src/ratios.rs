// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ratio and percentage helpers.
//!
//! None of these functions can fail: a zero denominator yields either a
//! placeholder (`None`) or a division by one.

use crate::types::Activity;
use num_traits::ToPrimitive;

/// Placeholder rendered for a percentage with a zero denominator.
pub const NOT_APPLICABLE: &str = "N/A";

/// Returns `numerator / denominator` as a whole percentage.
///
/// Returns `None` when `denominator` is zero.
#[must_use]
pub fn percentage(numerator: usize, denominator: usize) -> Option<u32> {
    if denominator == 0 {
        return None;
    }
    let ratio: f64 = numerator.to_f64()? / denominator.to_f64()?;
    (ratio * 100.0).round().to_u32()
}

/// Formats a percentage for display, using [`NOT_APPLICABLE`] for `None`.
#[must_use]
pub fn format_percentage(value: Option<u32>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), |v| format!("{v}%"))
}

/// Rounds `value` to `places` decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor: f64 = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Divides `numerator` by `denominator`, treating a zero denominator as one.
///
/// The result is rounded to two decimal places.
#[must_use]
pub fn safe_ratio(numerator: usize, denominator: usize) -> f64 {
    let numerator: f64 = numerator.to_f64().unwrap_or(0.0);
    let denominator: f64 = denominator.max(1).to_f64().unwrap_or(1.0);
    round_to(numerator / denominator, 2)
}

/// Average activity price, rounded to two decimal places.
///
/// A missing price counts as zero. An empty list averages to zero.
#[must_use]
pub fn average_price(activities: &[Activity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let total: f64 = activities.iter().map(|a| a.price.unwrap_or(0.0)).sum();
    let count: f64 = activities.len().to_f64().unwrap_or(1.0);
    round_to(total / count, 2)
}
