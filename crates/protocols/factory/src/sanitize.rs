//! Numeric input gate
//!
//! Raw text from a fee input is either accepted as-is or ignored, in which
//! case the caller keeps the previous value. Nothing here returns an error.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_TOTAL_FEE_PERCENT, TOTAL_FEE_MAX_DECIMALS};

/// Accepted range and precision for a numeric input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub max_decimals: usize,
}

/// Total fee input: 0% - 99% in steps of 0.1
pub const TOTAL_FEE_BOUNDS: InputBounds = InputBounds {
    min: 0.0,
    max: MAX_TOTAL_FEE_PERCENT,
    max_decimals: TOTAL_FEE_MAX_DECIMALS,
};

/// Whether `raw` may replace the current input value.
///
/// The empty string is accepted so the field can be cleared.
pub fn accept_input(raw: &str, bounds: &InputBounds) -> bool {
    if raw.is_empty() {
        return true;
    }
    if raw.contains('-') {
        return false;
    }
    if !raw.chars().all(|c| c.is_ascii_digit() || c == '.') || raw.matches('.').count() > 1 {
        return false;
    }

    let Ok(value) = raw.parse::<f64>() else {
        return false;
    };
    if !value.is_finite() || value < bounds.min || value > bounds.max {
        return false;
    }

    match raw.split_once('.') {
        Some((_, decimals)) => decimals.len() <= bounds.max_decimals,
        None => true,
    }
}

/// Return the value the input should hold after the user typed `raw`.
pub fn sanitize_input(raw: &str, previous: &str, bounds: &InputBounds) -> String {
    if accept_input(raw, bounds) {
        raw.to_string()
    } else {
        tracing::trace!(raw, previous, "Input rejected");
        previous.to_string()
    }
}

/// Parse an accepted input into a percentage. Empty means "no value".
pub fn parse_percent(input: &str) -> Option<f64> {
    if input.is_empty() {
        return None;
    }
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}
