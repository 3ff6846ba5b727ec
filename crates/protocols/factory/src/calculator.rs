//! Fee Calculator
//!
//! Pure conversion functions between UI percentages and contract encodings.
//! No async, no wallet.
//!
//!   contract  = round(percent * ratio)
//!   interface = contract / ratio

use panel_core::FeeError;

use crate::constants::MAX_PERCENT;

/// Convert a UI percentage into the contract's integer encoding.
pub fn to_contract(percent: f64, ratio: u32) -> Result<u64, FeeError> {
    if ratio == 0 {
        return Err(FeeError::ZeroRatio);
    }
    if !percent.is_finite() {
        return Err(FeeError::NotFinite);
    }
    if percent < 0.0 {
        return Err(FeeError::Negative { value: percent });
    }
    Ok((percent * ratio as f64).round() as u64)
}

/// Convert a contract encoding back into a UI percentage.
pub fn to_interface(encoded: u64, ratio: u32) -> Result<f64, FeeError> {
    if ratio == 0 {
        return Err(FeeError::ZeroRatio);
    }
    Ok(encoded as f64 / ratio as f64)
}

/// Whether `percent` encodes to the value currently stored on-chain.
///
/// Returns false while nothing has been fetched yet, or when the input
/// cannot be encoded at all.
pub fn is_equal_current_fee(current: Option<u64>, percent: f64, ratio: u32) -> bool {
    match (current, to_contract(percent, ratio)) {
        (Some(current), Ok(encoded)) => current == encoded,
        _ => false,
    }
}

/// Share of the total fee left to liquidity providers.
pub fn liquidity_provider_share(protocol_percent: f64) -> f64 {
    (MAX_PERCENT - protocol_percent).clamp(0.0, MAX_PERCENT)
}
