//! Factory Constants
//!
//! Fee encodings used by the factory contract.

/// Total fee is stored as percent × 10 (one decimal place)
pub const TOTAL_FEE_RATIO: u32 = 10;

/// Protocol fee is stored as percent × 100 (two decimal places)
pub const PROTOCOL_FEE_RATIO: u32 = 100;

/// Upper bound for the protocol share
pub const MAX_PERCENT: f64 = 100.0;

/// Upper bound for the total fee
pub const MAX_TOTAL_FEE_PERCENT: f64 = 99.0;

/// Decimal places accepted in the total fee input
pub const TOTAL_FEE_MAX_DECIMALS: usize = 1;

/// Slider marks
pub mod marks {
    /// Protocol fee encodings below this threshold (16%) are only offered
    /// when listed in [`ALLOWED_LOW_PROTOCOL_FEES`]
    pub const LOW_PROTOCOL_FEE_THRESHOLD: u64 = 1_600;

    /// 0.05%, 0.1%, 0.5%, 1%, 3%, 5%, 8%, 10%, 14%
    pub const ALLOWED_LOW_PROTOCOL_FEES: [u64; 9] = [5, 10, 50, 100, 300, 500, 800, 1_000, 1_400];

    /// Marks shown when the contract reports no allowed values
    pub const FALLBACK_MARKS: [u64; 2] = [100, 10_000];
}
