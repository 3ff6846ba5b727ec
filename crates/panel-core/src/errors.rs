//! Error types for the factory panel

use thiserror::Error;

/// Error code a wallet returns when the user rejects a request (EIP-1193)
pub const USER_REJECTION_CODE: i64 = 4001;

/// Core errors that can occur in the panel
#[derive(Debug, Error)]
pub enum Error {
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Wallet provider and contract call errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Request rejected by the user")]
    Rejected,

    #[error("Wallet returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: &'static str, secs: u64 },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },
}

impl WalletError {
    /// Build an error from a provider error code
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTION_CODE {
            Self::Rejected
        } else {
            Self::Rpc {
                code,
                message: message.into(),
            }
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConnected => "not_connected",
            Self::Rejected => "rejected",
            Self::Rpc { .. } => "rpc_error",
            Self::Timeout { .. } => "timeout",
            Self::InvalidAddress { .. } => "invalid_address",
        }
    }
}

/// Fee conversion errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeeError {
    #[error("Fee must not be negative: {value}")]
    Negative { value: f64 },

    #[error("Fee is not a finite number")]
    NotFinite,

    #[error("Fee ratio must be greater than zero")]
    ZeroRatio,

    #[error("Fee {percent}% is outside 0%..={max}%")]
    OutOfRange { percent: f64, max: f64 },
}

impl FeeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Negative { .. } => "negative_fee",
            Self::NotFinite => "not_finite",
            Self::ZeroRatio => "zero_ratio",
            Self::OutOfRange { .. } => "fee_out_of_range",
        }
    }
}

/// Result type alias for panel operations
pub type Result<T> = std::result::Result<T, Error>;
