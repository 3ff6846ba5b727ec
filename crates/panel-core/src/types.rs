//! Core type definitions for the factory panel

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::WalletError;

/// The all-zero address contracts use as an "unset" sentinel
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Account/contract address (20 bytes, `0x`-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Parse and validate a hex address
    pub fn parse(addr: &str) -> Result<Self, WalletError> {
        if Self::is_valid_format(addr) {
            Ok(Self(addr.to_string()))
        } else {
            Err(WalletError::InvalidAddress {
                address: addr.to_string(),
            })
        }
    }

    /// Check the `0x` prefix and 20 bytes of hex payload.
    ///
    /// Checksum casing is not verified.
    pub fn is_valid_format(addr: &str) -> bool {
        let Some(body) = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
        else {
            return false;
        };
        body.len() == 40 && hex::decode(body).is_ok()
    }

    pub fn zero() -> Self {
        Self(ZERO_ADDRESS.to_string())
    }

    pub fn is_zero(&self) -> bool {
        is_zero_address(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Case-insensitive zero-address check
pub fn is_zero_address(addr: &str) -> bool {
    addr.eq_ignore_ascii_case(ZERO_ADDRESS)
}

/// Transaction hash (32 bytes, hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM chain id
pub type ChainId = u64;

/// Block height
pub type BlockHeight = u64;

/// Setter methods exposed by the factory contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactoryMethod {
    #[serde(rename = "setFeeToSetter")]
    SetFeeToSetter,
    #[serde(rename = "setFeeTo")]
    SetFeeTo,
    #[serde(rename = "setAllFeeToProtocol")]
    SetAllFeeToProtocol,
    #[serde(rename = "setTotalFee")]
    SetTotalFee,
    #[serde(rename = "setProtocolFee")]
    SetProtocolFee,
}

impl FactoryMethod {
    /// Contract method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetFeeToSetter => "setFeeToSetter",
            Self::SetFeeTo => "setFeeTo",
            Self::SetAllFeeToProtocol => "setAllFeeToProtocol",
            Self::SetTotalFee => "setTotalFee",
            Self::SetProtocolFee => "setProtocolFee",
        }
    }
}

impl fmt::Display for FactoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single argument passed to a factory setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Address(Address),
    Bool(bool),
    Uint(u64),
}

impl OptionValue {
    /// Whether this value has the argument type `method` expects
    pub fn matches(&self, method: FactoryMethod) -> bool {
        matches!(
            (method, self),
            (FactoryMethod::SetFeeToSetter, Self::Address(_))
                | (FactoryMethod::SetFeeTo, Self::Address(_))
                | (FactoryMethod::SetAllFeeToProtocol, Self::Bool(_))
                | (FactoryMethod::SetTotalFee, Self::Uint(_))
                | (FactoryMethod::SetProtocolFee, Self::Uint(_))
        )
    }
}
