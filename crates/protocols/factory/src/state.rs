//! Factory Fee Types

use panel_core::FeeError;
use serde::{Deserialize, Serialize};

use crate::calculator::{to_contract, to_interface};
use crate::constants::{MAX_PERCENT, MAX_TOTAL_FEE_PERCENT, PROTOCOL_FEE_RATIO, TOTAL_FEE_RATIO};

/// Which of the two factory fees a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeKind {
    Total,
    Protocol,
}

impl FeeKind {
    pub fn ratio(&self) -> u32 {
        match self {
            Self::Total => TOTAL_FEE_RATIO,
            Self::Protocol => PROTOCOL_FEE_RATIO,
        }
    }

    pub fn max_percent(&self) -> f64 {
        match self {
            Self::Total => MAX_TOTAL_FEE_PERCENT,
            Self::Protocol => MAX_PERCENT,
        }
    }
}

/// A fee in both representations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeValue {
    pub kind: FeeKind,
    /// Percentage as shown in the UI
    pub percent: f64,
    /// Integer stored by the contract
    pub encoded: u64,
}

impl FeeValue {
    /// Build from a UI percentage, enforcing the per-kind range.
    pub fn from_percent(kind: FeeKind, percent: f64) -> Result<Self, FeeError> {
        let encoded = to_contract(percent, kind.ratio())?;
        if percent > kind.max_percent() {
            return Err(FeeError::OutOfRange {
                percent,
                max: kind.max_percent(),
            });
        }
        Ok(Self {
            kind,
            percent: to_interface(encoded, kind.ratio())?,
            encoded,
        })
    }

    /// Build from a contract encoding, enforcing the per-kind range.
    pub fn from_encoded(kind: FeeKind, encoded: u64) -> Result<Self, FeeError> {
        let percent = to_interface(encoded, kind.ratio())?;
        if percent > kind.max_percent() {
            return Err(FeeError::OutOfRange {
                percent,
                max: kind.max_percent(),
            });
        }
        Ok(Self {
            kind,
            percent,
            encoded,
        })
    }
}

/// A selectable point on the protocol fee slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderMark {
    pub percent: f64,
    pub encoded: u64,
    /// Empty for unlabelled ticks
    pub label: String,
}
