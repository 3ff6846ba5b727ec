//! Popup notifications

use panel_core::{TxHash, DEFAULT_POPUP_REMOVE_AFTER_MS};
use serde::{Deserialize, Serialize};

/// What a popup displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PopupContent {
    /// A tracked transaction was mined
    Txn {
        hash: TxHash,
        success: bool,
        summary: Option<String>,
    },
    /// A subscribed token list has a new version
    ListUpdate { list_url: String, auto_update: bool },
}

/// When a popup should be dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PopupExpiry {
    /// Use the store's default lifetime
    #[default]
    Default,
    After(u64),
    /// Stays until removed explicitly
    Never,
}

impl PopupExpiry {
    pub fn resolve(self, default_ms: u64) -> Option<u64> {
        match self {
            Self::Default => Some(default_ms),
            Self::After(ms) => Some(ms),
            Self::Never => None,
        }
    }
}

/// An entry in the popup list.
///
/// Removal only clears `show`; the entry stays so the consumer can finish
/// its exit animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub key: String,
    pub show: bool,
    pub content: PopupContent,
    pub remove_after_ms: Option<u64>,
}

impl Popup {
    pub fn new(key: String, content: PopupContent, expiry: PopupExpiry) -> Self {
        Self {
            key,
            show: true,
            content,
            remove_after_ms: expiry.resolve(DEFAULT_POPUP_REMOVE_AFTER_MS),
        }
    }
}
