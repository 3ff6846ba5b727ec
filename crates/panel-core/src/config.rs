//! Configuration types for the factory panel

use serde::{Deserialize, Serialize};

use crate::ChainId;

/// Default wallet request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default popup lifetime before auto-dismiss (milliseconds)
pub const DEFAULT_POPUP_REMOVE_AFTER_MS: u64 = 15_000;

/// Panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    /// Chain the panel is administering
    #[serde(default = "default_chain_id")]
    pub chain_id: ChainId,

    /// Factory contract address (hex, `0x`-prefixed). Empty until known.
    #[serde(default)]
    pub factory: String,

    /// Storage contract holding domain/branding data. Empty until known.
    #[serde(default)]
    pub storage: String,

    /// Timeout applied to every wallet/contract call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default popup expiry
    #[serde(default = "default_popup_remove_after_ms")]
    pub popup_remove_after_ms: u64,
}

fn default_chain_id() -> ChainId {
    1
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_popup_remove_after_ms() -> u64 {
    DEFAULT_POPUP_REMOVE_AFTER_MS
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            factory: String::new(),
            storage: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            popup_remove_after_ms: default_popup_remove_after_ms(),
        }
    }
}
