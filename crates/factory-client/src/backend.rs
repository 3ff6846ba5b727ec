//! Wallet library seam
//!
//! The panel never talks to a chain directly. Everything on-chain goes
//! through an implementation of [`FactoryBackend`] provided by the host
//! (an injected browser wallet, a JSON-RPC signer, or a test double).

use async_trait::async_trait;
use panel_core::{
    Address, BlockHeight, ChainId, FactoryMethod, OptionValue, TxHash, WalletError,
};
use serde::{Deserialize, Serialize};

/// Fee parameters as stored by the factory contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactoryOptions {
    /// Protocol share of the total fee, percent × 100
    pub protocol_fee: u64,
    /// Total swap fee, percent × 10
    pub total_fee: u64,
    /// Fee recipient (zero address when unset)
    pub fee_to: Address,
    /// Account allowed to change fee settings
    pub fee_to_setter: Address,
    pub all_fee_to_protocol: bool,
}

/// A single factory setter call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptionRequest {
    pub from: Address,
    pub factory: Address,
    pub method: FactoryMethod,
    pub value: OptionValue,
}

#[async_trait]
pub trait FactoryBackend: Send + Sync {
    /// Address validity as understood by the wallet library.
    fn is_valid_address(&self, address: &str) -> bool {
        Address::is_valid_format(address)
    }

    async fn get_factory_options(&self, factory: &Address) -> Result<FactoryOptions, WalletError>;

    /// Submit a setter transaction. Resolves with the hash once the wallet
    /// has broadcast it, not when it is mined.
    async fn set_factory_option(&self, request: &SetOptionRequest) -> Result<TxHash, WalletError>;

    /// Raw domain snapshot from the storage contract
    async fn get_domain_data(&self, storage: &Address) -> Result<serde_json::Value, WalletError>;

    /// Latest block of `chain_id`
    async fn block_number(&self, chain_id: ChainId) -> Result<BlockHeight, WalletError>;
}
