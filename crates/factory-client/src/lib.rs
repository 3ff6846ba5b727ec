//! factory-client: Wrapper around the host wallet library
//!
//! This crate provides a high-level client for reading and writing factory
//! fee settings, with request timeouts and argument checks on top of a
//! [`FactoryBackend`] supplied by the host.

pub mod backend;

use std::sync::Arc;
use std::time::Duration;

use panel_core::{Address, BlockHeight, ChainId, PanelConfig, TxHash, WalletError};

pub use backend::{FactoryBackend, FactoryOptions, SetOptionRequest};

/// Result type for client operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Connected wallet: the account that signs and the chain it is on
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletContext {
    pub account: Option<Address>,
    pub chain_id: Option<ChainId>,
}

impl WalletContext {
    pub fn connected(account: Address, chain_id: ChainId) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

/// High-level factory client
#[derive(Clone)]
pub struct FactoryClient {
    backend: Arc<dyn FactoryBackend>,
    timeout: Duration,
}

impl FactoryClient {
    pub fn new(backend: Arc<dyn FactoryBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn with_config(backend: Arc<dyn FactoryBackend>, config: &PanelConfig) -> Self {
        Self::new(backend, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn is_valid_address(&self, address: &str) -> bool {
        self.backend.is_valid_address(address)
    }

    /// Read the factory's current fee settings
    pub async fn get_factory_options(&self, factory: &Address) -> Result<FactoryOptions> {
        self.check_address(factory)?;
        tracing::debug!(factory = %factory, "Reading factory options");
        self.timed_request("getFactoryOptions", self.backend.get_factory_options(factory))
            .await
    }

    /// Submit a setter call and return the broadcast transaction hash
    pub async fn set_factory_option(&self, request: &SetOptionRequest) -> Result<TxHash> {
        self.check_address(&request.factory)?;
        if !request.value.matches(request.method) {
            return Err(WalletError::Rpc {
                code: -32602,
                message: format!("invalid argument for {}", request.method),
            });
        }

        tracing::info!(
            factory = %request.factory,
            method = %request.method,
            "Submitting factory option"
        );
        let hash = self
            .timed_request("setFactoryOption", self.backend.set_factory_option(request))
            .await?;
        tracing::info!(hash = %hash, "Factory option transaction broadcast");
        Ok(hash)
    }

    /// Raw domain snapshot from the storage contract
    pub async fn get_domain_data(&self, storage: &Address) -> Result<serde_json::Value> {
        self.check_address(storage)?;
        self.timed_request("getDomainData", self.backend.get_domain_data(storage))
            .await
    }

    pub async fn block_number(&self, chain_id: ChainId) -> Result<BlockHeight> {
        self.timed_request("blockNumber", self.backend.block_number(chain_id))
            .await
    }

    fn check_address(&self, address: &Address) -> Result<()> {
        if self.backend.is_valid_address(address.as_str()) {
            Ok(())
        } else {
            Err(WalletError::InvalidAddress {
                address: address.to_string(),
            })
        }
    }

    async fn timed_request<T>(
        &self,
        operation: &'static str,
        fut: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| {
                tracing::warn!("{} timed out after {}s", operation, self.timeout.as_secs());
                WalletError::Timeout {
                    operation,
                    secs: self.timeout.as_secs(),
                }
            })?
    }
}
