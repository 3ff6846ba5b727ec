//! In-memory wallet backend for tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use factory_client::{FactoryBackend, FactoryOptions, SetOptionRequest};
use panel_core::{Address, BlockHeight, ChainId, TxHash, WalletError};

pub const FACTORY: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";
pub const ACCOUNT: &str = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";

type Reply<T> = Result<T, WalletError>;

/// Options as read from a factory administered by [`ACCOUNT`]
pub fn options(total_fee: u64, protocol_fee: u64, fee_to: &str) -> FactoryOptions {
    FactoryOptions {
        protocol_fee,
        total_fee,
        fee_to: Address::new(fee_to),
        fee_to_setter: Address::new(ACCOUNT),
        all_fee_to_protocol: true,
    }
}

/// Answers are queued up front and consumed in call order
#[derive(Default)]
pub struct MockBackend {
    options: Mutex<VecDeque<(Duration, Reply<FactoryOptions>)>>,
    submits: Mutex<VecDeque<(Duration, Reply<TxHash>)>>,
    submitted: Mutex<Vec<SetOptionRequest>>,
    domains: Mutex<VecDeque<(Duration, Reply<serde_json::Value>)>>,
    blocks: Mutex<VecDeque<(Duration, BlockHeight)>>,
    block_chains: Mutex<Vec<ChainId>>,
}

impl MockBackend {
    pub fn push_options(&self, delay: Duration, reply: Reply<FactoryOptions>) {
        self.options.lock().unwrap().push_back((delay, reply));
    }

    pub fn push_submit(&self, reply: Reply<TxHash>) {
        self.push_delayed_submit(Duration::ZERO, reply);
    }

    pub fn push_delayed_submit(&self, delay: Duration, reply: Reply<TxHash>) {
        self.submits.lock().unwrap().push_back((delay, reply));
    }

    pub fn push_domain(&self, delay: Duration, reply: Reply<serde_json::Value>) {
        self.domains.lock().unwrap().push_back((delay, reply));
    }

    pub fn push_block(&self, delay: Duration, height: BlockHeight) {
        self.blocks.lock().unwrap().push_back((delay, height));
    }

    /// Chains asked for their block height, in call order
    pub fn block_chains(&self) -> Vec<ChainId> {
        self.block_chains.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<SetOptionRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

fn no_reply<T>() -> Reply<T> {
    Err(WalletError::from_code(-32000, "no reply queued"))
}

#[async_trait]
impl FactoryBackend for MockBackend {
    async fn get_factory_options(&self, _factory: &Address) -> Reply<FactoryOptions> {
        let next = self.options.lock().unwrap().pop_front();
        match next {
            Some((delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => no_reply(),
        }
    }

    async fn set_factory_option(&self, request: &SetOptionRequest) -> Reply<TxHash> {
        self.submitted.lock().unwrap().push(request.clone());
        let next = self.submits.lock().unwrap().pop_front();
        match next {
            Some((delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => no_reply(),
        }
    }

    async fn get_domain_data(&self, _storage: &Address) -> Reply<serde_json::Value> {
        let next = self.domains.lock().unwrap().pop_front();
        match next {
            Some((delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            None => no_reply(),
        }
    }

    async fn block_number(&self, chain_id: ChainId) -> Reply<BlockHeight> {
        self.block_chains.lock().unwrap().push(chain_id);
        let next = self.blocks.lock().unwrap().pop_front();
        match next {
            Some((delay, height)) => {
                tokio::time::sleep(delay).await;
                Ok(height)
            }
            None => no_reply(),
        }
    }
}
