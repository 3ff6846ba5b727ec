//! Submitted transaction tracking
//!
//! Every broadcast setter call is recorded with a human-readable summary.
//! When the host learns the outcome it finalizes the entry, which yields the
//! popup content to show.

use std::time::{SystemTime, UNIX_EPOCH};

use panel_core::{Address, ChainId, TxHash};
use serde::Serialize;

use crate::popup::PopupContent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub hash: TxHash,
    pub chain_id: ChainId,
    pub from: Address,
    pub summary: Option<String>,
    /// Unix millis when broadcast
    pub added_time: u64,
    /// Unix millis when mined, if known
    pub confirmed_time: Option<u64>,
    pub success: Option<bool>,
}

impl TransactionDetails {
    pub fn is_pending(&self) -> bool {
        self.confirmed_time.is_none()
    }
}

#[derive(Debug, Default)]
pub struct TransactionTracker {
    items: Vec<TransactionDetails>,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a broadcast transaction. Returns false if already tracked.
    pub fn add_transaction(
        &mut self,
        chain_id: ChainId,
        hash: TxHash,
        from: Address,
        summary: Option<String>,
    ) -> bool {
        if self.get(chain_id, &hash).is_some() {
            tracing::warn!(hash = %hash, "Attempted to add existing transaction");
            return false;
        }
        tracing::info!(hash = %hash, chain_id, summary = ?summary, "Tracking transaction");
        self.items.push(TransactionDetails {
            hash,
            chain_id,
            from,
            summary,
            added_time: now_millis(),
            confirmed_time: None,
            success: None,
        });
        true
    }

    /// Mark a transaction as mined and build its popup.
    ///
    /// Returns `None` for unknown or already finalized hashes.
    pub fn finalize_transaction(
        &mut self,
        chain_id: ChainId,
        hash: &TxHash,
        success: bool,
    ) -> Option<PopupContent> {
        let item = self
            .items
            .iter_mut()
            .find(|tx| tx.chain_id == chain_id && &tx.hash == hash && tx.is_pending())?;

        item.confirmed_time = Some(now_millis());
        item.success = Some(success);
        tracing::info!(hash = %hash, success, "Transaction finalized");

        Some(PopupContent::Txn {
            hash: item.hash.clone(),
            success,
            summary: item.summary.clone(),
        })
    }

    pub fn get(&self, chain_id: ChainId, hash: &TxHash) -> Option<&TransactionDetails> {
        self.items
            .iter()
            .find(|tx| tx.chain_id == chain_id && &tx.hash == hash)
    }

    pub fn pending(&self, chain_id: ChainId) -> Vec<&TransactionDetails> {
        self.items
            .iter()
            .filter(|tx| tx.chain_id == chain_id && tx.is_pending())
            .collect()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
