//! Domain data, block height, popups and modals

use panel_core::{Address, BlockHeight, Error, Result, TxHash};
use panel_store::{Action, ApplicationModal, BrandingSnapshot, DomainSnapshot, PopupExpiry};

use crate::Panel;

/// Read domain and branding data from the storage contract into the store.
///
/// Returns `Ok(false)` when a newer load superseded this one.
pub async fn load_domain_data(panel: &Panel) -> Result<bool> {
    let inner = panel.inner();
    let storage = Address::parse(&inner.config.storage)?;

    let ticket = inner.domain_requests.issue();
    let raw = inner.client.get_domain_data(&storage).await.map_err(|e| {
        tracing::warn!("Failed to load domain data from {}: {}", storage, e);
        e
    })?;

    if !inner.domain_requests.is_current(ticket) {
        tracing::debug!(storage = %storage, "Dropping stale domain data");
        return Ok(false);
    }

    let domain: DomainSnapshot = serde_json::from_value(raw.clone())
        .map_err(|e| Error::Serialization(format!("domain data: {}", e)))?;
    let branding = match serde_json::from_value::<BrandingSnapshot>(raw) {
        Ok(branding) => Some(branding),
        Err(e) => {
            tracing::warn!(storage = %storage, "Skipping branding data: {}", e);
            None
        }
    };

    let factory = {
        let mut store = inner.store.lock().await;
        store.dispatch(Action::ApplyDomainSnapshot(domain));
        if let Some(branding) = branding {
            store.dispatch(Action::ApplyBrandingSnapshot(branding));
        }
        store.state().factory.clone()
    };
    tracing::info!(storage = %storage, factory = %factory, "Domain data loaded");

    // Adopt the stored factory unless the admin already typed one
    let mut form = inner.form.lock().await;
    if form.factory.is_empty() && !factory.is_empty() {
        form.set_factory(factory);
        form.validate_factory(&inner.client);
    }
    Ok(true)
}

/// Poll the wallet for the latest block of the current chain and record it.
///
/// Returns `Ok(None)` when the wallet moved to another chain meanwhile.
pub async fn refresh_block_number(panel: &Panel) -> Result<Option<BlockHeight>> {
    let chain_id = panel.chain_id().await;
    let block_number = panel.client().block_number(chain_id).await?;

    if panel.chain_id().await != chain_id {
        tracing::debug!(chain_id, block_number, "Dropping block height from previous chain");
        return Ok(None);
    }

    let mut store = panel.inner().store.lock().await;
    store.dispatch(Action::UpdateBlockNumber {
        chain_id,
        block_number,
    });
    Ok(Some(store.block_number(chain_id).unwrap_or(block_number)))
}

/// Record the outcome of a tracked transaction and show it as a popup.
///
/// The popup is keyed by the hash, so a repeated notice replaces the old one.
pub async fn finalize_transaction(panel: &Panel, hash: &TxHash, success: bool) -> bool {
    let chain_id = panel.chain_id().await;
    let content = panel
        .inner()
        .transactions
        .lock()
        .await
        .finalize_transaction(chain_id, hash, success);

    match content {
        Some(content) => {
            panel
                .dispatch(Action::AddPopup {
                    key: Some(hash.to_string()),
                    content,
                    expiry: PopupExpiry::Default,
                })
                .await;
            true
        }
        None => false,
    }
}

pub async fn remove_popup(panel: &Panel, key: &str) {
    panel
        .dispatch(Action::RemovePopup {
            key: key.to_string(),
        })
        .await;
}

pub async fn set_app_management(panel: &Panel, status: bool) {
    panel.dispatch(Action::SetAppManagement(status)).await;
}

pub async fn toggle_modal(panel: &Panel, modal: ApplicationModal) {
    panel.inner().store.lock().await.toggle_modal(modal);
}
