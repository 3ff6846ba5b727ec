//! Factory panel application library
//!
//! Wires the wallet client, the application store, the fee form and the
//! transaction tracker into a single cloneable [`Panel`] handle.

pub mod commands;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use factory_client::{FactoryBackend, FactoryClient, WalletContext};
use panel_core::{Address, ChainId, PanelConfig, WalletError};
use panel_store::{Action, ApplicationState, RequestSequencer, Store, TransactionTracker};
use tokio::sync::{Mutex, RwLock};

use commands::FactoryForm;

/// Install the global tracing subscriber
pub fn init_tracing() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["factory_panel_lib=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Read a JSON panel config; missing fields take their defaults
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<PanelConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PanelConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;

    if !config.factory.is_empty() && !Address::is_valid_format(&config.factory) {
        anyhow::bail!("Invalid factory address in config: {}", config.factory);
    }
    Ok(config)
}

/// Shared panel state
#[derive(Clone)]
pub struct Panel {
    inner: Arc<PanelInner>,
}

pub(crate) struct PanelInner {
    pub(crate) config: PanelConfig,
    pub(crate) client: FactoryClient,
    pub(crate) wallet: RwLock<WalletContext>,
    pub(crate) store: Mutex<Store>,
    pub(crate) form: Mutex<FactoryForm>,
    pub(crate) transactions: Mutex<TransactionTracker>,
    pub(crate) domain_requests: RequestSequencer,
    pub(crate) option_requests: RequestSequencer,
}

impl Panel {
    pub fn new(config: PanelConfig, backend: Arc<dyn FactoryBackend>) -> Self {
        let client = FactoryClient::with_config(backend, &config);
        let mut store = Store::with_config(&config);
        if !config.factory.is_empty() {
            // Until domain data arrives, the configured factory is the best guess
            store.dispatch(Action::ApplyDomainSnapshot(panel_store::DomainSnapshot {
                factory: Some(config.factory.clone()),
                ..Default::default()
            }));
        }

        let mut form = FactoryForm::new(store.state());
        form.validate_factory(&client);

        tracing::info!(chain_id = config.chain_id, factory = %config.factory, "Panel created");

        Self {
            inner: Arc::new(PanelInner {
                config,
                client,
                wallet: RwLock::new(WalletContext::default()),
                store: Mutex::new(store),
                form: Mutex::new(form),
                transactions: Mutex::new(TransactionTracker::new()),
                domain_requests: RequestSequencer::new(),
                option_requests: RequestSequencer::new(),
            }),
        }
    }

    pub(crate) fn inner(&self) -> &PanelInner {
        &self.inner
    }

    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &FactoryClient {
        &self.inner.client
    }

    /// Get current wallet context
    pub async fn wallet(&self) -> WalletContext {
        self.inner.wallet.read().await.clone()
    }

    /// Set connected wallet with address validation
    pub async fn connect_wallet(&self, account: &str, chain_id: ChainId) -> Result<(), WalletError> {
        let account = Address::parse(account)?;
        tracing::info!(account = %account, chain_id, "Wallet connected");
        *self.inner.wallet.write().await = WalletContext::connected(account, chain_id);
        Ok(())
    }

    pub async fn disconnect_wallet(&self) {
        *self.inner.wallet.write().await = WalletContext::default();
    }

    /// Chain of the connected wallet, falling back to the configured one
    pub async fn chain_id(&self) -> ChainId {
        self.wallet()
            .await
            .chain_id
            .unwrap_or(self.inner.config.chain_id)
    }

    pub async fn dispatch(&self, action: Action) {
        self.inner.store.lock().await.dispatch(action);
    }

    /// Copy of the current application state
    pub async fn state(&self) -> ApplicationState {
        self.inner.store.lock().await.state().clone()
    }

    /// Copy of the current fee form
    pub async fn form(&self) -> FactoryForm {
        self.inner.form.lock().await.clone()
    }

    /// Run `f` against the fee form
    pub async fn update_form<R>(&self, f: impl FnOnce(&mut FactoryForm) -> R) -> R {
        let mut form = self.inner.form.lock().await;
        f(&mut form)
    }
}
