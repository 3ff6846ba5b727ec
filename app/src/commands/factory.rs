//! Factory fee settings: form state and the fetch/save commands

use factory::{
    is_equal_current_fee, liquidity_provider_share, parse_percent, protocol_fee_marks,
    sanitize_input, snap_to_mark, to_contract, to_interface, FeeKind, FeeValue, SliderMark,
    PROTOCOL_FEE_RATIO, TOTAL_FEE_BOUNDS, TOTAL_FEE_RATIO,
};
use factory_client::{FactoryClient, FactoryOptions, SetOptionRequest};
use panel_core::{Address, Error, FactoryMethod, OptionValue, Result, TxHash, WalletError};
use panel_store::ApplicationState;

use crate::Panel;

/// Outcome of a save that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Submitted(TxHash),
    /// The user declined in the wallet; nothing to report
    Rejected,
}

/// Contract call the form is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    Fetch,
    Save,
}

/// Editable factory settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryForm {
    pub factory: String,
    /// Result of the last [`FactoryForm::validate_factory`] call
    pub factory_is_correct: bool,
    pub admin: String,
    pub fee_recipient: String,
    pub all_fees_to_admin: bool,
    /// Total fee input text, always a sanitized value
    pub total_fee: String,
    /// Protocol fee slider position in percent
    pub protocol_fee: Option<f64>,
    /// While set, every save is disabled
    pub pending: Option<PendingCall>,
}

impl FactoryForm {
    /// Seed the form from what the store already knows
    pub fn new(state: &ApplicationState) -> Self {
        let total_fee = state
            .total_fee
            .and_then(|fee| to_interface(fee, TOTAL_FEE_RATIO).ok())
            .map(|percent| percent.to_string())
            .unwrap_or_default();
        let protocol_fee = state
            .protocol_fee
            .and_then(|fee| to_interface(fee, PROTOCOL_FEE_RATIO).ok());

        Self {
            factory: state.factory.clone(),
            total_fee,
            protocol_fee,
            ..Default::default()
        }
    }

    /// Change the factory address. Call [`FactoryForm::validate_factory`] afterwards.
    pub fn set_factory(&mut self, factory: impl Into<String>) {
        self.factory = factory.into();
        self.factory_is_correct = false;
    }

    pub fn validate_factory(&mut self, client: &FactoryClient) -> bool {
        self.factory_is_correct = client.is_valid_address(&self.factory);
        self.factory_is_correct
    }

    pub fn set_admin(&mut self, admin: impl Into<String>) {
        self.admin = admin.into();
    }

    pub fn set_fee_recipient(&mut self, recipient: impl Into<String>) {
        self.fee_recipient = recipient.into();
    }

    pub fn set_all_fees_to_admin(&mut self, all: bool) {
        self.all_fees_to_admin = all;
    }

    /// Feed raw text from the total fee input; invalid text is ignored.
    pub fn input_total_fee(&mut self, raw: &str) {
        self.total_fee = sanitize_input(raw, &self.total_fee, &TOTAL_FEE_BOUNDS);
    }

    /// Move the protocol fee slider. Only mark positions are selectable.
    pub fn select_protocol_fee(&mut self, percent: f64, marks: &[SliderMark]) -> bool {
        match snap_to_mark(marks, percent) {
            Some(mark) => {
                self.protocol_fee = Some(mark.percent);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the form with freshly read contract settings.
    ///
    /// A fee outside its range is left as it was and reported; everything
    /// else is still applied.
    pub fn apply_options(&mut self, options: &FactoryOptions) -> Result<()> {
        self.admin = options.fee_to_setter.to_string();
        self.fee_recipient = if options.fee_to.is_zero() {
            String::new()
        } else {
            options.fee_to.to_string()
        };
        self.all_fees_to_admin = options.all_fee_to_protocol;

        let total = FeeValue::from_encoded(FeeKind::Total, options.total_fee);
        if let Ok(total) = &total {
            self.total_fee = total.percent.to_string();
        }
        let protocol = FeeValue::from_encoded(FeeKind::Protocol, options.protocol_fee);
        if let Ok(protocol) = &protocol {
            self.protocol_fee = Some(protocol.percent);
        }

        total?;
        protocol?;
        Ok(())
    }

    /// Share left to liquidity providers for the selected protocol fee
    pub fn liquidity_provider_share(&self) -> Option<f64> {
        self.protocol_fee.map(liquidity_provider_share)
    }

    /// Whether the save button for `method` is enabled
    pub fn can_save(&self, method: FactoryMethod, state: &ApplicationState) -> bool {
        if self.is_pending() {
            return false;
        }
        match method {
            FactoryMethod::SetFeeToSetter => !self.admin.is_empty(),
            FactoryMethod::SetFeeTo => !self.fee_recipient.is_empty(),
            FactoryMethod::SetAllFeeToProtocol => self.factory_is_correct,
            FactoryMethod::SetTotalFee => match parse_percent(&self.total_fee) {
                Some(percent) => {
                    self.factory_is_correct
                        && !is_equal_current_fee(state.total_fee, percent, TOTAL_FEE_RATIO)
                }
                None => false,
            },
            FactoryMethod::SetProtocolFee => match self.protocol_fee {
                Some(percent) => {
                    self.factory_is_correct
                        && !is_equal_current_fee(state.protocol_fee, percent, PROTOCOL_FEE_RATIO)
                }
                None => false,
            },
        }
    }

    /// The single argument `method` is called with
    pub fn option_value(&self, method: FactoryMethod) -> Result<OptionValue> {
        match method {
            FactoryMethod::SetFeeToSetter => Ok(OptionValue::Address(Address::parse(&self.admin)?)),
            FactoryMethod::SetFeeTo => {
                Ok(OptionValue::Address(Address::parse(&self.fee_recipient)?))
            }
            FactoryMethod::SetAllFeeToProtocol => Ok(OptionValue::Bool(self.all_fees_to_admin)),
            FactoryMethod::SetTotalFee => {
                let percent = parse_percent(&self.total_fee).ok_or(Error::InvalidInput {
                    field: "total fee",
                    reason: "empty".to_string(),
                })?;
                let fee = FeeValue::from_percent(FeeKind::Total, percent)?;
                Ok(OptionValue::Uint(fee.encoded))
            }
            FactoryMethod::SetProtocolFee => {
                let percent = self.protocol_fee.ok_or(Error::InvalidInput {
                    field: "protocol fee",
                    reason: "not selected".to_string(),
                })?;
                Ok(OptionValue::Uint(to_contract(percent, PROTOCOL_FEE_RATIO)?))
            }
        }
    }
}

/// Slider marks for the factory's allowed protocol fees
pub async fn protocol_fee_slider(panel: &Panel) -> Vec<SliderMark> {
    let store = panel.inner().store.lock().await;
    protocol_fee_marks(&store.state().possible_protocol_percent)
}

/// Change the factory address and re-check it
pub async fn set_factory(panel: &Panel, factory: &str) -> bool {
    let mut form = panel.inner().form.lock().await;
    form.set_factory(factory);
    form.validate_factory(panel.client())
}

/// Read the factory's settings into the form.
///
/// Returns `Ok(false)` when a newer fetch superseded this one. Refused while
/// a save is in flight.
pub async fn fetch_contract_options(panel: &Panel) -> Result<bool> {
    let inner = panel.inner();
    let (factory, ticket) = {
        let mut form = inner.form.lock().await;
        if !form.factory_is_correct {
            return Err(WalletError::InvalidAddress {
                address: form.factory.clone(),
            }
            .into());
        }
        if form.pending == Some(PendingCall::Save) {
            return Err(Error::InvalidInput {
                field: "factory options",
                reason: "a save is in flight".to_string(),
            });
        }
        form.pending = Some(PendingCall::Fetch);
        (
            Address::new(form.factory.clone()),
            inner.option_requests.issue(),
        )
    };

    let result = inner.client.get_factory_options(&factory).await;

    let mut form = inner.form.lock().await;
    if !inner.option_requests.is_current(ticket) {
        tracing::debug!(factory = %factory, "Dropping stale factory options");
        return Ok(false);
    }
    form.pending = None;

    match result {
        Ok(options) => {
            tracing::info!(
                factory = %factory,
                total_fee = options.total_fee,
                protocol_fee = options.protocol_fee,
                "Fetched factory options"
            );
            form.apply_options(&options)?;
            Ok(true)
        }
        Err(e) => {
            tracing::warn!("Failed to fetch factory options for {}: {}", factory, e);
            Err(e.into())
        }
    }
}

/// Submit one setting to the factory.
///
/// Wallet rejections are not errors: they yield [`SaveOutcome::Rejected`].
pub async fn save_option(panel: &Panel, method: FactoryMethod) -> Result<SaveOutcome> {
    let inner = panel.inner();
    let wallet = panel.wallet().await;
    let from = wallet.account.ok_or(WalletError::NotConnected)?;
    let chain_id = wallet.chain_id.unwrap_or(inner.config.chain_id);

    let request = {
        let state = inner.store.lock().await.state().clone();
        let mut form = inner.form.lock().await;
        if !form.can_save(method, &state) {
            return Err(Error::InvalidInput {
                field: "factory option",
                reason: format!("nothing to save for {}", method),
            });
        }
        let value = form.option_value(method)?;
        form.pending = Some(PendingCall::Save);
        SetOptionRequest {
            from: from.clone(),
            factory: Address::new(form.factory.clone()),
            method,
            value,
        }
    };

    let result = inner.client.set_factory_option(&request).await;
    inner.form.lock().await.pending = None;

    match result {
        Ok(hash) => {
            inner.transactions.lock().await.add_transaction(
                chain_id,
                hash.clone(),
                from,
                Some(format!("Chain {}. Save factory settings", chain_id)),
            );
            Ok(SaveOutcome::Submitted(hash))
        }
        Err(e) if e.is_user_rejection() => {
            tracing::debug!(method = %method, "Save rejected in wallet");
            Ok(SaveOutcome::Rejected)
        }
        Err(e) => {
            tracing::warn!("Failed to save {}: {}", method, e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use panel_core::{FeeError, PanelConfig, TxHash, ZERO_ADDRESS};
    use panel_store::{Action, DomainSnapshot};

    use super::*;
    use crate::testing::{options, MockBackend, ACCOUNT, FACTORY};

    fn panel_with(backend: MockBackend) -> (Panel, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        let config = PanelConfig {
            factory: FACTORY.to_string(),
            ..PanelConfig::default()
        };
        (Panel::new(config, backend.clone()), backend)
    }

    #[test]
    fn test_form_seeded_from_state() {
        let state = ApplicationState {
            factory: FACTORY.to_string(),
            total_fee: Some(3),
            protocol_fee: Some(1_000),
            ..Default::default()
        };
        let form = FactoryForm::new(&state);
        assert_eq!(form.factory, FACTORY);
        assert_eq!(form.total_fee, "0.3");
        assert_eq!(form.protocol_fee, Some(10.0));
        assert!(!form.factory_is_correct);
    }

    #[test]
    fn test_total_fee_input_gate() {
        let mut form = FactoryForm::default();
        form.input_total_fee("3.1");
        assert_eq!(form.total_fee, "3.1");
        form.input_total_fee("3.14");
        assert_eq!(form.total_fee, "3.1");
        form.input_total_fee("-5");
        assert_eq!(form.total_fee, "3.1");
        form.input_total_fee("100");
        assert_eq!(form.total_fee, "3.1");
        form.input_total_fee("");
        assert_eq!(form.total_fee, "");
    }

    #[test]
    fn test_protocol_fee_only_on_marks() {
        let marks = protocol_fee_marks(&[5, 1_000, 10_000]);
        let mut form = FactoryForm::default();
        assert!(form.select_protocol_fee(10.0, &marks));
        assert!(!form.select_protocol_fee(12.0, &marks));
        assert_eq!(form.protocol_fee, Some(10.0));
        assert_eq!(form.liquidity_provider_share(), Some(90.0));
    }

    #[test]
    fn test_can_save_rules() {
        let state = ApplicationState {
            total_fee: Some(3),
            protocol_fee: Some(1_000),
            ..Default::default()
        };
        let mut form = FactoryForm::new(&state);

        assert!(!form.can_save(FactoryMethod::SetFeeToSetter, &state));
        form.set_admin(ACCOUNT);
        assert!(form.can_save(FactoryMethod::SetFeeToSetter, &state));

        // Factory not validated yet
        assert!(!form.can_save(FactoryMethod::SetAllFeeToProtocol, &state));
        form.factory_is_correct = true;
        assert!(form.can_save(FactoryMethod::SetAllFeeToProtocol, &state));

        // Unchanged fees have nothing to save
        assert!(!form.can_save(FactoryMethod::SetTotalFee, &state));
        assert!(!form.can_save(FactoryMethod::SetProtocolFee, &state));

        form.input_total_fee("0.5");
        assert!(form.can_save(FactoryMethod::SetTotalFee, &state));
        form.input_total_fee("");
        assert!(!form.can_save(FactoryMethod::SetTotalFee, &state));

        form.protocol_fee = Some(14.0);
        assert!(form.can_save(FactoryMethod::SetProtocolFee, &state));

        // Zero is a real value, not "empty"
        form.input_total_fee("0");
        assert!(form.can_save(FactoryMethod::SetTotalFee, &state));
    }

    #[test]
    fn test_option_values() {
        let mut form = FactoryForm {
            admin: ACCOUNT.to_string(),
            all_fees_to_admin: true,
            total_fee: "0.3".to_string(),
            protocol_fee: Some(5.0),
            ..Default::default()
        };
        assert_eq!(
            form.option_value(FactoryMethod::SetFeeToSetter).unwrap(),
            OptionValue::Address(Address::new(ACCOUNT))
        );
        assert_eq!(
            form.option_value(FactoryMethod::SetAllFeeToProtocol).unwrap(),
            OptionValue::Bool(true)
        );
        assert_eq!(
            form.option_value(FactoryMethod::SetTotalFee).unwrap(),
            OptionValue::Uint(3)
        );
        assert_eq!(
            form.option_value(FactoryMethod::SetProtocolFee).unwrap(),
            OptionValue::Uint(500)
        );
        // Recipient left empty
        assert!(form.option_value(FactoryMethod::SetFeeTo).is_err());

        form.total_fee = String::new();
        assert!(matches!(
            form.option_value(FactoryMethod::SetTotalFee),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_contract_options() {
        let backend = MockBackend::default();
        backend.push_options(Duration::ZERO, Ok(options(990, 1_400, ZERO_ADDRESS)));
        let (panel, _) = panel_with(backend);

        assert!(fetch_contract_options(&panel).await.unwrap());

        let form = panel.form().await;
        assert_eq!(form.total_fee, "99");
        assert_eq!(form.protocol_fee, Some(14.0));
        assert_eq!(form.admin, ACCOUNT);
        assert_eq!(form.fee_recipient, "");
        assert!(form.all_fees_to_admin);
        assert!(!form.is_pending());
    }

    #[tokio::test]
    async fn test_fetch_error_is_surfaced() {
        let backend = MockBackend::default();
        backend.push_options(
            Duration::ZERO,
            Err(WalletError::from_code(-32000, "header not found")),
        );
        let (panel, _) = panel_with(backend);

        let err = fetch_contract_options(&panel).await.unwrap_err();
        assert!(matches!(err, Error::Wallet(WalletError::Rpc { code: -32000, .. })));
        assert!(!panel.form().await.is_pending());
    }

    #[tokio::test]
    async fn test_fetch_requires_valid_factory() {
        let (panel, _) = panel_with(MockBackend::default());
        assert!(!set_factory(&panel, "0x1234").await);
        assert!(fetch_contract_options(&panel).await.is_err());

        assert!(set_factory(&panel, FACTORY).await);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_dropped() {
        let backend = MockBackend::default();
        // First request answers last
        backend.push_options(Duration::from_millis(200), Ok(options(10, 500, ZERO_ADDRESS)));
        backend.push_options(Duration::from_millis(10), Ok(options(20, 1_000, ACCOUNT)));
        let (panel, _) = panel_with(backend);

        let (first, second) = tokio::join!(
            fetch_contract_options(&panel),
            fetch_contract_options(&panel)
        );
        assert!(!first.unwrap());
        assert!(second.unwrap());

        let form = panel.form().await;
        assert_eq!(form.total_fee, "2");
        assert_eq!(form.protocol_fee, Some(10.0));
        assert_eq!(form.fee_recipient, ACCOUNT);
    }

    #[tokio::test]
    async fn test_out_of_range_fee_keeps_other_options() {
        let backend = MockBackend::default();
        backend.push_options(Duration::ZERO, Ok(options(1_000, 500, ACCOUNT)));
        let (panel, _) = panel_with(backend);
        panel.update_form(|form| form.input_total_fee("0.3")).await;

        let err = fetch_contract_options(&panel).await.unwrap_err();
        assert!(matches!(err, Error::Fee(FeeError::OutOfRange { .. })));

        let form = panel.form().await;
        assert_eq!(form.admin, ACCOUNT);
        assert_eq!(form.fee_recipient, ACCOUNT);
        assert_eq!(form.protocol_fee, Some(5.0));
        assert_eq!(form.total_fee, "0.3");
        assert!(!form.is_pending());
    }

    #[tokio::test]
    async fn test_no_second_call_while_saving() {
        let backend = MockBackend::default();
        backend.push_delayed_submit(Duration::from_millis(200), Ok(TxHash::new("0xfeed")));
        backend.push_submit(Ok(TxHash::new("0xbeef")));
        let (panel, backend) = panel_with(backend);
        panel.connect_wallet(ACCOUNT, 1).await.unwrap();

        let overlapping = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let state = panel.state().await;
            assert!(!panel
                .form()
                .await
                .can_save(FactoryMethod::SetAllFeeToProtocol, &state));
            let fetch = fetch_contract_options(&panel).await;
            let save = save_option(&panel, FactoryMethod::SetAllFeeToProtocol).await;
            (fetch, save)
        };
        let (first, (fetch, second)) = tokio::join!(
            save_option(&panel, FactoryMethod::SetAllFeeToProtocol),
            overlapping
        );

        assert_eq!(first.unwrap(), SaveOutcome::Submitted(TxHash::new("0xfeed")));
        assert!(matches!(fetch, Err(Error::InvalidInput { .. })));
        assert!(matches!(second, Err(Error::InvalidInput { .. })));
        assert_eq!(backend.submitted().len(), 1);

        // Enabled again once the first save settled
        assert!(!panel.form().await.is_pending());
        let outcome = save_option(&panel, FactoryMethod::SetAllFeeToProtocol).await;
        assert_eq!(outcome.unwrap(), SaveOutcome::Submitted(TxHash::new("0xbeef")));
    }

    #[tokio::test]
    async fn test_save_tracks_transaction() {
        let backend = MockBackend::default();
        backend.push_submit(Ok(TxHash::new("0xfeed")));
        let (panel, backend) = panel_with(backend);
        panel.connect_wallet(ACCOUNT, 56).await.unwrap();
        panel.update_form(|form| form.input_total_fee("0.3")).await;

        let outcome = save_option(&panel, FactoryMethod::SetTotalFee).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Submitted(TxHash::new("0xfeed")));

        let submitted = backend.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].method, FactoryMethod::SetTotalFee);
        assert_eq!(submitted[0].value, OptionValue::Uint(3));
        assert_eq!(submitted[0].from, Address::new(ACCOUNT));

        let tracker = panel.inner().transactions.lock().await;
        let tx = tracker.get(56, &TxHash::new("0xfeed")).unwrap();
        assert_eq!(tx.summary.as_deref(), Some("Chain 56. Save factory settings"));
        assert!(!panel.form().await.is_pending());
    }

    #[tokio::test]
    async fn test_save_rejection_is_swallowed() {
        let backend = MockBackend::default();
        backend.push_submit(Err(WalletError::from_code(4001, "User rejected")));
        backend.push_submit(Err(WalletError::from_code(-32603, "execution reverted")));
        let (panel, _) = panel_with(backend);
        panel.connect_wallet(ACCOUNT, 1).await.unwrap();
        panel.update_form(|form| form.set_all_fees_to_admin(true)).await;

        let outcome = save_option(&panel, FactoryMethod::SetAllFeeToProtocol).await;
        assert_eq!(outcome.unwrap(), SaveOutcome::Rejected);

        let err = save_option(&panel, FactoryMethod::SetAllFeeToProtocol)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Wallet(WalletError::Rpc { code: -32603, .. })));
        assert!(panel.inner().transactions.lock().await.pending(1).is_empty());
    }

    #[tokio::test]
    async fn test_save_unchanged_fee_is_refused() {
        let (panel, backend) = panel_with(MockBackend::default());
        panel.connect_wallet(ACCOUNT, 1).await.unwrap();
        panel
            .dispatch(Action::ApplyDomainSnapshot(
                serde_json::from_value::<DomainSnapshot>(serde_json::json!({
                    "factory": FACTORY,
                    "totalFee": 3,
                }))
                .unwrap(),
            ))
            .await;
        panel.update_form(|form| form.input_total_fee("0.3")).await;

        assert!(save_option(&panel, FactoryMethod::SetTotalFee).await.is_err());
        assert!(backend.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_save_requires_wallet() {
        let (panel, _) = panel_with(MockBackend::default());
        let err = save_option(&panel, FactoryMethod::SetAllFeeToProtocol)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Wallet(WalletError::NotConnected)));
    }

    #[tokio::test]
    async fn test_protocol_fee_slider() {
        let (panel, _) = panel_with(MockBackend::default());
        assert_eq!(protocol_fee_slider(&panel).await.len(), 2);

        panel
            .dispatch(Action::ApplyDomainSnapshot(
                serde_json::from_value::<DomainSnapshot>(serde_json::json!({
                    "possibleProtocolPercent": [5, 7, 1_000, 10_000],
                }))
                .unwrap(),
            ))
            .await;
        let marks = protocol_fee_slider(&panel).await;
        let encoded: Vec<u64> = marks.iter().map(|m| m.encoded).collect();
        assert_eq!(encoded, vec![0, 5, 1_000, 10_000]);
    }
}
