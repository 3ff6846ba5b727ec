//! Store: owns the application state and routes actions through the reducer

use panel_core::{BlockHeight, ChainId, PanelConfig, DEFAULT_POPUP_REMOVE_AFTER_MS};

use crate::popup::{Popup, PopupExpiry};
use crate::reducer::{reduce, Action, ApplicationModal, ApplicationState};

#[derive(Debug, Clone)]
pub struct Store {
    state: ApplicationState,
    popup_remove_after_ms: u64,
}

impl Store {
    /// Create an empty store with the default popup lifetime
    pub fn new() -> Self {
        Self {
            state: ApplicationState::default(),
            popup_remove_after_ms: DEFAULT_POPUP_REMOVE_AFTER_MS,
        }
    }

    /// Create with a specific config
    pub fn with_config(config: &PanelConfig) -> Self {
        Self {
            state: ApplicationState::default(),
            popup_remove_after_ms: config.popup_remove_after_ms,
        }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "Dispatch");
        let action = match action {
            Action::AddPopup {
                key,
                content,
                expiry: PopupExpiry::Default,
            } => Action::AddPopup {
                key,
                content,
                expiry: PopupExpiry::After(self.popup_remove_after_ms),
            },
            other => other,
        };
        reduce(&mut self.state, action);
    }

    /// Popups that are still visible
    pub fn active_popups(&self) -> Vec<&Popup> {
        self.state.popup_list.iter().filter(|p| p.show).collect()
    }

    pub fn block_number(&self, chain_id: ChainId) -> Option<BlockHeight> {
        self.state.block_number.get(&chain_id).copied()
    }

    pub fn is_modal_open(&self, modal: ApplicationModal) -> bool {
        self.state.open_modal == Some(modal)
    }

    /// Open `modal`, or close it if it is already open
    pub fn toggle_modal(&mut self, modal: ApplicationModal) {
        let next = if self.is_modal_open(modal) {
            None
        } else {
            Some(modal)
        };
        self.dispatch(Action::SetOpenModal(next));
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
