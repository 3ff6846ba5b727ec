//! Panel commands
//!
//! Each command takes the shared [`crate::Panel`] handle, performs at most
//! one wallet call, and never holds a lock across it.

pub mod application;
pub mod factory;

pub use application::{
    finalize_transaction, load_domain_data, refresh_block_number, remove_popup,
    set_app_management, toggle_modal,
};
pub use factory::{
    fetch_contract_options, protocol_fee_slider, save_option, set_factory, FactoryForm,
    PendingCall, SaveOutcome,
};
