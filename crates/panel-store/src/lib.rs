//! panel-store: Application state for the factory panel
//!
//! A single [`ApplicationState`] value mutated only through [`Action`]s.
//! Every rule is a pure function of the current state and the action
//! payload; invalid payload fields are skipped rather than rejected.

pub mod popup;
pub mod reducer;
pub mod sequencer;
pub mod store;
pub mod transactions;

pub use popup::{Popup, PopupContent, PopupExpiry};
pub use reducer::{
    reduce, Action, ApplicationModal, ApplicationState, BrandingSnapshot, DomainSnapshot, Link,
    StorageState, TokenInfo, TokenList,
};
pub use sequencer::{RequestSequencer, Ticket};
pub use store::Store;
pub use transactions::{TransactionDetails, TransactionTracker};
