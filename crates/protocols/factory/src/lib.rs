//! DEX Factory Fee Settings
//!
//! The factory contract stores two fees as fixed-point integers: the total
//! swap fee (percent × 10) and the protocol's share of it (percent × 100).
//! This crate converts between those encodings and the percentages an admin
//! types in, validates raw input, and decides when a save is meaningful.

pub mod calculator;
pub mod constants;
pub mod marks;
pub mod sanitize;
pub mod state;

// Re-exports
pub use calculator::{is_equal_current_fee, liquidity_provider_share, to_contract, to_interface};
pub use constants::{PROTOCOL_FEE_RATIO, TOTAL_FEE_RATIO};
pub use marks::{protocol_fee_marks, snap_to_mark};
pub use sanitize::{accept_input, parse_percent, sanitize_input, InputBounds, TOTAL_FEE_BOUNDS};
pub use state::{FeeKind, FeeValue, SliderMark};
