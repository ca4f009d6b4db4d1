//! Checkout module.
//!
//! The order hand-off payload built from a cart.

mod payload;

pub use payload::{OrderDraft, OrderItem};
