//! Storefront session layer.
//!
//! Sits between the pure domain core and the presentation surface:
//! owns the currently displayed catalog (with a last-good policy on
//! refresh failure), the category filter, the cart, and the checkout
//! hand-off through the injected host bridge.

mod bridge;
mod state;

pub use bridge::{HostBridge, NoopBridge};
pub use state::{CategoryFilter, Storefront};
