//! Shopping cart module.
//!
//! Contains selections and line keys, unit pricing, and the cart with
//! merge-by-configuration semantics.

mod cart;
mod pricing;
mod selection;

pub use cart::{Cart, CartLine};
pub use pricing::unit_price;
pub use selection::{default_selection, LineKey, SelectedValue, Selection};
