//! Order hand-off payload.
//!
//! The shape submitted to the order-creation endpoint or passed through
//! the messaging bridge: camelCase keys, decimal amounts.

use crate::cart::{Cart, Selection};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// The checkout payload derived from a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Cart total as a decimal amount.
    pub total_eur: f64,
    /// One entry per cart line, in cart order.
    pub items: Vec<OrderItem>,
}

/// One ordered line: a snapshot of the cart line at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product ID.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit price as a decimal amount.
    pub unit_price: f64,
    /// The option configuration (`string | string[]` values).
    pub selected_options: Selection,
}

impl OrderDraft {
    /// Build the payload from a cart.
    ///
    /// An empty cart is an error, and so is a cart whose total cannot
    /// be computed; a draft with zero items or an inconsistent total is
    /// never produced.
    pub fn from_cart(cart: &Cart) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let total = cart.total()?;

        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                id: line.product_id.as_str().to_string(),
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price.to_decimal(),
                selected_options: line.selected_options.clone(),
            })
            .collect();

        Ok(Self {
            total_eur: total.to_decimal(),
            items,
        })
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(self)?)
    }
}
