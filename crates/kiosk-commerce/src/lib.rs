//! Catalog normalization and cart pricing for the kiosk storefront.
//!
//! This crate is the pure domain core behind the Telegram mini-app
//! storefront. It knows nothing about HTTP or the WebApp bridge:
//!
//! - **Catalog**: lenient upstream model, normalization into flat
//!   display products with derived variant options
//! - **Cart**: selection keys, unit pricing, merge-by-configuration
//!   carts with functional updates
//! - **Checkout**: the order hand-off payload
//!
//! # Example
//!
//! ```rust
//! use kiosk_commerce::prelude::*;
//!
//! let raw = RawCatalog::parse(br#"{
//!     "categories": [{"id": 1, "name": "Herbs"}],
//!     "products": [{
//!         "id": "p1", "title": "Basil", "price": 5, "categoryId": 1,
//!         "variants": [
//!             {"id": "v1", "label": "10g", "price": 5},
//!             {"id": "v2", "label": "20g", "price": 9}
//!         ]
//!     }]
//! }"#);
//!
//! let products = Normalizer::new().normalize(&raw);
//! let basil = &products[0];
//! assert_eq!(basil.base_price, Money::from_decimal(5.0, Currency::EUR));
//!
//! let mut selection = default_selection(basil);
//! selection.insert("variant".into(), SelectedValue::Choice("20g".into()));
//!
//! let cart = Cart::new().add_or_merge(basil, selection);
//! assert_eq!(cart.total().unwrap(), Money::from_decimal(9.0, Currency::EUR));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        resolve_image_url, Choice, ChoicePrice, DisplayProduct, Normalizer, OptionKind,
        ProductOption, RawCatalog, RawCategory, RawProduct, RawVariant,
    };

    // Cart
    pub use crate::cart::{
        default_selection, unit_price, Cart, CartLine, LineKey, SelectedValue, Selection,
    };

    // Checkout
    pub use crate::checkout::{OrderDraft, OrderItem};
}
