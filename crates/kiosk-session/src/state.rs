//! Storefront session state.

use kiosk_commerce::cart::{Cart, LineKey, Selection};
use kiosk_commerce::catalog::{DisplayProduct, Normalizer, RawCatalog};
use kiosk_commerce::checkout::OrderDraft;
use kiosk_commerce::error::CommerceError;
use kiosk_commerce::ids::ProductId;
use kiosk_commerce::money::Money;

use crate::bridge::HostBridge;

/// Which slice of the catalog is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose resolved category matches the name.
    Named(String),
}

/// One user session of the storefront.
///
/// Holds the currently displayed catalog, the category filter, and the
/// cart. Catalog refreshes follow a last-good policy: a failed fetch
/// keeps whatever was displayed before. Cart mutations replace the cart
/// with the result of a functional update of the previous value.
#[derive(Debug, Clone, Default)]
pub struct Storefront {
    normalizer: Normalizer,
    products: Vec<DisplayProduct>,
    filter: CategoryFilter,
    cart: Cart,
}

impl Storefront {
    /// Create a session with the given normalizer configuration.
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            ..Self::default()
        }
    }

    /// Announce the session to the host: ready, then expand.
    pub fn start(&self, bridge: &impl HostBridge) {
        bridge.ready();
        bridge.expand();
    }

    /// Apply the outcome of a catalog fetch.
    ///
    /// Success renormalizes and replaces the displayed catalog; failure
    /// keeps the previous one and logs. The cart is never touched.
    pub fn apply_catalog<E: std::fmt::Display>(&mut self, fetched: Result<RawCatalog, E>) {
        match fetched {
            Ok(raw) => {
                self.products = self.normalizer.normalize(&raw);
                tracing::debug!(products = self.products.len(), "catalog refreshed");
            }
            Err(error) => {
                tracing::warn!(%error, "catalog refresh failed, keeping last good catalog");
            }
        }
    }

    /// Every displayed product, unfiltered.
    pub fn products(&self) -> &[DisplayProduct] {
        &self.products
    }

    /// Distinct category names in first-appearance order, for the
    /// filter row.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for p in &self.products {
            if !seen.contains(&p.category.as_str()) {
                seen.push(p.category.as_str());
            }
        }
        seen
    }

    /// Set the active category filter.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The products matching the active filter, in catalog order.
    pub fn visible_products(&self) -> Vec<&DisplayProduct> {
        self.products
            .iter()
            .filter(|p| match &self.filter {
                CategoryFilter::All => true,
                CategoryFilter::Named(name) => &p.category == name,
            })
            .collect()
    }

    /// Look up a displayed product by id.
    pub fn product(&self, id: &ProductId) -> Option<&DisplayProduct> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Add one unit of a product at the given configuration.
    ///
    /// Returns false when the product is not in the displayed catalog.
    pub fn add_to_cart(&mut self, id: &ProductId, selection: Selection) -> bool {
        let Some(product) = self.product(id) else {
            return false;
        };
        self.cart = self.cart.add_or_merge(product, selection);
        true
    }

    /// Reduce a cart line by one unit; a missing key is a no-op.
    pub fn decrement_line(&mut self, key: &LineKey) {
        self.cart = self.cart.decrement(key);
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current cart total.
    pub fn cart_total(&self) -> Result<Money, CommerceError> {
        self.cart.total()
    }

    /// Hand the cart off for ordering through the host bridge.
    ///
    /// An empty cart or an unserializable draft surfaces as a host
    /// alert, not an error return. Returns true when the payload was
    /// sent.
    pub fn checkout(&self, bridge: &impl HostBridge) -> bool {
        let draft = match OrderDraft::from_cart(&self.cart) {
            Ok(draft) => draft,
            Err(CommerceError::EmptyCart) => {
                bridge.show_alert("Your cart is empty.");
                return false;
            }
            Err(error) => {
                tracing::warn!(%error, "checkout rejected");
                bridge.show_alert("Something went wrong, please try again.");
                return false;
            }
        };
        match draft.to_json() {
            Ok(payload) => {
                bridge.send_data(&payload);
                true
            }
            Err(error) => {
                tracing::error!(%error, "failed to serialize order payload");
                bridge.show_alert("Something went wrong, please try again.");
                false
            }
        }
    }
}
