//! Cart and line item types.
//!
//! Every operation takes the previous cart by reference and returns a
//! new cart; the previous value is never mutated. This keeps rapid
//! add/remove sequences race-free when each mutation is applied as a
//! functional update of the prior state.

use crate::cart::pricing::unit_price;
use crate::cart::selection::{LineKey, Selection};
use crate::catalog::DisplayProduct;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One entry in the cart: a product at a specific option configuration.
///
/// The unit price is fixed at first-add time and is not recomputed when
/// later adds merge into the line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Deterministic product+configuration key; lines sharing it merge.
    pub key: LineKey,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Price per unit at this configuration.
    pub unit_price: Money,
    /// The configuration this line was added with.
    pub selected_options: Selection,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity as i64)
            .ok_or(CommerceError::Overflow)
    }
}

/// An ordered cart. Insertion order is preserved; merges update the
/// existing line in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product at the given configuration.
    ///
    /// If a line with the same key exists its quantity is incremented
    /// and its price left untouched, otherwise a new line is appended
    /// with quantity 1.
    pub fn add_or_merge(&self, product: &DisplayProduct, selection: Selection) -> Cart {
        let key = LineKey::new(&product.id, &selection);
        let mut next = self.clone();

        if let Some(line) = next.lines.iter_mut().find(|l| l.key == key) {
            line.quantity = line.quantity.saturating_add(1);
            return next;
        }

        next.lines.push(CartLine {
            key,
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: unit_price(product, &selection),
            selected_options: selection,
            quantity: 1,
        });
        next
    }

    /// Reduce the matching line's quantity by 1, removing the line when
    /// it reaches zero. A missing key is a no-op.
    pub fn decrement(&self, key: &LineKey) -> Cart {
        let mut next = self.clone();
        if let Some(pos) = next.lines.iter().position(|l| &l.key == key) {
            if next.lines[pos].quantity > 1 {
                next.lines[pos].quantity -= 1;
            } else {
                next.lines.remove(pos);
            }
        }
        next
    }

    /// Cart total: the sum of unit price times quantity over all lines.
    ///
    /// A line whose currency disagrees with the rest of the cart, or an
    /// overflowing sum, is an error rather than a silently wrong total.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let currency = self
            .lines
            .first()
            .map_or(Currency::default(), |l| l.unit_price.currency);
        self.lines
            .iter()
            .try_fold(Money::zero(currency), |acc, line| {
                if line.unit_price.currency != currency {
                    return Err(CommerceError::CurrencyMismatch {
                        expected: currency.code().to_string(),
                        got: line.unit_price.currency.code().to_string(),
                    });
                }
                acc.try_add(&line.subtotal()?).ok_or(CommerceError::Overflow)
            })
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by its key.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    /// Total unit count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct configurations.
    pub fn unique_line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::selection::SelectedValue;
    use crate::catalog::{Choice, ChoicePrice, OptionKind, ProductOption};

    fn eur(cents: i64) -> Money {
        Money::new(cents, Currency::EUR)
    }

    fn basil() -> DisplayProduct {
        DisplayProduct {
            id: ProductId::new("p1"),
            name: "Basil".to_string(),
            photo: String::new(),
            category: "Herbs".to_string(),
            base_price: eur(500),
            weight: String::new(),
            description: String::new(),
            options: vec![ProductOption {
                name: "variant".to_string(),
                label: "Variant".to_string(),
                kind: OptionKind::Select,
                required: true,
                choices: vec![
                    Choice {
                        label: "10g".to_string(),
                        price: ChoicePrice::Delta(eur(0)),
                    },
                    Choice {
                        label: "20g".to_string(),
                        price: ChoicePrice::Delta(eur(400)),
                    },
                ],
            }],
        }
    }

    fn pick(label: &str) -> Selection {
        let mut s = Selection::new();
        s.insert(
            "variant".to_string(),
            SelectedValue::Choice(label.to_string()),
        );
        s
    }

    #[test]
    fn test_add_creates_line_with_quantity_one() {
        let cart = Cart::new().add_or_merge(&basil(), pick("20g"));
        assert_eq!(cart.unique_line_count(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, eur(900));
    }

    #[test]
    fn test_same_configuration_merges() {
        let basil = basil();
        let cart = Cart::new()
            .add_or_merge(&basil, pick("20g"))
            .add_or_merge(&basil, pick("20g"));
        assert_eq!(cart.unique_line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_different_configuration_appends() {
        let basil = basil();
        let cart = Cart::new()
            .add_or_merge(&basil, pick("20g"))
            .add_or_merge(&basil, pick("20g"))
            .add_or_merge(&basil, pick("10g"));

        assert_eq!(cart.unique_line_count(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].unit_price, eur(900));
        assert_eq!(cart.lines()[1].quantity, 1);
        assert_eq!(cart.lines()[1].unit_price, eur(500));
        assert_eq!(cart.total().unwrap(), eur(2300));
    }

    #[test]
    fn test_previous_cart_unchanged() {
        let basil = basil();
        let one = Cart::new().add_or_merge(&basil, pick("20g"));
        let two = one.add_or_merge(&basil, pick("20g"));

        assert_eq!(one.lines()[0].quantity, 1);
        assert_eq!(two.lines()[0].quantity, 2);
    }

    #[test]
    fn test_merged_line_keeps_first_add_price() {
        let basil = basil();
        let cart = Cart::new().add_or_merge(&basil, pick("20g"));

        let mut repriced = basil.clone();
        repriced.base_price = eur(600);
        let cart = cart.add_or_merge(&repriced, pick("20g"));

        assert_eq!(cart.unique_line_count(), 1);
        assert_eq!(cart.lines()[0].unit_price, eur(900));
    }

    #[test]
    fn test_decrement_removes_at_zero() {
        let basil = basil();
        let cart = Cart::new().add_or_merge(&basil, pick("20g"));
        let key = cart.lines()[0].key.clone();

        let cart = cart.add_or_merge(&basil, pick("20g"));
        let cart = cart.decrement(&key);
        assert_eq!(cart.lines()[0].quantity, 1);

        let cart = cart.decrement(&key);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_missing_key_is_noop() {
        let cart = Cart::new().add_or_merge(&basil(), pick("20g"));
        let ghost = LineKey::new(&ProductId::new("ghost"), &Selection::new());
        let after = cart.decrement(&ghost);
        assert_eq!(after, cart);

        let empty = Cart::new().decrement(&ghost);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        assert!(Cart::new().total().unwrap().is_zero());
    }

    #[test]
    fn test_mixed_currency_total_is_an_error() {
        let basil = basil();
        let mut imported = basil.clone();
        imported.id = ProductId::new("p2");
        imported.base_price = Money::new(900, Currency::USD);
        imported.options.clear();

        let cart = Cart::new()
            .add_or_merge(&basil, pick("10g"))
            .add_or_merge(&imported, Selection::new());

        assert!(matches!(
            cart.total(),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_item_count() {
        let basil = basil();
        let cart = Cart::new()
            .add_or_merge(&basil, pick("20g"))
            .add_or_merge(&basil, pick("20g"))
            .add_or_merge(&basil, pick("10g"));
        assert_eq!(cart.item_count(), 3);
    }
}
