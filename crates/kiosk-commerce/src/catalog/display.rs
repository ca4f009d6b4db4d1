//! Normalized, UI-facing catalog types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A flat, purchasable catalog entry produced by normalization.
///
/// `base_price` is the minimum price among active variants when the
/// product has variants, otherwise the product's own sale/base price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayProduct {
    /// Unique product identifier within one normalization pass.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image URL, empty when the product has none.
    pub photo: String,
    /// Resolved category name ("Other" when unresolvable).
    pub category: String,
    /// Base price; option deltas apply on top of this.
    pub base_price: Money,
    /// Weight label, empty when absent.
    pub weight: String,
    /// Short description, falling back to the long one.
    pub description: String,
    /// Price-affecting options.
    pub options: Vec<ProductOption>,
}

impl DisplayProduct {
    /// Look up an option by its name.
    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// How an option is presented and selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Exactly one choice (a dropdown).
    Select,
    /// Any subset of choices (checkboxes).
    Toggle,
}

/// A user-facing choice group attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    /// Stable key used in selections and cart keys.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Selection behavior.
    pub kind: OptionKind,
    /// Whether a selection must always be present.
    pub required: bool,
    /// The choices; all carry the same pricing mode.
    pub choices: Vec<Choice>,
}

impl ProductOption {
    /// Look up a choice by its label.
    pub fn choice(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }
}

/// How a choice affects the price. One mode per option, never mixed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ChoicePrice {
    /// Offset from the product's base price (may be zero or negative).
    Delta(Money),
    /// The choice's own full price, replacing the running price.
    Absolute(Money),
}

/// One selectable entry inside an option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Display label; also the value stored in selections.
    pub label: String,
    /// Pricing effect.
    pub price: ChoicePrice,
}
