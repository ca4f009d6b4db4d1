//! Option selections and the cart line key.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{DisplayProduct, OptionKind};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// The value selected for one option: a single choice label for
/// selects, a label list for toggles.
///
/// Serializes untagged, so the wire shape is `string | string[]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SelectedValue {
    Choice(String),
    Toggles(Vec<String>),
}

/// A full selection for a product, keyed by option name.
///
/// A `BTreeMap` keeps the keys canonically ordered, which makes key
/// serialization independent of the order options were chosen in.
pub type Selection = BTreeMap<String, SelectedValue>;

/// Build the initial selection for a product's option sheet: every
/// required select defaults to its first choice's label, toggles start
/// empty. Guarantees pricing always sees a complete selection for
/// required options.
pub fn default_selection(product: &DisplayProduct) -> Selection {
    let mut selection = Selection::new();
    for option in &product.options {
        match option.kind {
            OptionKind::Select => {
                if option.required {
                    if let Some(first) = option.choices.first() {
                        selection.insert(
                            option.name.clone(),
                            SelectedValue::Choice(first.label.clone()),
                        );
                    }
                }
            }
            OptionKind::Toggle => {
                selection.insert(option.name.clone(), SelectedValue::Toggles(Vec::new()));
            }
        }
    }
    selection
}

/// Deterministic composite key identifying a product at a specific
/// option configuration. Two semantically identical selections always
/// produce the same key; cart lines sharing a key merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey(String);

impl LineKey {
    /// Build the key from a product id and a selection. Toggle labels
    /// are sorted so the choice order does not matter.
    pub fn new(product_id: &ProductId, selection: &Selection) -> Self {
        let mut parts = Vec::with_capacity(selection.len());
        for (name, value) in selection {
            match value {
                SelectedValue::Choice(label) => parts.push(format!("{name}={label}")),
                SelectedValue::Toggles(labels) => {
                    let mut sorted = labels.clone();
                    sorted.sort();
                    parts.push(format!("{name}={}", sorted.join("+")));
                }
            }
        }
        Self(format!("{}::{}", product_id.as_str(), parts.join("|")))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
