//! Unit price computation.

use crate::cart::selection::{SelectedValue, Selection};
use crate::catalog::{ChoicePrice, DisplayProduct, OptionKind};
use crate::money::Money;

/// Compute the effective unit price of a product under a selection.
///
/// Starts from the base price; delta choices add to it, an absolute
/// select choice replaces it. Options without a selection, selections
/// whose label matches no choice, and kind/shape mismatches all
/// contribute nothing. Deterministic and never fails.
pub fn unit_price(product: &DisplayProduct, selection: &Selection) -> Money {
    let mut price = product.base_price;

    for option in &product.options {
        let Some(selected) = selection.get(&option.name) else {
            continue;
        };
        match (option.kind, selected) {
            (OptionKind::Select, SelectedValue::Choice(label)) => {
                if let Some(choice) = option.choice(label) {
                    price = apply(price, choice.price);
                }
            }
            (OptionKind::Toggle, SelectedValue::Toggles(labels)) => {
                for choice in &option.choices {
                    if labels.iter().any(|l| l == &choice.label) {
                        price = apply(price, choice.price);
                    }
                }
            }
            _ => {}
        }
    }

    price
}

fn apply(running: Money, choice: ChoicePrice) -> Money {
    match choice {
        ChoicePrice::Delta(delta) => running.try_add(&delta).unwrap_or(running),
        ChoicePrice::Absolute(price) => price,
    }
}
