//! Catalog normalization.
//!
//! Flattens the heterogeneous upstream document into display products:
//! inactive products are dropped, variant-bearing products collapse
//! into one entry priced from the cheapest active variant with a
//! derived "variant" select option, and everything else falls back to
//! standalone pricing. Never fails; malformed fragments degrade by
//! omission.

use std::collections::HashMap;

use crate::catalog::display::{
    Choice, ChoicePrice, DisplayProduct, OptionKind, ProductOption,
};
use crate::catalog::media::resolve_image_url;
use crate::catalog::raw::{RawCatalog, RawOption, RawProduct};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Name of the option derived from a product's variant list.
pub const VARIANT_OPTION: &str = "variant";

/// Fallback category for products whose category cannot be resolved.
const OTHER_CATEGORY: &str = "Other";

/// Pure catalog-to-display transformation.
///
/// Optionally carries the asset origin used to resolve relative image
/// references; without one, photos are copied verbatim.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    asset_origin: Option<String>,
}

impl Normalizer {
    /// Create a normalizer that copies image references verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve image references against the given origin.
    pub fn with_asset_origin(mut self, origin: impl Into<String>) -> Self {
        self.asset_origin = Some(origin.into());
        self
    }

    /// Normalize a raw catalog into display products, preserving input
    /// order minus inactive entries.
    pub fn normalize(&self, raw: &RawCatalog) -> Vec<DisplayProduct> {
        let category_names: HashMap<&str, &str> = raw
            .categories
            .iter()
            .filter_map(|c| c.id.as_deref().map(|id| (id, c.name.as_str())))
            .collect();

        raw.products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(index, p)| self.normalize_product(index, p, &category_names))
            .collect()
    }

    fn normalize_product(
        &self,
        index: usize,
        product: &RawProduct,
        category_names: &HashMap<&str, &str>,
    ) -> DisplayProduct {
        let currency = product
            .currency
            .as_deref()
            .and_then(Currency::from_code)
            .unwrap_or_default();

        let (base_price, options) = match derive_variant_option(product, currency) {
            Some(derived) => derived,
            None => (
                Money::from_decimal(
                    product.sale_price.or(product.price).unwrap_or(0.0),
                    currency,
                ),
                convert_options(&product.options, currency),
            ),
        };

        let photo = match (&self.asset_origin, &product.image) {
            (Some(origin), Some(image)) => resolve_image_url(origin, image),
            (None, Some(image)) => image.clone(),
            (_, None) => String::new(),
        };

        DisplayProduct {
            id: ProductId::new(
                product
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("product-{index}")),
            ),
            name: product.title.clone(),
            photo,
            category: resolve_category(product, category_names),
            base_price,
            weight: product.weight.clone().unwrap_or_default(),
            description: product
                .short_desc
                .clone()
                .or_else(|| product.long_desc.clone())
                .unwrap_or_default(),
            options,
        }
    }
}

/// Resolve the category name: explicit string wins, then the id lookup,
/// then the literal fallback.
fn resolve_category(product: &RawProduct, names: &HashMap<&str, &str>) -> String {
    if let Some(name) = product.category.as_deref().filter(|c| !c.is_empty()) {
        return name.to_string();
    }
    product
        .category_id
        .as_deref()
        .and_then(|id| names.get(id))
        .map_or_else(|| OTHER_CATEGORY.to_string(), |n| (*n).to_string())
}

/// Collapse a product's active variants into a base price and a single
/// required select option with delta-priced choices.
///
/// Returns `None` when the product has no usable variants, in which
/// case the caller falls back to standalone pricing. A variant only
/// participates when it yields both a label and a parsable price, so a
/// malformed variant can neither win the minimum nor set a base price
/// nobody can select.
fn derive_variant_option(
    product: &RawProduct,
    currency: Currency,
) -> Option<(Money, Vec<ProductOption>)> {
    let purchasable: Vec<(String, Money)> = product
        .variants
        .iter()
        .filter(|v| v.is_active())
        .filter_map(|v| {
            let label = v.label.clone().or_else(|| v.id.clone())?;
            let price = Money::from_decimal(v.effective_price()?, currency);
            Some((label, price))
        })
        .collect();

    let min_price = purchasable
        .iter()
        .map(|(_, price)| *price)
        .min_by_key(|m| m.amount_cents)?;

    let choices: Vec<Choice> = purchasable
        .into_iter()
        .filter_map(|(label, price)| {
            let delta = price.try_subtract(&min_price)?;
            Some(Choice {
                label,
                price: ChoicePrice::Delta(delta),
            })
        })
        .collect();

    Some((
        min_price,
        vec![ProductOption {
            name: VARIANT_OPTION.to_string(),
            label: "Variant".to_string(),
            kind: OptionKind::Select,
            required: true,
            choices,
        }],
    ))
}

/// Convert upstream option declarations, dropping malformed ones.
///
/// An option is malformed when it has no name, an unknown kind, no
/// usable choices, mixes delta and absolute choice shapes, or is a
/// toggle in absolute mode.
fn convert_options(raw: &[RawOption], currency: Currency) -> Vec<ProductOption> {
    raw.iter()
        .filter_map(|opt| convert_option(opt, currency))
        .collect()
}

fn convert_option(raw: &RawOption, currency: Currency) -> Option<ProductOption> {
    let name = raw.name.clone().filter(|n| !n.is_empty())?;
    let kind = match raw.kind.as_deref() {
        Some("select") => OptionKind::Select,
        Some("toggle") => OptionKind::Toggle,
        _ => return None,
    };

    let mut mode: Option<bool> = None; // true = delta, false = absolute
    let mut choices = Vec::with_capacity(raw.choices.len());
    for choice in &raw.choices {
        let label = choice.label.clone().filter(|l| !l.is_empty())?;
        let price = match (choice.price_delta, choice.price) {
            (Some(delta), None) => ChoicePrice::Delta(Money::from_decimal(delta, currency)),
            (None, Some(abs)) => ChoicePrice::Absolute(Money::from_decimal(abs, currency)),
            _ => return None,
        };
        let is_delta = matches!(price, ChoicePrice::Delta(_));
        if *mode.get_or_insert(is_delta) != is_delta {
            return None;
        }
        choices.push(Choice { label, price });
    }
    if choices.is_empty() {
        return None;
    }
    if kind == OptionKind::Toggle && mode == Some(false) {
        return None;
    }

    Some(ProductOption {
        name: name.clone(),
        label: raw.label.clone().unwrap_or(name),
        kind,
        required: raw.required.unwrap_or(false),
        choices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herbs_catalog() -> RawCatalog {
        RawCatalog::parse(
            br#"{
                "categories": [{"id": 1, "name": "Herbs"}],
                "products": [{
                    "id": "p1", "title": "Basil", "price": 5, "categoryId": 1,
                    "active": true,
                    "variants": [
                        {"id": "v1", "label": "10g", "price": 5, "active": true},
                        {"id": "v2", "label": "20g", "price": 9, "active": true}
                    ]
                }]
            }"#,
        )
    }

    #[test]
    fn test_variant_product_collapses_to_min_price() {
        let products = Normalizer::new().normalize(&herbs_catalog());
        assert_eq!(products.len(), 1);

        let basil = &products[0];
        assert_eq!(basil.id, ProductId::new("p1"));
        assert_eq!(basil.category, "Herbs");
        assert_eq!(basil.base_price, Money::new(500, Currency::EUR));

        let option = basil.option(VARIANT_OPTION).unwrap();
        assert_eq!(option.kind, OptionKind::Select);
        assert!(option.required);
        assert_eq!(option.choices.len(), 2);
        assert_eq!(
            option.choice("10g").unwrap().price,
            ChoicePrice::Delta(Money::zero(Currency::EUR))
        );
        assert_eq!(
            option.choice("20g").unwrap().price,
            ChoicePrice::Delta(Money::new(400, Currency::EUR))
        );

        let zero_deltas = option
            .choices
            .iter()
            .filter(|c| c.price == ChoicePrice::Delta(Money::zero(Currency::EUR)))
            .count();
        assert_eq!(zero_deltas, 1);
    }

    #[test]
    fn test_inactive_product_excluded() {
        let raw = RawCatalog::parse(
            br#"{"products":[
                {"id":"a","title":"A","price":1,"active":false},
                {"id":"b","title":"B","price":2}
            ]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new("b"));
    }

    #[test]
    fn test_inactive_variants_filtered() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Basil","price":5,
                "variants":[
                    {"id":"v1","label":"10g","price":5},
                    {"id":"v2","label":"20g","price":9,"active":false}
                ]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        let option = products[0].option(VARIANT_OPTION).unwrap();
        assert_eq!(option.choices.len(), 1);
        assert_eq!(option.choices[0].label, "10g");
    }

    #[test]
    fn test_all_variants_inactive_falls_back_to_standalone() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Basil","price":5,"salePrice":4.5,
                "variants":[{"id":"v1","label":"10g","price":5,"active":false}]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].base_price, Money::new(450, Currency::EUR));
        assert!(products[0].options.is_empty());
    }

    #[test]
    fn test_invalid_variant_price_cannot_win_minimum() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Basil",
                "variants":[
                    {"id":"v1","label":"broken","price":"n/a"},
                    {"id":"v2","label":"20g","price":9}
                ]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].base_price, Money::new(900, Currency::EUR));
        // the broken variant produces no choice either
        let option = products[0].option(VARIANT_OPTION).unwrap();
        assert_eq!(option.choices.len(), 1);
    }

    #[test]
    fn test_labelless_variant_cannot_set_base_price() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Basil",
                "variants":[
                    {"price":5},
                    {"id":"v2","label":"20g","price":9}
                ]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].base_price, Money::new(900, Currency::EUR));

        let option = products[0].option(VARIANT_OPTION).unwrap();
        assert_eq!(option.choices.len(), 1);
        assert_eq!(
            option.choice("20g").unwrap().price,
            ChoicePrice::Delta(Money::zero(Currency::EUR))
        );
    }

    #[test]
    fn test_all_variants_labelless_falls_back_to_standalone() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Basil","price":5,
                "variants":[{"price":4},{"price":9}]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].base_price, Money::new(500, Currency::EUR));
        assert!(products[0].options.is_empty());
    }

    #[test]
    fn test_zero_valid_variants_falls_back_to_standalone() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Basil","price":5,
                "variants":[{"id":"v1","label":"broken","price":"n/a"}]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].base_price, Money::new(500, Currency::EUR));
        assert!(products[0].options.is_empty());
    }

    #[test]
    fn test_category_resolution() {
        let raw = RawCatalog::parse(
            br#"{
                "categories":[{"id":1,"name":"Herbs"}],
                "products":[
                    {"id":"a","title":"A","category":"Teas"},
                    {"id":"b","title":"B","categoryId":1},
                    {"id":"c","title":"C","categoryId":99},
                    {"id":"d","title":"D"}
                ]
            }"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].category, "Teas");
        assert_eq!(products[1].category, "Herbs");
        assert_eq!(products[2].category, "Other");
        assert_eq!(products[3].category, "Other");
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let raw = RawCatalog::parse(br#"{"products":[{"id":"p1","title":"Basil"}]}"#);
        let products = Normalizer::new().normalize(&raw);
        assert!(products[0].base_price.is_zero());
    }

    #[test]
    fn test_descriptions_and_defaults() {
        let raw = RawCatalog::parse(
            br#"{"products":[
                {"id":"a","title":"A","shortDesc":"short","longDesc":"long"},
                {"id":"b","title":"B","longDesc":"long"},
                {"id":"c","title":"C","weight":"100g"}
            ]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].description, "short");
        assert_eq!(products[1].description, "long");
        assert_eq!(products[2].description, "");
        assert_eq!(products[2].weight, "100g");
        assert_eq!(products[0].photo, "");
    }

    #[test]
    fn test_photo_resolved_against_asset_origin() {
        let raw = RawCatalog::parse(
            br#"{"products":[{"id":"p1","title":"Basil","image":"basil.jpg"}]}"#,
        );
        let products = Normalizer::new()
            .with_asset_origin("https://shop.example")
            .normalize(&raw);
        assert_eq!(products[0].photo, "https://shop.example/uploads/basil.jpg");
    }

    #[test]
    fn test_verbatim_options_delta_mode() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Tea","price":3,
                "options":[{
                    "name":"extras","label":"Extras","kind":"toggle",
                    "choices":[
                        {"label":"honey","priceDelta":0.5},
                        {"label":"lemon","priceDelta":0.25}
                    ]
                }]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        let extras = products[0].option("extras").unwrap();
        assert_eq!(extras.kind, OptionKind::Toggle);
        assert!(!extras.required);
        assert_eq!(
            extras.choice("honey").unwrap().price,
            ChoicePrice::Delta(Money::new(50, Currency::EUR))
        );
    }

    #[test]
    fn test_mixed_mode_option_dropped() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Tea","price":3,
                "options":[{
                    "name":"size","kind":"select",
                    "choices":[
                        {"label":"small","price":3},
                        {"label":"large","priceDelta":1}
                    ]
                }]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert!(products[0].options.is_empty());
    }

    #[test]
    fn test_absolute_toggle_dropped() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Tea","price":3,
                "options":[{
                    "name":"extras","kind":"toggle",
                    "choices":[{"label":"honey","price":3.5}]
                }]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert!(products[0].options.is_empty());
    }

    #[test]
    fn test_absolute_select_kept() {
        let raw = RawCatalog::parse(
            br#"{"products":[{
                "id":"p1","title":"Tea","price":3,
                "options":[{
                    "name":"size","kind":"select","required":true,
                    "choices":[
                        {"label":"small","price":3},
                        {"label":"large","price":4.5}
                    ]
                }]
            }]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        let size = products[0].option("size").unwrap();
        assert_eq!(
            size.choice("large").unwrap().price,
            ChoicePrice::Absolute(Money::new(450, Currency::EUR))
        );
    }

    #[test]
    fn test_output_order_matches_input() {
        let raw = RawCatalog::parse(
            br#"{"products":[
                {"id":"a","title":"A"},
                {"id":"b","title":"B","active":false},
                {"id":"c","title":"C"}
            ]}"#,
        );
        let ids: Vec<String> = Normalizer::new()
            .normalize(&raw)
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = herbs_catalog();
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize(&raw), normalizer.normalize(&raw));
    }

    #[test]
    fn test_currency_from_product() {
        let raw = RawCatalog::parse(
            br#"{"products":[{"id":"p1","title":"Basil","price":5,"currency":"USD"}]}"#,
        );
        let products = Normalizer::new().normalize(&raw);
        assert_eq!(products[0].base_price.currency, Currency::USD);
    }
}
