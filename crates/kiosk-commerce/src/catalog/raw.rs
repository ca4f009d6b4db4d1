//! Lenient model of the upstream catalog document.
//!
//! The upstream PHP endpoint is loosely typed: ids arrive as numbers or
//! strings, prices as numbers or numeric strings, and `variants` or
//! `options` may be missing, null, or not an array at all. This module
//! is the single parse-with-defaults boundary: everything downstream
//! works on these well-typed structs and needs no defensive guards.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The upstream catalog document: categories plus products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCatalog {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub categories: Vec<RawCategory>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub products: Vec<RawProduct>,
}

impl RawCatalog {
    /// Parse a catalog document, falling back to the documented empty
    /// value when the bytes are not a valid document.
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// Parse from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// True when the document carries no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// An upstream category. Identity is `id`, or `name` if `id` is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCategory {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// An upstream product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub long_desc: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub options: Vec<RawOption>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub variants: Vec<RawVariant>,
}

impl RawProduct {
    /// A product is excluded only by an explicit `active: false`.
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }
}

/// A priced sub-choice of a product (e.g., a weight tier).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub active: Option<bool>,
}

impl RawVariant {
    /// A variant is excluded only by an explicit `active: false`.
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// Effective price: sale price wins over the base price.
    pub fn effective_price(&self) -> Option<f64> {
        self.sale_price.or(self.price)
    }
}

/// An upstream per-product option declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawOption {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub required: Option<bool>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub choices: Vec<RawChoice>,
}

/// One choice inside an option: delta-shaped (`priceDelta`) or
/// absolute-shaped (`price`). The normalizer enforces one mode per
/// option.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChoice {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price_delta: Option<f64>,
}

/// Deserialize a price-like field: JSON number or numeric string,
/// anything else is `None`.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Deserialize an id-like field: string or number, stringified.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserialize a flag: only a literal JSON bool counts, anything else
/// leaves the flag unset.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

/// Deserialize an array field: non-array values become the empty list,
/// and malformed elements are skipped.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
