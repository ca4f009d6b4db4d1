//! Product catalog module.
//!
//! Contains the lenient upstream model, the normalizer that flattens it
//! into display products, and image URL resolution.

mod display;
mod media;
mod normalize;
mod raw;

pub use display::{Choice, ChoicePrice, DisplayProduct, OptionKind, ProductOption};
pub use media::resolve_image_url;
pub use normalize::{Normalizer, VARIANT_OPTION};
pub use raw::{RawCatalog, RawCategory, RawChoice, RawOption, RawProduct, RawVariant};
