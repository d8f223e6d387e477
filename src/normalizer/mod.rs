//! Pure helpers shared by every extraction strategy.
//!
//! - [`resolve_url`]: turns any href found in a page into an absolute URL
//! - [`normalize_price`]: turns raw price text into the canonical display form

mod price;
mod resolve;

pub use self::price::{glyph_for, normalize_price};
pub use self::resolve::resolve_url;
