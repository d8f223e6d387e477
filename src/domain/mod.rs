pub mod product;

pub use product::{site_name_of, ExtractionCandidate, ProductRecord, UNKNOWN_PRODUCT};
