//! Products domain module.
//!
//! This crate contains business rules for the product catalog, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod discount;
pub mod product;
pub mod query;

pub use discount::{Discount, DiscountError};
pub use product::{Product, ProductDraft};
pub use query::{PriceRange, ProductQuery};
