//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod number;
pub mod price;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use number::parse_decimal;
pub use price::{round_cents, Price};
