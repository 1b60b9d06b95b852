//! HTTP API: routing, request validation, and response mapping for products.

pub mod app;
pub mod config;
