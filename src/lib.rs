//! Trolley
//!
//! Trolley is a storefront cart and catalog engine: typed product records from a remote
//! catalog API, a stock-clamping cart state manager with durable write-through persistence,
//! and the derived pricing math behind both.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod query;
pub mod storage;
