//! Business logic services for the API.
//!
//! # Services
//!
//! - `shopping_list` - Cart aggregation and PDF rendering

pub mod shopping_list;
