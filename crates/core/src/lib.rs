//! Foodgram Core - Shared domain types library.
//!
//! This crate provides common types used across all Foodgram components:
//! - `api` - Recipe, cart, and shopping list HTTP backend
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and ingredient amounts
//! - [`shopping_list`] - Cross-recipe ingredient aggregation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod shopping_list;
pub mod types;

pub use shopping_list::{AggregatedLine, IngredientLine, aggregate};
pub use types::*;
