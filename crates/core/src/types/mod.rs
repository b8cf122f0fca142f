//! Core types for Foodgram.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod id;

pub use amount::{IngredientAmount, IngredientAmountError};
pub use id::*;
