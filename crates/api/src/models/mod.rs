//! Domain models for the API.

pub mod recipe;
pub mod session;

pub use recipe::RecipeShort;
pub use session::{CurrentUser, keys as session_keys};
