//! Database operations for the Foodgram `PostgreSQL` store.
//!
//! # Schema: `foodgram`
//!
//! ## Tables
//!
//! - `user` - Accounts (written by the authentication collaborator)
//! - `ingredient` - Ingredient catalogue, `(name, measurement_unit)`
//! - `tag`, `recipe_tag` - Recipe tags
//! - `recipe` - Published recipes
//! - `recipe_ingredient` - Amount of each ingredient per recipe
//! - `favorite` - Recipes a user marked as favorite
//! - `purchase` - Recipes in a user's shopping cart
//! - `subscription` - Author subscriptions
//!
//! Sessions live in the `tower_sessions` schema managed by the session store.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p foodgram-cli -- migrate
//! ```
//!
//! Queries are checked at runtime (`sqlx::query_as` + `FromRow`) so building
//! the workspace never needs a live database or an offline query cache.

pub mod cart;
pub mod recipe_lists;
pub mod recipes;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use recipe_lists::{RecipeList, RecipeListRepository};
pub use recipes::RecipeRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate cart entry).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
