//! Per-user recipe lists: the shopping cart and favorites.
//!
//! Both lists are `(user_id, recipe_id)` tables with a unique constraint on
//! the pair, so they share one repository parameterised by [`RecipeList`].

use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::{RecipeId, UserId};

use super::RepositoryError;

/// Which per-user list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeList {
    /// Recipes whose ingredients go on the shopping list.
    Cart,
    /// Recipes the user bookmarked.
    Favorites,
}

impl RecipeList {
    /// Backing table.
    const fn table(self) -> &'static str {
        match self {
            Self::Cart => "foodgram.purchase",
            Self::Favorites => "foodgram.favorite",
        }
    }

    /// Human-readable name used in client messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cart => "shopping cart",
            Self::Favorites => "favorites",
        }
    }
}

/// Repository for cart and favorites entries.
pub struct RecipeListRepository<'a> {
    pool: &'a PgPool,
    list: RecipeList,
}

impl<'a> RecipeListRepository<'a> {
    /// Create a repository for one list.
    #[must_use]
    pub const fn new(pool: &'a PgPool, list: RecipeList) -> Self {
        Self { pool, list }
    }

    /// Add a recipe to the user's list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the recipe is already on the list.
    /// Returns `RepositoryError::NotFound` if the recipe or user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self), fields(list = self.list.label()))]
    pub async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2)",
            self.list.table()
        );

        sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return RepositoryError::Conflict(format!(
                            "recipe already in {}",
                            self.list.label()
                        ));
                    }
                    if db_err.is_foreign_key_violation() {
                        return RepositoryError::NotFound;
                    }
                }
                RepositoryError::Database(e)
            })?;

        Ok(())
    }

    /// Remove a recipe from the user's list.
    ///
    /// Returns `false` if the recipe was not on the list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(list = self.list.label()))]
    pub async fn remove(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, RepositoryError> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            self.list.table()
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
