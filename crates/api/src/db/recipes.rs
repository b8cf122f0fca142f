//! Recipe repository.
//!
//! Only the read side needed by the cart and favorites endpoints lives here;
//! recipe authoring belongs to the CRUD layer.

use sqlx::PgPool;

use foodgram_core::RecipeId;

use super::RepositoryError;
use crate::models::RecipeShort;

/// Repository for recipe reads.
pub struct RecipeRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct RecipeShortRow {
    id: RecipeId,
    name: String,
    image: Option<String>,
    cooking_time: i16,
}

impl<'a> RecipeRepository<'a> {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the short representation of a recipe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the cooking time is out of range.
    pub async fn get_short(&self, id: RecipeId) -> Result<Option<RecipeShort>, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeShortRow>(
            r"
            SELECT id, name, image, cooking_time
            FROM foodgram.recipe
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| {
            let cooking_time = u16::try_from(r.cooking_time).map_err(|_| {
                RepositoryError::DataCorruption(format!(
                    "negative cooking time {} for recipe {}",
                    r.cooking_time, r.id
                ))
            })?;

            Ok(RecipeShort {
                id: r.id,
                name: r.name,
                image: r.image,
                cooking_time,
            })
        })
        .transpose()
    }
}
