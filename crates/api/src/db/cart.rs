//! Shopping cart reads for the shopping list.

use sqlx::PgPool;
use tracing::instrument;

use foodgram_core::{IngredientAmount, IngredientLine, UserId};

use super::RepositoryError;

/// Repository for the ingredient side of a user's cart.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

#[derive(sqlx::FromRow)]
struct IngredientLineRow {
    name: String,
    measurement_unit: String,
    amount: i16,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every ingredient line of every recipe in the user's cart.
    ///
    /// Rows come back in `recipe_ingredient` insertion order, which is the
    /// tie-break order used by the aggregation. An empty cart yields an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored amount is out of range.
    #[instrument(skip(self))]
    pub async fn ingredient_lines(
        &self,
        user_id: UserId,
    ) -> Result<Vec<IngredientLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, IngredientLineRow>(
            r"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM foodgram.purchase p
            JOIN foodgram.recipe_ingredient ri ON ri.recipe_id = p.recipe_id
            JOIN foodgram.ingredient i ON i.id = ri.ingredient_id
            WHERE p.user_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                let amount = IngredientAmount::new(r.amount).map_err(|e| {
                    RepositoryError::DataCorruption(format!(
                        "invalid amount for ingredient {}: {e}",
                        r.name
                    ))
                })?;
                Ok(IngredientLine::new(r.name, r.measurement_unit, amount))
            })
            .collect()
    }
}
