//! Shopping list aggregation.
//!
//! A user's shopping list is derived from the recipes in their cart: every
//! ingredient line of every cart recipe is folded into one total per
//! `(name, measurement_unit)` pair. The result is never persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::IngredientAmount;

/// One ingredient requirement of one recipe, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    /// Ingredient name.
    pub name: String,
    /// Measurement unit (e.g. "g", "ml", "pcs").
    pub measurement_unit: String,
    /// Amount required by the recipe.
    pub amount: IngredientAmount,
}

impl IngredientLine {
    /// Create a new ingredient line.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        measurement_unit: impl Into<String>,
        amount: IngredientAmount,
    ) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Total required amount of one ingredient across all cart recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLine {
    /// Ingredient name.
    pub ingredient_name: String,
    /// Measurement unit shared by every summed line.
    pub measurement_unit: String,
    /// Sum of all amounts for this `(name, unit)` key.
    pub total_amount: u64,
}

impl AggregatedLine {
    /// Create a new aggregated line.
    #[must_use]
    pub fn new(
        ingredient_name: impl Into<String>,
        measurement_unit: impl Into<String>,
        total_amount: u64,
    ) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            measurement_unit: measurement_unit.into(),
            total_amount,
        }
    }
}

/// Group ingredient lines by `(name, measurement_unit)` and sum their amounts.
///
/// The output is sorted ascending by ingredient name using byte order, so the
/// comparison is case-sensitive ("Zucchini" sorts before "apple"). The sort is
/// stable: keys with equal names (same ingredient measured in different units)
/// keep the order in which they first appeared in `lines`.
///
/// An empty input yields an empty list.
///
/// # Example
///
/// ```
/// use foodgram_core::{IngredientAmount, IngredientLine, aggregate};
///
/// # fn main() -> Result<(), foodgram_core::IngredientAmountError> {
/// let lines = vec![
///     IngredientLine::new("Flour", "g", IngredientAmount::new(200)?),
///     IngredientLine::new("Flour", "g", IngredientAmount::new(300)?),
/// ];
///
/// let list = aggregate(lines);
/// assert_eq!(list.len(), 1);
/// assert_eq!(list[0].total_amount, 500);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn aggregate<I>(lines: I) -> Vec<AggregatedLine>
where
    I: IntoIterator<Item = IngredientLine>,
{
    let mut totals: Vec<AggregatedLine> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for line in lines {
        let amount = u64::from(line.amount.get());
        let key = (line.name, line.measurement_unit);

        if let Some(total) = positions.get(&key).and_then(|&idx| totals.get_mut(idx)) {
            total.total_amount += amount;
            continue;
        }

        positions.insert(key.clone(), totals.len());
        totals.push(AggregatedLine::new(key.0, key.1, amount));
    }

    totals.sort_by(|a, b| a.ingredient_name.cmp(&b.ingredient_name));
    totals
}
