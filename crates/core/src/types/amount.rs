//! Ingredient amount type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing an [`IngredientAmount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IngredientAmountError {
    /// The amount is below the minimum.
    #[error("amount must be at least {min} (got {got})")]
    TooSmall {
        /// Minimum allowed amount.
        min: u16,
        /// Rejected value.
        got: i64,
    },
    /// The amount exceeds the maximum.
    #[error("amount must be at most {max} (got {got})")]
    TooLarge {
        /// Maximum allowed amount.
        max: u16,
        /// Rejected value.
        got: i64,
    },
}

/// Quantity of one ingredient within a single recipe.
///
/// ## Constraints
///
/// - Range: 1-9999 inclusive (mirrors the `CHECK` constraint on
///   `recipe_ingredient.amount`)
///
/// ## Examples
///
/// ```
/// use foodgram_core::IngredientAmount;
///
/// assert!(IngredientAmount::new(200).is_ok());
/// assert!(IngredientAmount::new(0).is_err());
/// assert!(IngredientAmount::new(10_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct IngredientAmount(u16);

impl IngredientAmount {
    /// Smallest amount a recipe may list.
    pub const MIN: u16 = 1;
    /// Largest amount a recipe may list.
    pub const MAX: u16 = 9999;

    /// Validate and wrap an amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the value lies outside `MIN..=MAX`.
    pub fn new(value: impl Into<i64>) -> Result<Self, IngredientAmountError> {
        let value = value.into();
        if value < i64::from(Self::MIN) {
            return Err(IngredientAmountError::TooSmall {
                min: Self::MIN,
                got: value,
            });
        }
        u16::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(IngredientAmountError::TooLarge {
                max: Self::MAX,
                got: value,
            })
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for IngredientAmount {
    type Error = IngredientAmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IngredientAmount> for u16 {
    fn from(amount: IngredientAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for IngredientAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
