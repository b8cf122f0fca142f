//! Recipe representations returned by the API.

use serde::Serialize;

use foodgram_core::RecipeId;

/// Compact recipe form returned after adding to the cart or favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeShort {
    pub id: RecipeId,
    pub name: String,
    /// Stored image path, if the recipe has one.
    pub image: Option<String>,
    /// Cooking time in minutes.
    pub cooking_time: u16,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_short_fields() {
        let recipe = RecipeShort {
            id: RecipeId::new(5),
            name: "Pancakes".to_string(),
            image: None,
            cooking_time: 20,
        };

        assert_eq!(
            serde_json::to_value(&recipe).unwrap(),
            serde_json::json!({
                "id": 5,
                "name": "Pancakes",
                "image": null,
                "cooking_time": 20
            })
        );
    }
}
