//! Cart and favorites handlers.
//!
//! Adding or removing a recipe follows the same rules for both lists:
//! the recipe must exist (404), an add must not duplicate an entry (400),
//! and a remove must target an existing entry (404).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use foodgram_core::{RecipeId, UserId};

use crate::db::{RecipeList, RecipeListRepository, RecipeRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::RecipeShort;
use crate::state::AppState;

/// Message returned when a recipe is already on the list.
pub const ALREADY_ADDED: &str = "Recipe already added";

/// Add a recipe to the shopping cart.
///
/// POST /api/recipes/{id}/shopping_cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(recipe_id): Path<RecipeId>,
) -> Result<(StatusCode, Json<RecipeShort>)> {
    add(&state, user.id, recipe_id, RecipeList::Cart).await
}

/// Remove a recipe from the shopping cart.
///
/// DELETE /api/recipes/{id}/shopping_cart
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(recipe_id): Path<RecipeId>,
) -> Result<StatusCode> {
    remove(&state, user.id, recipe_id, RecipeList::Cart).await
}

/// Add a recipe to favorites.
///
/// POST /api/recipes/{id}/favorite
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add_favorite(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(recipe_id): Path<RecipeId>,
) -> Result<(StatusCode, Json<RecipeShort>)> {
    add(&state, user.id, recipe_id, RecipeList::Favorites).await
}

/// Remove a recipe from favorites.
///
/// DELETE /api/recipes/{id}/favorite
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(recipe_id): Path<RecipeId>,
) -> Result<StatusCode> {
    remove(&state, user.id, recipe_id, RecipeList::Favorites).await
}

async fn add(
    state: &AppState,
    user_id: UserId,
    recipe_id: RecipeId,
    list: RecipeList,
) -> Result<(StatusCode, Json<RecipeShort>)> {
    let recipe = find_recipe(state, recipe_id).await?;

    match RecipeListRepository::new(state.pool(), list)
        .add(user_id, recipe_id)
        .await
    {
        Ok(()) => {
            tracing::info!(%recipe_id, list = list.label(), "Recipe added");
            Ok((StatusCode::CREATED, Json(recipe)))
        }
        Err(RepositoryError::Conflict(_)) => Err(AppError::BadRequest(ALREADY_ADDED.to_string())),
        Err(RepositoryError::NotFound) => Err(recipe_not_found(recipe_id)),
        Err(e) => Err(e.into()),
    }
}

async fn remove(
    state: &AppState,
    user_id: UserId,
    recipe_id: RecipeId,
    list: RecipeList,
) -> Result<StatusCode> {
    find_recipe(state, recipe_id).await?;

    let removed = RecipeListRepository::new(state.pool(), list)
        .remove(user_id, recipe_id)
        .await?;

    if !removed {
        return Err(AppError::NotFound(format!(
            "Recipe is not in {}",
            list.label()
        )));
    }

    tracing::info!(%recipe_id, list = list.label(), "Recipe removed");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_recipe(state: &AppState, recipe_id: RecipeId) -> Result<RecipeShort> {
    RecipeRepository::new(state.pool())
        .get_short(recipe_id)
        .await?
        .ok_or_else(|| recipe_not_found(recipe_id))
}

fn recipe_not_found(recipe_id: RecipeId) -> AppError {
    AppError::NotFound(format!("Recipe {recipe_id} not found"))
}
