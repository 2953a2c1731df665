use crate::application::http::kitchen::handlers::find_kitchen;
use crate::application::http::kitchen::validators::CardQueryParams;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, Query, State};
use rasoi_core::domain::recipe::card::RecipeCard;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRecipeCardResponse {
    pub data: RecipeCard,
}

#[utoipa::path(
    get,
    path = "/{kitchen_id}/recipes/{recipe_id}",
    tag = "kitchen",
    summary = "Get recipe card",
    description = "Renders one recipe of the current batch as a summary or expanded card.",
    responses(
        (status = 200, body = GetRecipeCardResponse),
        (status = 404, description = "Kitchen or recipe not found")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
        ("recipe_id" = String, Path, description = "Recipe ID"),
        CardQueryParams,
    ),
)]
pub async fn get_recipe_card(
    Path((kitchen_id, recipe_id)): Path<(Uuid, String)>,
    Query(params): Query<CardQueryParams>,
    State(state): State<AppState>,
) -> Result<Response<GetRecipeCardResponse>, ApiError> {
    let recipe = find_kitchen(&state, kitchen_id)
        .await?
        .recipe(&recipe_id)
        .ok_or_else(|| ApiError::NotFound(format!("Recipe '{}' not found", recipe_id)))?;

    Ok(Response::OK(GetRecipeCardResponse {
        data: RecipeCard::render(&recipe, params.view.unwrap_or_default()),
    }))
}
