use crate::application::http::kitchen::handlers::find_kitchen;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use rasoi_core::domain::kitchen::{KitchenView, WorkflowReport};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GenerateRecipesResponse {
    pub data: KitchenView,
}

#[utoipa::path(
    post,
    path = "/{kitchen_id}/generate",
    tag = "kitchen",
    summary = "Generate recipes",
    description = "Starts recipe generation from the current leftovers. Progress is published on the kitchen's event stream.",
    responses(
        (status = 202, body = GenerateRecipesResponse),
        (status = 400, description = "The kitchen has no leftovers"),
        (status = 404, description = "Kitchen not found"),
        (status = 409, description = "A generation is already running for this kitchen")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
    ),
)]
pub async fn generate_recipes(
    Path(kitchen_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<GenerateRecipesResponse>, ApiError> {
    let kitchen = find_kitchen(&state, kitchen_id).await?;
    let ticket = kitchen.begin_generation().map_err(ApiError::from)?;
    let view = kitchen.view();

    info!(%kitchen_id, leftovers = ticket.leftovers().len(), "Starting recipe generation");

    let service = state.service.clone();
    tokio::spawn(async move {
        match kitchen.run_generation(ticket, &service).await {
            WorkflowReport::Completed {
                recipe_count,
                images_attached,
            } => info!(%kitchen_id, recipe_count, images_attached, "Recipe generation completed"),
            WorkflowReport::Failed { message } => {
                info!(%kitchen_id, %message, "Recipe generation ended with an error")
            }
        }
    });

    Ok(Response::Accepted(GenerateRecipesResponse { data: view }))
}
