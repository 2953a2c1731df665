use crate::application::http::kitchen::handlers::find_kitchen;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use rasoi_core::domain::kitchen::KitchenView;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RemoveLeftoverResponse {
    pub removed: String,
    pub data: KitchenView,
}

#[utoipa::path(
    delete,
    path = "/{kitchen_id}/leftovers/{index}",
    tag = "kitchen",
    summary = "Remove leftover",
    description = "Removes the leftover at the given position. The remaining items keep their order.",
    responses(
        (status = 200, body = RemoveLeftoverResponse),
        (status = 404, description = "Kitchen not found or index out of range")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
        ("index" = usize, Path, description = "Zero-based position in the leftover list"),
    ),
)]
pub async fn remove_leftover(
    Path((kitchen_id, index)): Path<(Uuid, usize)>,
    State(state): State<AppState>,
) -> Result<Response<RemoveLeftoverResponse>, ApiError> {
    let kitchen = find_kitchen(&state, kitchen_id).await?;

    let removed = kitchen
        .remove_leftover(index)
        .ok_or_else(|| ApiError::NotFound(format!("No leftover at index {}", index)))?;

    Ok(Response::OK(RemoveLeftoverResponse {
        removed,
        data: kitchen.view(),
    }))
}
