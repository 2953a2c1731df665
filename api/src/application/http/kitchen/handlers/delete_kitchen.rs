use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use rasoi_core::domain::kitchen::KitchenRepository;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteKitchenResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/{kitchen_id}",
    tag = "kitchen",
    summary = "Delete kitchen",
    description = "Closes a kitchen. Open event streams for it end.",
    responses(
        (status = 200, body = DeleteKitchenResponse),
        (status = 404, description = "Kitchen not found")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
    ),
)]
pub async fn delete_kitchen(
    Path(kitchen_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<DeleteKitchenResponse>, ApiError> {
    let deleted = state
        .kitchen_repository
        .delete(kitchen_id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::NotFound(format!(
            "Kitchen '{}' not found",
            kitchen_id
        )));
    }

    Ok(Response::OK(DeleteKitchenResponse {
        message: format!("Kitchen {} deleted", kitchen_id),
    }))
}
