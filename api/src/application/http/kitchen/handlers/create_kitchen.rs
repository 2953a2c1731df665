use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use rasoi_core::domain::kitchen::{KitchenRepository, KitchenView};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateKitchenResponse {
    pub data: KitchenView,
}

#[utoipa::path(
    post,
    path = "",
    tag = "kitchen",
    summary = "Create kitchen",
    description = "Opens a new kitchen with no leftovers and no recipes.",
    responses(
        (status = 201, body = CreateKitchenResponse)
    ),
)]
pub async fn create_kitchen(
    State(state): State<AppState>,
) -> Result<Response<CreateKitchenResponse>, ApiError> {
    let kitchen = state
        .kitchen_repository
        .create()
        .await
        .map_err(ApiError::from)?;

    let open_kitchens = state
        .kitchen_repository
        .count()
        .await
        .map_err(ApiError::from)?;
    info!(kitchen_id = %kitchen.id(), open_kitchens, "Kitchen opened");

    Ok(Response::Created(CreateKitchenResponse {
        data: kitchen.view(),
    }))
}
