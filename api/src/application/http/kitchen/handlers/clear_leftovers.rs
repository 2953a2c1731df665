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
pub struct ClearLeftoversResponse {
    pub data: KitchenView,
}

#[utoipa::path(
    delete,
    path = "/{kitchen_id}/leftovers",
    tag = "kitchen",
    summary = "Clear kitchen",
    description = "Empties the leftover list and discards the displayed recipes and error.",
    responses(
        (status = 200, body = ClearLeftoversResponse),
        (status = 404, description = "Kitchen not found")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
    ),
)]
pub async fn clear_leftovers(
    Path(kitchen_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<ClearLeftoversResponse>, ApiError> {
    let kitchen = find_kitchen(&state, kitchen_id).await?;
    kitchen.clear_all();

    Ok(Response::OK(ClearLeftoversResponse {
        data: kitchen.view(),
    }))
}
