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
pub struct GetKitchenResponse {
    pub data: KitchenView,
}

#[utoipa::path(
    get,
    path = "/{kitchen_id}",
    tag = "kitchen",
    summary = "Get kitchen",
    description = "Returns the leftovers, the latest recipes and the workflow state of a kitchen.",
    responses(
        (status = 200, body = GetKitchenResponse),
        (status = 404, description = "Kitchen not found")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
    ),
)]
pub async fn get_kitchen(
    Path(kitchen_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<GetKitchenResponse>, ApiError> {
    let kitchen = find_kitchen(&state, kitchen_id).await?;

    Ok(Response::OK(GetKitchenResponse {
        data: kitchen.view(),
    }))
}
