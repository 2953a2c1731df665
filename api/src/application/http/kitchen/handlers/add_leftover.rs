use crate::application::http::kitchen::handlers::find_kitchen;
use crate::application::http::kitchen::validators::AddLeftoverValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use rasoi_core::domain::kitchen::KitchenView;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AddLeftoverResponse {
    pub added: bool,
    pub data: KitchenView,
}

#[utoipa::path(
    post,
    path = "/{kitchen_id}/leftovers",
    tag = "kitchen",
    summary = "Add leftover",
    description = "Appends a trimmed leftover item. Blank items leave the list unchanged and report `added: false`.",
    responses(
        (status = 200, body = AddLeftoverResponse),
        (status = 404, description = "Kitchen not found")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
    ),
    request_body = AddLeftoverValidator
)]
pub async fn add_leftover(
    Path(kitchen_id): Path<Uuid>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AddLeftoverValidator>,
) -> Result<Response<AddLeftoverResponse>, ApiError> {
    let kitchen = find_kitchen(&state, kitchen_id).await?;

    let added = kitchen.add_leftover(&payload.item);
    if !added {
        debug!(%kitchen_id, "Ignoring blank leftover");
    }

    Ok(Response::OK(AddLeftoverResponse {
        added,
        data: kitchen.view(),
    }))
}
