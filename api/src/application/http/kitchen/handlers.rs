use std::sync::Arc;

use rasoi_core::domain::kitchen::{KitchenRepository, KitchenSession};
use uuid::Uuid;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub mod add_leftover;
pub mod clear_leftovers;
pub mod create_kitchen;
pub mod delete_kitchen;
pub mod generate_recipes;
pub mod get_kitchen;
pub mod get_recipe_card;
pub mod remove_leftover;
pub mod stream_kitchen;

pub(super) async fn find_kitchen(
    state: &AppState,
    kitchen_id: Uuid,
) -> Result<Arc<KitchenSession>, ApiError> {
    state
        .kitchen_repository
        .get_by_id(kitchen_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Kitchen '{}' not found", kitchen_id)))
}
