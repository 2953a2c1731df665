use super::handlers::add_leftover::{__path_add_leftover, add_leftover};
use super::handlers::clear_leftovers::{__path_clear_leftovers, clear_leftovers};
use super::handlers::create_kitchen::{__path_create_kitchen, create_kitchen};
use super::handlers::delete_kitchen::{__path_delete_kitchen, delete_kitchen};
use super::handlers::generate_recipes::{__path_generate_recipes, generate_recipes};
use super::handlers::get_kitchen::{__path_get_kitchen, get_kitchen};
use super::handlers::get_recipe_card::{__path_get_recipe_card, get_recipe_card};
use super::handlers::remove_leftover::{__path_remove_leftover, remove_leftover};
use super::handlers::stream_kitchen::{__path_stream_kitchen, stream_kitchen};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    create_kitchen,
    get_kitchen,
    delete_kitchen,
    add_leftover,
    remove_leftover,
    clear_leftovers,
    generate_recipes,
    stream_kitchen,
    get_recipe_card
))]
pub struct KitchenApiDoc;

pub fn kitchen_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/kitchens", root_path), post(create_kitchen))
        .route(
            &format!("{}/kitchens/{{kitchen_id}}", root_path),
            get(get_kitchen).delete(delete_kitchen),
        )
        .route(
            &format!("{}/kitchens/{{kitchen_id}}/leftovers", root_path),
            post(add_leftover).delete(clear_leftovers),
        )
        .route(
            &format!("{}/kitchens/{{kitchen_id}}/leftovers/{{index}}", root_path),
            delete(remove_leftover),
        )
        .route(
            &format!("{}/kitchens/{{kitchen_id}}/generate", root_path),
            post(generate_recipes),
        )
        .route(
            &format!("{}/kitchens/{{kitchen_id}}/events", root_path),
            get(stream_kitchen),
        )
        .route(
            &format!("{}/kitchens/{{kitchen_id}}/recipes/{{recipe_id}}", root_path),
            get(get_recipe_card),
        )
}
