use std::sync::Arc;

use crate::application::http::health::health_routes;
use crate::application::http::kitchen::router::kitchen_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use rasoi_core::{
    application::create_service, domain::common::RasoiConfig,
    infrastructure::kitchen::InMemoryKitchenRepository,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let rasoi_config = RasoiConfig::from(args.as_ref().clone());
    let service = create_service(rasoi_config)?;

    Ok(AppState::new(args, service, InMemoryKitchenRepository::new()))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid allowed origin {:?}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT]);

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();

    let router = axum::Router::new()
        .merge(Scalar::with_url(format!("{}/scalar", root_path), openapi))
        .merge(kitchen_routes(state.clone()))
        .merge(health_routes(&root_path))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Json;
    use axum::http::{StatusCode, Uri};
    use axum_test::TestServer;
    use clap::Parser;
    use rasoi_core::domain::kitchen::KitchenRepository;
    use serde_json::{Value, json};

    use super::*;

    const TEXT_MODEL: &str = "test-text-model";
    const IMAGE_MODEL: &str = "test-image-model";
    const IMAGE_DATA: &str = "aGVsbG8=";

    // Nothing listens on the discard port, so every model call fails fast.
    fn test_state() -> AppState {
        test_state_with("http://127.0.0.1:9")
    }

    fn test_state_with(base_url: &str) -> AppState {
        let args = Args::parse_from([
            "rasoi-api",
            "--llm-base-url",
            base_url,
            "--llm-text-model",
            TEXT_MODEL,
            "--llm-image-model",
            IMAGE_MODEL,
            "--llm-timeout-secs",
            "5",
        ]);
        state(Arc::new(args)).unwrap()
    }

    fn gemini_recipe(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "recipeName": name,
            "description": format!("{name} from leftover rice"),
            "prepTime": "10 mins",
            "cookTime": "15 mins",
            "difficulty": "Easy",
            "servings": 2,
            "ingredients": [{ "item": "Leftover rice", "amount": "2 cups" }],
            "steps": ["Temper the spices", "Toss in the rice", "Serve hot"],
            "tags": ["quick", "tangy", "south-indian", "tiffin"]
        })
    }

    async fn gemini_generate_content(uri: Uri) -> Json<Value> {
        if uri.path().contains(IMAGE_MODEL) {
            return Json(json!({
                "candidates": [{
                    "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": IMAGE_DATA } }] },
                    "finishReason": "STOP"
                }]
            }));
        }

        let batch = json!({
            "recipes": [
                gemini_recipe("r1", "Lemon Rice"),
                gemini_recipe("r2", "Curd Rice"),
                gemini_recipe("r3", "Rice Pakoras"),
            ]
        });
        Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": batch.to_string() }] } }]
        }))
    }

    /// Serves canned Gemini responses on a local port and returns its base URL.
    async fn spawn_gemini() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().fallback(gemini_generate_content))
                .await
                .unwrap();
        });
        format!("http://{addr}")
    }

    async fn kitchen_with_rice(server: &TestServer) -> String {
        let kitchen_id = create_kitchen(server).await;
        server
            .post(&format!("/kitchens/{kitchen_id}/leftovers"))
            .json(&json!({ "item": "Rice" }))
            .await
            .assert_status_ok();
        kitchen_id
    }

    async fn wait_until_idle(server: &TestServer, kitchen_id: &str) -> Value {
        let mut body = Value::Null;
        for _ in 0..200 {
            body = server
                .get(&format!("/kitchens/{kitchen_id}"))
                .await
                .json::<Value>();
            if body["data"]["isLoading"] == false {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        body
    }

    fn test_server(state: AppState) -> TestServer {
        TestServer::new(router(state).unwrap()).unwrap()
    }

    async fn create_kitchen(server: &TestServer) -> String {
        let response = server.post("/kitchens").await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(test_state());

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_kitchen_is_idle_and_empty() {
        let server = test_server(test_state());
        let kitchen_id = create_kitchen(&server).await;

        let body = server
            .get(&format!("/kitchens/{kitchen_id}"))
            .await
            .json::<Value>();

        assert_eq!(body["data"]["phase"], "idle");
        assert_eq!(body["data"]["isLoading"], false);
        assert_eq!(body["data"]["canGenerate"], false);
        assert_eq!(body["data"]["leftovers"], json!([]));
        assert_eq!(body["data"]["recipes"], json!([]));
    }

    #[tokio::test]
    async fn test_add_and_remove_leftovers() {
        let server = test_server(test_state());
        let kitchen_id = create_kitchen(&server).await;
        let leftovers_path = format!("/kitchens/{kitchen_id}/leftovers");

        for item in ["  Leftover Dal ", "Rice", "Chapati"] {
            server
                .post(&leftovers_path)
                .json(&json!({ "item": item }))
                .await
                .assert_status_ok();
        }

        let blank = server
            .post(&leftovers_path)
            .json(&json!({ "item": "   " }))
            .await;
        blank.assert_status_ok();
        let body = blank.json::<Value>();
        assert_eq!(body["added"], false);
        assert_eq!(body["data"]["leftovers"], json!(["Leftover Dal", "Rice", "Chapati"]));
        assert_eq!(body["data"]["canGenerate"], true);

        let removed = server.delete(&format!("{leftovers_path}/1")).await;
        removed.assert_status_ok();
        let body = removed.json::<Value>();
        assert_eq!(body["removed"], "Rice");
        assert_eq!(body["data"]["leftovers"], json!(["Leftover Dal", "Chapati"]));

        server
            .delete(&format!("{leftovers_path}/5"))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let cleared = server.delete(&leftovers_path).await;
        cleared.assert_status_ok();
        assert_eq!(cleared.json::<Value>()["data"]["leftovers"], json!([]));
    }

    #[tokio::test]
    async fn test_overlong_leftover_is_rejected() {
        let server = test_server(test_state());
        let kitchen_id = create_kitchen(&server).await;

        server
            .post(&format!("/kitchens/{kitchen_id}/leftovers"))
            .json(&json!({ "item": "a".repeat(201) }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_kitchen_is_not_found() {
        let server = test_server(test_state());
        let kitchen_id = uuid::Uuid::new_v4();

        for response in [
            server.get(&format!("/kitchens/{kitchen_id}")).await,
            server.delete(&format!("/kitchens/{kitchen_id}")).await,
            server.post(&format!("/kitchens/{kitchen_id}/generate")).await,
            server.get(&format!("/kitchens/{kitchen_id}/events")).await,
        ] {
            response.assert_status(StatusCode::NOT_FOUND);
            assert_eq!(response.json::<Value>()["code"], "E_NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_generate_without_leftovers_is_rejected() {
        let server = test_server(test_state());
        let kitchen_id = create_kitchen(&server).await;

        let response = server
            .post(&format!("/kitchens/{kitchen_id}/generate"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Add at least one item first!"
        );

        let body = server
            .get(&format!("/kitchens/{kitchen_id}"))
            .await
            .json::<Value>();
        assert_eq!(body["data"]["error"], "Add at least one item first!");
        assert_eq!(body["data"]["isLoading"], false);
    }

    #[tokio::test]
    async fn test_generate_while_loading_conflicts() {
        let state = test_state();
        let kitchen = state.kitchen_repository.create().await.unwrap();
        kitchen.add_leftover("Rice");
        let _ticket = kitchen.begin_generation().unwrap();

        let server = test_server(state);
        let response = server
            .post(&format!("/kitchens/{}/generate", kitchen.id()))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "E_CONFLICT");
    }

    #[tokio::test]
    async fn test_generate_reports_unreachable_model() {
        let server = test_server(test_state());
        let kitchen_id = kitchen_with_rice(&server).await;

        let accepted = server
            .post(&format!("/kitchens/{kitchen_id}/generate"))
            .await;
        accepted.assert_status(StatusCode::ACCEPTED);
        assert_eq!(accepted.json::<Value>()["data"]["phase"], "loading");

        let body = wait_until_idle(&server, &kitchen_id).await;

        assert_eq!(body["data"]["isLoading"], false);
        assert_eq!(body["data"]["phase"], "failed");
        assert_eq!(body["data"]["recipes"], json!([]));
        assert_eq!(body["data"]["error"], "The chef is busy. Try again!");
        assert_eq!(body["data"]["leftovers"], json!(["Rice"]));
    }

    #[tokio::test]
    async fn test_unknown_recipe_card_is_not_found() {
        let server = test_server(test_state());
        let kitchen_id = create_kitchen(&server).await;

        server
            .get(&format!("/kitchens/{kitchen_id}/recipes/missing"))
            .add_query_param("view", "expanded")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleted_kitchen_is_gone() {
        let server = test_server(test_state());
        let kitchen_id = create_kitchen(&server).await;

        server
            .delete(&format!("/kitchens/{kitchen_id}"))
            .await
            .assert_status_ok();
        server
            .get(&format!("/kitchens/{kitchen_id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_recipe_card_summary_and_expanded() {
        let server = test_server(test_state_with(&spawn_gemini().await));
        let kitchen_id = kitchen_with_rice(&server).await;

        server
            .post(&format!("/kitchens/{kitchen_id}/generate"))
            .await
            .assert_status(StatusCode::ACCEPTED);

        let body = wait_until_idle(&server, &kitchen_id).await;
        assert_eq!(body["data"]["phase"], "success");
        assert_eq!(body["data"]["error"], Value::Null);
        let recipes = body["data"]["recipes"].as_array().unwrap();
        assert_eq!(recipes.len(), 3);
        for recipe in recipes {
            assert_eq!(
                recipe["imageUrl"],
                format!("data:image/png;base64,{IMAGE_DATA}")
            );
        }

        let card_path = format!("/kitchens/{kitchen_id}/recipes/r2");

        let summary = server.get(&card_path).await;
        summary.assert_status_ok();
        let card = summary.json::<Value>()["data"].clone();
        assert_eq!(card["recipeName"], "Curd Rice");
        assert_eq!(card["view"], "summary");
        assert_eq!(card["tags"], json!(["quick", "tangy", "south-indian"]));
        assert_eq!(
            card["image"],
            json!({ "state": "ready", "url": format!("data:image/png;base64,{IMAGE_DATA}") })
        );
        assert!(card.get("details").is_none());

        let expanded = server
            .get(&card_path)
            .add_query_param("view", "expanded")
            .await;
        expanded.assert_status_ok();
        let card = expanded.json::<Value>()["data"].clone();
        assert_eq!(card["view"], "expanded");
        assert_eq!(card["details"]["ingredients"][0]["item"], "Leftover rice");
        assert_eq!(
            card["details"]["steps"],
            json!([
                { "number": 1, "text": "Temper the spices" },
                { "number": 2, "text": "Toss in the rice" },
                { "number": 3, "text": "Serve hot" }
            ])
        );
    }

    #[tokio::test]
    async fn test_event_stream_sends_every_revision() {
        let server = test_server(test_state_with(&spawn_gemini().await));
        let kitchen_id = kitchen_with_rice(&server).await;

        let (stream, final_body) = tokio::join!(
            async { server.get(&format!("/kitchens/{kitchen_id}/events")).await },
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                server
                    .post(&format!("/kitchens/{kitchen_id}/generate"))
                    .await
                    .assert_status(StatusCode::ACCEPTED);
                let body = wait_until_idle(&server, &kitchen_id).await;

                // Dropping the kitchen closes the stream.
                server
                    .delete(&format!("/kitchens/{kitchen_id}"))
                    .await
                    .assert_status_ok();
                body
            }
        );

        stream.assert_status_ok();
        let views: Vec<Value> = stream
            .text()
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|data| serde_json::from_str(data.trim_start()).unwrap())
            .collect();

        // Initial state, loading, recipes, three images, finished.
        assert_eq!(views.len(), 7);
        let first_revision = views[0]["revision"].as_u64().unwrap();
        for (offset, view) in views.iter().enumerate() {
            assert_eq!(view["revision"].as_u64().unwrap(), first_revision + offset as u64);
        }

        assert_eq!(views[0]["phase"], "idle");
        assert_eq!(views[0]["leftovers"], json!(["Rice"]));
        assert_eq!(views[1]["phase"], "loading");

        let first_success = &views[2];
        assert_eq!(first_success["phase"], "success");
        assert_eq!(first_success["isLoading"], true);
        let recipes = first_success["recipes"].as_array().unwrap();
        assert_eq!(recipes.len(), 3);
        assert!(recipes.iter().all(|recipe| recipe.get("imageUrl").is_none()));

        let last = views.last().unwrap();
        assert_eq!(last["isLoading"], false);
        assert_eq!(last["phase"], "success");
        assert_eq!(last["revision"], final_body["data"]["revision"]);
        assert!(
            last["recipes"]
                .as_array()
                .unwrap()
                .iter()
                .all(|recipe| recipe["imageUrl"].is_string())
        );
    }
}
