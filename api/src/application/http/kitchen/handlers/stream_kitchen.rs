use std::{convert::Infallible, time::Duration};

use crate::application::http::kitchen::handlers::find_kitchen;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use rasoi_core::domain::kitchen::KitchenView;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use uuid::Uuid;

pub const KITCHEN_EVENT: &str = "kitchen";

#[utoipa::path(
    get,
    path = "/{kitchen_id}/events",
    tag = "kitchen",
    summary = "Stream kitchen state",
    description = "Server-sent events carrying the full kitchen state. The current state is sent first, then one event per revision, in order. The stream ends when the kitchen is deleted.",
    responses(
        (status = 200, description = "Event stream of KitchenView payloads", content_type = "text/event-stream"),
        (status = 404, description = "Kitchen not found")
    ),
    params(
        ("kitchen_id" = Uuid, Path, description = "Kitchen ID"),
    ),
)]
pub async fn stream_kitchen(
    Path(kitchen_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let (initial, mut receiver) = find_kitchen(&state, kitchen_id).await?.events();

    let stream = async_stream::stream! {
        if let Some(event) = kitchen_event(kitchen_id, &initial) {
            yield Ok(event);
        }

        loop {
            match receiver.recv().await {
                Ok(view) => {
                    if let Some(event) = kitchen_event(kitchen_id, &view) {
                        yield Ok(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%kitchen_id, skipped, "Kitchen event subscriber lagged");
                }
                Err(RecvError::Closed) => {
                    debug!(%kitchen_id, "Kitchen closed, ending event stream");
                    break;
                }
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

fn kitchen_event(kitchen_id: Uuid, view: &KitchenView) -> Option<Event> {
    match Event::default()
        .event(KITCHEN_EVENT)
        .id(view.revision.to_string())
        .json_data(view)
    {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(%kitchen_id, "Failed to serialize kitchen event: {}", e);
            None
        }
    }
}
