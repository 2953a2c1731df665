use crate::application::http::{health::HealthApiDoc, kitchen::router::KitchenApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rasoi Revive API"
    ),
    nest(
        (path = "/kitchens", api = KitchenApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
