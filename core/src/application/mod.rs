use tracing::warn;

use crate::{
    domain::common::{RasoiConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiClient,
};

pub type RasoiService = Service<GeminiClient>;

pub fn create_service(config: RasoiConfig) -> Result<RasoiService, CoreError> {
    if config.llm.gemini_api_key.trim().is_empty() {
        warn!("API_KEY is not set; every generation request will be rejected by the service");
    }

    let gemini_client = GeminiClient::new(config.llm)?;

    Ok(Service::new(gemini_client))
}
