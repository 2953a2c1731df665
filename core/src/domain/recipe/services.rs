use base64::{Engine as _, engine::general_purpose};
use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::services::Service,
    recipe::{
        entities::{
            errors::{GenerationError, ImageGenerationError},
            recipe::RecipeBatch,
        },
        ports::{GenerativeClient, RecipeService},
        prompts::{
            CHEF_SYSTEM_INSTRUCTION, EXPECTED_RECIPE_COUNT, IMAGE_ASPECT_RATIO,
            build_image_prompt, build_recipe_prompt,
        },
        schema::get_recipe_batch_schema,
        value_objects::{ImageRequest, StructuredRequest},
    },
};

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/png";

impl<G> RecipeService for Service<G>
where
    G: GenerativeClient,
{
    #[instrument(skip(self), fields(leftover_count = leftovers.len()))]
    async fn generate_recipes(&self, leftovers: Vec<String>) -> Result<RecipeBatch, GenerationError> {
        let request = StructuredRequest {
            system_instruction: CHEF_SYSTEM_INSTRUCTION.to_string(),
            prompt: build_recipe_prompt(&leftovers),
            response_schema: get_recipe_batch_schema(),
        };

        let raw_response = self
            .generative_client
            .generate_structured(request)
            .await
            .map_err(|e| {
                error!(error = %e, "Recipe generation request failed");
                GenerationError::from(e)
            })?;

        let raw_response = match raw_response {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                error!("Recipe generation returned no content");
                return Err(GenerationError::EmptyResponse);
            }
        };

        let batch: RecipeBatch = serde_json::from_str(raw_response.trim()).map_err(|e| {
            error!(error = %e, "Failed to parse recipe batch");
            GenerationError::MalformedPayload(e.to_string())
        })?;

        if batch.len() != EXPECTED_RECIPE_COUNT {
            warn!(
                expected = EXPECTED_RECIPE_COUNT,
                received = batch.len(),
                "Unexpected number of recipes in batch"
            );
        }

        info!(recipe_count = batch.len(), "Recipe batch generated");
        Ok(batch)
    }

    #[instrument(skip(self, description))]
    async fn generate_image(
        &self,
        recipe_name: String,
        description: String,
    ) -> Result<String, ImageGenerationError> {
        let request = ImageRequest {
            prompt: build_image_prompt(&recipe_name, &description),
            aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
        };

        let response = self
            .generative_client
            .generate_image(request)
            .await
            .map_err(|e| {
                error!(error = %e, "Image generation request failed");
                ImageGenerationError::from(e)
            })?;

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(match response.prompt_block_reason {
                Some(reason) => {
                    warn!(%reason, "Image prompt blocked by the service");
                    ImageGenerationError::SafetyBlocked { reason }
                }
                None => {
                    error!("Image generation returned no candidates");
                    ImageGenerationError::NoCandidates
                }
            });
        };

        if candidate.finish_reason.is_safety_block() {
            warn!(reason = %candidate.finish_reason, "Image candidate blocked by the service");
            return Err(ImageGenerationError::SafetyBlocked {
                reason: candidate.finish_reason.to_string(),
            });
        }

        let image = candidate.images.into_iter().next().ok_or_else(|| {
            error!(finish_reason = %candidate.finish_reason, "Image candidate has no inline data");
            ImageGenerationError::MissingImageData
        })?;

        general_purpose::STANDARD.decode(&image.data).map_err(|e| {
            error!(error = %e, "Image payload is not valid base64");
            ImageGenerationError::InvalidImageData(e.to_string())
        })?;

        let mime_type = image
            .mime_type
            .filter(|mime| !mime.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());

        Ok(format!("data:{};base64,{}", mime_type, image.data))
    }
}
