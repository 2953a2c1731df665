use std::future::Future;

use crate::domain::recipe::{
    entities::{
        errors::{GenerationError, ImageGenerationError, ServiceError},
        recipe::RecipeBatch,
    },
    value_objects::{ImageCandidates, ImageRequest, StructuredRequest},
};

/// Capability of the external generative AI service.
#[cfg_attr(test, mockall::automock)]
pub trait GenerativeClient: Send + Sync {
    /// Returns the raw JSON text produced for `request`, or `None` when the
    /// service answered without content.
    fn generate_structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<Option<String>, ServiceError>> + Send;

    fn generate_image(
        &self,
        request: ImageRequest,
    ) -> impl Future<Output = Result<ImageCandidates, ServiceError>> + Send;
}

/// Service trait for recipe and recipe image generation
#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    /// Generates one batch of recipes from `leftovers`. Callers must pass a
    /// non-empty list.
    fn generate_recipes(
        &self,
        leftovers: Vec<String>,
    ) -> impl Future<Output = Result<RecipeBatch, GenerationError>> + Send;

    /// Generates an illustration of a recipe and returns it as a data URI.
    fn generate_image(
        &self,
        recipe_name: String,
        description: String,
    ) -> impl Future<Output = Result<String, ImageGenerationError>> + Send;
}
