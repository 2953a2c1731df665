use rasoi_core::domain::recipe::card::CardView;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Blank items are accepted and dropped by the kitchen, so only the length is
/// checked here.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddLeftoverValidator {
    #[validate(length(max = 200, message = "item must be at most 200 characters"))]
    pub item: String,
}

#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CardQueryParams {
    /// `summary` (default) or `expanded`
    pub view: Option<CardView>,
}
