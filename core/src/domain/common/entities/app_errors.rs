use thiserror::Error;

use crate::domain::recipe::entities::errors::ValidationError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A recipe generation is already in progress for this kitchen")]
    WorkflowInProgress,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
