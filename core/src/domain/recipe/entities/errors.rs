use thiserror::Error;

/// Failure reported by a [`GenerativeClient`](crate::domain::recipe::ports::GenerativeClient)
/// implementation. Never leaves the generation services unconverted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("request to the generative service failed: {0}")]
    Transport(String),

    #[error("generative service rejected the credentials: {0}")]
    Unauthenticated(String),

    #[error("generative service quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("generative service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("generative service response could not be decoded: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Add at least one item first!")]
    NoLeftovers,
}

/// Recipe batch failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("The chef didn't return a recipe. Please try again.")]
    EmptyResponse,

    #[error("The chef had trouble writing down the recipe. Please try again.")]
    MalformedPayload(String),

    #[error("The kitchen's API key was rejected. Check the API_KEY setting and try again.")]
    Unauthorized(#[source] ServiceError),

    #[error("The chef is busy. Try again!")]
    Unavailable(#[source] ServiceError),
}

impl From<ServiceError> for GenerationError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Unauthenticated(_) => GenerationError::Unauthorized(error),
            other => GenerationError::Unavailable(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageGenerationError {
    #[error("the image service returned no candidates")]
    NoCandidates,

    #[error("the image was blocked by the service's content filter ({reason})")]
    SafetyBlocked { reason: String },

    #[error("the image candidate carried no inline image data")]
    MissingImageData,

    #[error("the image payload is not valid base64: {0}")]
    InvalidImageData(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ImageGenerationError {
    /// Content-policy rejections are an expected outcome, not a fault.
    pub fn is_safety_block(&self) -> bool {
        matches!(self, ImageGenerationError::SafetyBlocked { .. })
    }
}
