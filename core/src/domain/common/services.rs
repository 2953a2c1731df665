use std::sync::Arc;

use crate::domain::recipe::ports::GenerativeClient;

/// Entry point of the domain services, generic over the generative backend.
pub struct Service<G>
where
    G: GenerativeClient,
{
    pub(crate) generative_client: Arc<G>,
}

impl<G> Service<G>
where
    G: GenerativeClient,
{
    pub fn new(generative_client: G) -> Self {
        Self {
            generative_client: Arc::new(generative_client),
        }
    }
}

impl<G> Clone for Service<G>
where
    G: GenerativeClient,
{
    fn clone(&self) -> Self {
        Self {
            generative_client: Arc::clone(&self.generative_client),
        }
    }
}
