use std::sync::Arc;

use rasoi_core::{
    application::RasoiService, infrastructure::kitchen::InMemoryKitchenRepository,
};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: RasoiService,
    pub kitchen_repository: Arc<InMemoryKitchenRepository>,
}

impl AppState {
    pub fn new(
        args: Arc<Args>,
        service: RasoiService,
        kitchen_repository: InMemoryKitchenRepository,
    ) -> Self {
        Self {
            args,
            service,
            kitchen_repository: Arc::new(kitchen_repository),
        }
    }
}
