use std::{future::Future, sync::Arc};

use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, kitchen::session::KitchenSession};

/// Repository trait for live kitchens
#[cfg_attr(test, mockall::automock)]
pub trait KitchenRepository: Send + Sync {
    fn create(&self) -> impl Future<Output = Result<Arc<KitchenSession>, CoreError>> + Send;

    fn get_by_id(
        &self,
        kitchen_id: Uuid,
    ) -> impl Future<Output = Result<Option<Arc<KitchenSession>>, CoreError>> + Send;

    fn delete(&self, kitchen_id: Uuid) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize, CoreError>> + Send;
}
