use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    kitchen::{ports::KitchenRepository, session::KitchenSession},
};

/// Kitchens kept for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKitchenRepository {
    kitchens: Arc<RwLock<HashMap<Uuid, Arc<KitchenSession>>>>,
}

impl InMemoryKitchenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KitchenRepository for InMemoryKitchenRepository {
    async fn create(&self) -> Result<Arc<KitchenSession>, CoreError> {
        let kitchen = Arc::new(KitchenSession::create());
        self.kitchens
            .write()
            .await
            .insert(kitchen.id(), Arc::clone(&kitchen));

        info!(kitchen_id = %kitchen.id(), "Kitchen created");
        Ok(kitchen)
    }

    async fn get_by_id(&self, kitchen_id: Uuid) -> Result<Option<Arc<KitchenSession>>, CoreError> {
        Ok(self.kitchens.read().await.get(&kitchen_id).cloned())
    }

    async fn delete(&self, kitchen_id: Uuid) -> Result<bool, CoreError> {
        let removed = self.kitchens.write().await.remove(&kitchen_id).is_some();
        if removed {
            info!(%kitchen_id, "Kitchen deleted");
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, CoreError> {
        Ok(self.kitchens.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_delete() {
        let repository = InMemoryKitchenRepository::new();

        let kitchen = repository.create().await.unwrap();
        kitchen.add_leftover("Rice");

        let found = repository.get_by_id(kitchen.id()).await.unwrap().unwrap();
        assert_eq!(found.view().leftovers, vec!["Rice"]);
        assert_eq!(repository.count().await.unwrap(), 1);

        assert!(repository.delete(kitchen.id()).await.unwrap());
        assert!(!repository.delete(kitchen.id()).await.unwrap());
        assert!(repository.get_by_id(kitchen.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_kitchens_are_isolated() {
        let repository = InMemoryKitchenRepository::new();
        let first = repository.create().await.unwrap();
        let second = repository.create().await.unwrap();

        first.add_leftover("Paneer");

        assert_ne!(first.id(), second.id());
        assert!(second.view().leftovers.is_empty());
    }
}
