use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::recipe::entities::recipe::{Recipe, RecipeBatch};

/// User-entered leftovers, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeftoverList {
    items: Vec<String>,
}

impl LeftoverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the trimmed `input`. Blank input is ignored.
    pub fn push(&mut self, input: &str) -> bool {
        let item = input.trim();
        if item.is_empty() {
            return false;
        }

        self.items.push(item.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Mutable state of one kitchen, published through a watch channel.
#[derive(Debug, Clone)]
pub struct KitchenState {
    pub id: Uuid,
    pub leftovers: LeftoverList,
    pub batch: RecipeBatch,
    pub phase: WorkflowPhase,
    pub is_loading: bool,
    pub error: Option<String>,
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KitchenState {
    pub fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            leftovers: LeftoverList::new(),
            batch: RecipeBatch::default(),
            phase: WorkflowPhase::Idle,
            is_loading: false,
            error: None,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }

    pub fn can_generate(&self) -> bool {
        !self.is_loading && !self.leftovers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KitchenView {
    pub id: Uuid,
    pub leftovers: Vec<String>,
    pub recipes: Vec<Recipe>,
    pub phase: WorkflowPhase,
    pub is_loading: bool,
    pub error: Option<String>,
    pub can_generate: bool,
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&KitchenState> for KitchenView {
    fn from(state: &KitchenState) -> Self {
        Self {
            id: state.id,
            leftovers: state.leftovers.items().to_vec(),
            recipes: state.batch.recipes().to_vec(),
            phase: state.phase,
            is_loading: state.is_loading,
            error: state.error.clone(),
            can_generate: state.can_generate(),
            revision: state.revision,
            created_at: state.created_at,
            updated_at: state.updated_at,
        }
    }
}

/// Proof that a kitchen entered `Loading`; consumed by the workflow run.
#[derive(Debug)]
pub struct GenerationTicket {
    pub(crate) leftovers: Vec<String>,
}

impl GenerationTicket {
    pub fn leftovers(&self) -> &[String] {
        &self.leftovers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowReport {
    Failed {
        message: String,
    },
    Completed {
        recipe_count: usize,
        images_attached: usize,
    },
}
