use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    kitchen::entities::{GenerationTicket, KitchenState, KitchenView, WorkflowPhase, WorkflowReport},
    recipe::{
        entities::{
            errors::ValidationError,
            recipe::{Recipe, RecipeBatch},
        },
        ports::RecipeService,
    },
};

pub const GENERATION_FALLBACK_MESSAGE: &str = "The chef is busy. Try again!";

/// Revisions a slow event subscriber may fall behind before it starts
/// skipping.
pub const KITCHEN_EVENT_CAPACITY: usize = 64;

/// One user's kitchen: leftovers, the latest recipe batch and the state of
/// the generation workflow.
///
/// The current state lives in a [`watch`] channel. Every mutation goes
/// through [`update`](Self::update), a single `send_if_modified` call, so the
/// `Idle -> Loading` check-and-set is atomic. Each new revision is also sent
/// on a [`broadcast`] channel while the state is still locked, which gives
/// event subscribers every revision, in order.
#[derive(Debug)]
pub struct KitchenSession {
    id: Uuid,
    state: watch::Sender<KitchenState>,
    events: broadcast::Sender<KitchenView>,
}

impl KitchenSession {
    pub fn new(id: Uuid, created_at: DateTime<Utc>) -> Self {
        let (state, _) = watch::channel(KitchenState::new(id, created_at));
        let (events, _) = broadcast::channel(KITCHEN_EVENT_CAPACITY);
        Self { id, state, events }
    }

    pub fn create() -> Self {
        Self::new(generate_uuid_v7(), Utc::now())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn view(&self) -> KitchenView {
        KitchenView::from(&*self.state.borrow())
    }

    pub fn recipe(&self, recipe_id: &str) -> Option<Recipe> {
        self.state.borrow().batch.get(recipe_id).cloned()
    }

    /// Current view plus a receiver for every later revision.
    ///
    /// Both are taken under the state lock, so the receiver starts exactly
    /// at the revision after the returned view.
    pub fn events(&self) -> (KitchenView, broadcast::Receiver<KitchenView>) {
        let state = self.state.borrow();
        let receiver = self.events.subscribe();
        (KitchenView::from(&*state), receiver)
    }

    /// Applies `mutate`; when it reports a change, bumps the revision and
    /// publishes the new view.
    fn update(&self, mutate: impl FnOnce(&mut KitchenState) -> bool) -> bool {
        self.state.send_if_modified(|state| {
            if !mutate(state) {
                return false;
            }

            state.touch();
            // No subscribers is not an error.
            let _ = self.events.send(KitchenView::from(&*state));
            true
        })
    }

    pub fn add_leftover(&self, input: &str) -> bool {
        self.update(|state| state.leftovers.push(input))
    }

    pub fn remove_leftover(&self, index: usize) -> Option<String> {
        let mut removed = None;
        self.update(|state| {
            removed = state.leftovers.remove(index);
            removed.is_some()
        });
        removed
    }

    /// Empties the leftovers and discards the current recipes and error.
    pub fn clear_all(&self) {
        self.update(|state| {
            state.leftovers.clear();
            state.batch = RecipeBatch::default();
            state.error = None;
            if !state.is_loading {
                state.phase = WorkflowPhase::Idle;
            }
            true
        });
    }

    /// Moves the kitchen into `Loading`.
    ///
    /// With no leftovers the validation message is stored as the kitchen's
    /// error and nothing else changes.
    pub fn begin_generation(&self) -> Result<GenerationTicket, CoreError> {
        let mut outcome = Err(CoreError::WorkflowInProgress);

        self.update(|state| {
            if state.is_loading {
                return false;
            }

            if state.leftovers.is_empty() {
                state.error = Some(ValidationError::NoLeftovers.to_string());
                outcome = Err(CoreError::Validation(ValidationError::NoLeftovers));
                return true;
            }

            state.is_loading = true;
            state.phase = WorkflowPhase::Loading;
            state.error = None;
            state.batch = RecipeBatch::default();

            outcome = Ok(GenerationTicket {
                leftovers: state.leftovers.items().to_vec(),
            });
            true
        });

        outcome
    }

    /// Runs the workflow started by [`begin_generation`](Self::begin_generation):
    /// fetches the batch, publishes it, then requests images one recipe at a
    /// time in batch order.
    ///
    /// A `clear_all` during the batch request does not cancel it; the batch is
    /// still published when it arrives.
    pub async fn run_generation<S>(&self, ticket: GenerationTicket, service: &S) -> WorkflowReport
    where
        S: RecipeService,
    {
        let kitchen_id = self.id;

        let batch = match service.generate_recipes(ticket.leftovers).await {
            Ok(batch) => batch,
            Err(err) => {
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    GENERATION_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                };
                error!(%kitchen_id, error = ?err, "Recipe generation failed");

                self.update(|state| {
                    state.phase = WorkflowPhase::Failed;
                    state.error = Some(message.clone());
                    state.batch = RecipeBatch::default();
                    state.is_loading = false;
                    true
                });

                return WorkflowReport::Failed { message };
            }
        };

        // Image requests only need these; the batch itself moves into the state.
        let pending: Vec<(String, String, String)> = batch
            .iter()
            .map(|r| (r.id.clone(), r.recipe_name.clone(), r.description.clone()))
            .collect();
        let recipe_count = pending.len();

        self.update(|state| {
            state.batch = batch;
            state.phase = WorkflowPhase::Success;
            true
        });
        info!(%kitchen_id, recipe_count, "Recipes published");

        let mut images_attached = 0;
        for (recipe_id, recipe_name, description) in pending {
            match service.generate_image(recipe_name.clone(), description).await {
                Ok(image_url) => {
                    if self.update(|state| state.batch.attach_image(&recipe_id, image_url)) {
                        images_attached += 1;
                    }
                }
                Err(err) if err.is_safety_block() => {
                    warn!(%kitchen_id, %recipe_id, %recipe_name, error = %err, "Recipe image blocked");
                }
                Err(err) => {
                    error!(%kitchen_id, %recipe_id, %recipe_name, error = %err, "Failed to generate recipe image");
                }
            }
        }

        self.update(|state| {
            state.is_loading = false;
            true
        });
        info!(%kitchen_id, recipe_count, images_attached, "Recipe generation finished");

        WorkflowReport::Completed {
            recipe_count,
            images_attached,
        }
    }

    pub async fn generate<S>(&self, service: &S) -> Result<WorkflowReport, CoreError>
    where
        S: RecipeService,
    {
        let ticket = self.begin_generation()?;
        Ok(self.run_generation(ticket, service).await)
    }
}
