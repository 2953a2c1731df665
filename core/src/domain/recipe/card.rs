use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipe::entities::recipe::{Difficulty, Ingredient, Recipe};

/// Number of tags shown on a card.
pub const CARD_TAG_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardView {
    #[default]
    Summary,
    Expanded,
}

impl CardView {
    pub fn toggle(self) -> Self {
        match self {
            CardView::Summary => CardView::Expanded,
            CardView::Expanded => CardView::Summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CardImage {
    Ready { url: String },
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberedStep {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CardDetails {
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<NumberedStep>,
}

/// Presentation of one recipe, either as a summary or with full details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    pub recipe_id: String,
    pub recipe_name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub tags: Vec<String>,
    pub image: CardImage,
    pub view: CardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CardDetails>,
}

impl RecipeCard {
    pub fn render(recipe: &Recipe, view: CardView) -> Self {
        let image = match &recipe.image_url {
            Some(url) => CardImage::Ready { url: url.clone() },
            None => CardImage::Pending,
        };

        let details = match view {
            CardView::Summary => None,
            CardView::Expanded => Some(CardDetails {
                ingredients: recipe.ingredients.clone(),
                steps: recipe
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(idx, text)| NumberedStep {
                        number: idx + 1,
                        text: text.clone(),
                    })
                    .collect(),
            }),
        };

        Self {
            recipe_id: recipe.id.clone(),
            recipe_name: recipe.recipe_name.clone(),
            description: recipe.description.clone(),
            difficulty: recipe.difficulty,
            prep_time: recipe.prep_time.clone(),
            cook_time: recipe.cook_time.clone(),
            servings: recipe.servings,
            tags: recipe.tags.iter().take(CARD_TAG_LIMIT).cloned().collect(),
            image,
            view,
            details,
        }
    }

    pub fn toggle(&self, recipe: &Recipe) -> Self {
        Self::render(recipe, self.view.toggle())
    }
}
