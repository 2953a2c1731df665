use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub recipe_name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub difficulty: Difficulty,
    #[serde(deserialize_with = "deserialize_servings")]
    #[schema(minimum = 1)]
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    /// Data URI, set once the image for this recipe has been generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// Schema-typed as a number, so the service may emit `4` or `4.0`.
fn deserialize_servings<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;

    let servings = if let Some(n) = value.as_u64() {
        n
    } else if let Some(f) = value.as_f64()
        && f.fract() == 0.0
        && f >= 0.0
        && f <= u32::MAX as f64
    {
        f as u64
    } else {
        return Err(de::Error::custom(format!(
            "servings must be a positive integer, got {value}"
        )));
    };

    match u32::try_from(servings) {
        Ok(servings) if servings > 0 => Ok(servings),
        _ => Err(de::Error::custom(format!(
            "servings must be a positive integer, got {value}"
        ))),
    }
}

/// Ordered result of one generation request.
///
/// Keeps an `id -> position` index next to the ordered recipes so that a
/// late-arriving image can be attached to its recipe without scanning or
/// reordering the batch. Ids are unique within a batch: duplicates coming
/// from the service are re-keyed with a numeric suffix on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeBatch {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct RecipeBatchPayload<R> {
    recipes: R,
}

impl RecipeBatch {
    pub fn new(mut recipes: Vec<Recipe>) -> Self {
        let mut index = HashMap::with_capacity(recipes.len());

        for (position, recipe) in recipes.iter_mut().enumerate() {
            if index.contains_key(&recipe.id) {
                let original = recipe.id.clone();
                let mut suffix = 2;
                while index.contains_key(&format!("{original}-{suffix}")) {
                    suffix += 1;
                }
                recipe.id = format!("{original}-{suffix}");
                tracing::warn!(
                    original_id = %original,
                    new_id = %recipe.id,
                    "Duplicate recipe id in batch, re-keyed"
                );
            }
            index.insert(recipe.id.clone(), position);
        }

        Self { recipes, index }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.index.get(id).map(|&position| &self.recipes[position])
    }

    /// Sets the image of the recipe with `id`.
    ///
    /// Returns `false` when no such recipe exists or it already has an
    /// image; an attached image is never replaced.
    pub fn attach_image(&mut self, id: &str, image_url: String) -> bool {
        let Some(&position) = self.index.get(id) else {
            return false;
        };

        let recipe = &mut self.recipes[position];
        if recipe.image_url.is_some() {
            return false;
        }

        recipe.image_url = Some(image_url);
        true
    }
}

impl From<Vec<Recipe>> for RecipeBatch {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self::new(recipes)
    }
}

impl<'a> IntoIterator for &'a RecipeBatch {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

impl Serialize for RecipeBatch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RecipeBatchPayload {
            recipes: &self.recipes,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecipeBatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = RecipeBatchPayload::<Vec<Recipe>>::deserialize(deserializer)?;
        Ok(RecipeBatch::new(payload.recipes))
    }
}
