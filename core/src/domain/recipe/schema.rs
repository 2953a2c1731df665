use serde_json::json;

/// Returns the response schema declared on recipe batch requests.
pub fn get_recipe_batch_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "recipes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "recipeName": { "type": "string" },
                        "description": { "type": "string" },
                        "prepTime": { "type": "string" },
                        "cookTime": { "type": "string" },
                        "difficulty": {
                            "type": "string",
                            "enum": ["Easy", "Medium", "Hard"]
                        },
                        "ingredients": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "item": { "type": "string" },
                                    "amount": { "type": "string" }
                                },
                                "required": ["item", "amount"]
                            }
                        },
                        "steps": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "servings": { "type": "integer" },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": [
                        "id", "recipeName", "description", "prepTime", "cookTime",
                        "difficulty", "ingredients", "steps", "servings", "tags"
                    ]
                }
            }
        },
        "required": ["recipes"]
    })
}
