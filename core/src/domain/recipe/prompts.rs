pub const EXPECTED_RECIPE_COUNT: usize = 3;

pub const PANTRY_STAPLES: &[&str] = &[
    "spices", "oil", "salt", "onions", "ginger", "garlic", "flour", "rice", "lentils",
];

pub const CHEF_SYSTEM_INSTRUCTION: &str = "You are a world-class Indian chef and a 'Zero Waste' \
cooking expert. You specialise in turning leftovers into delicious traditional and modern Indian \
dishes while keeping their flavours authentic.";

pub const IMAGE_ASPECT_RATIO: &str = "4:3";

pub fn build_recipe_prompt(leftovers: &[String]) -> String {
    format!(
        "I have the following leftover food items: {leftovers}.\n\
         Suggest exactly {count} authentic and creative Indian recipes that mainly use these leftovers.\n\
         Standard Indian pantry staples ({staples}) are available and are not part of the leftovers.\n\
         For each recipe give detailed step-by-step instructions, preparation and cooking time, \
         servings and tags.\n\
         Only suggest Indian recipes. Respond only with JSON matching the provided schema.",
        leftovers = leftovers.join(", "),
        count = EXPECTED_RECIPE_COUNT,
        staples = PANTRY_STAPLES.join(", "),
    )
}

pub fn build_image_prompt(recipe_name: &str, description: &str) -> String {
    format!(
        "A high-quality, professional food photography shot of an authentic Indian dish called \
         \"{recipe_name}\". {description}. The dish is beautifully plated on traditional Indian \
         tableware, with warm lighting and appetizing textures. Landscape {ratio} composition. \
         Do not show any people, hands or faces, and do not include any text, labels or watermarks.",
        ratio = IMAGE_ASPECT_RATIO,
    )
}
