use std::collections::HashSet;

use log::debug;

use crate::error::BrowserError;
use crate::model::{Difficulty, Recipe, RecipeId, Step};

/// Immutable, ordered collection of recipes.
///
/// Order is the catalog order, which is what the pipeline preserves when no
/// sort is selected. Nothing mutates a catalog after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Build a catalog from recipes, rejecting duplicate ids
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, BrowserError> {
        let mut seen = HashSet::with_capacity(recipes.len());
        for recipe in &recipes {
            if !seen.insert(recipe.id) {
                return Err(BrowserError::InvalidCatalog(format!(
                    "duplicate recipe id {}",
                    recipe.id
                )));
            }
        }
        debug!("catalog built with {} recipes", recipes.len());
        Ok(Self { recipes })
    }

    /// Load a catalog from a JSON array of recipes
    pub fn from_json(json: &str) -> Result<Self, BrowserError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// The eight recipes the browser ships with
    pub fn builtin() -> Self {
        Self {
            recipes: builtin_recipes(),
        }
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: RecipeId,
    title: &str,
    time: u32,
    difficulty: Difficulty,
    description: &str,
    category: &str,
    ingredients: &[&str],
    steps: Vec<Step>,
) -> Recipe {
    Recipe {
        id,
        title: title.to_string(),
        time,
        difficulty,
        description: description.to_string(),
        category: category.to_string(),
        ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
        steps,
    }
}

fn leaf(text: &str) -> Step {
    Step::leaf(text)
}

fn group(title: &str, substeps: &[&str]) -> Step {
    Step::group(title, substeps.iter().map(|s| Step::leaf(*s)).collect())
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            1,
            "Classic Spaghetti Carbonara",
            25,
            Difficulty::Easy,
            "A creamy Italian pasta dish made with eggs, cheese, pancetta, and black pepper.",
            "pasta",
            &["Spaghetti", "Eggs", "Pancetta", "Parmesan", "Black Pepper"],
            vec![
                leaf("Boil water and cook spaghetti."),
                group(
                    "Prepare Sauce",
                    &["Whisk eggs and parmesan.", "Cook pancetta until crispy."],
                ),
                leaf("Mix pasta with sauce and pancetta."),
            ],
        ),
        recipe(
            2,
            "Chicken Tikka Masala",
            45,
            Difficulty::Medium,
            "Tender chicken pieces in a creamy, spiced tomato sauce.",
            "curry",
            &["Chicken", "Yogurt", "Tomato Sauce", "Spices", "Cream"],
            vec![
                group(
                    "Marinate Chicken",
                    &["Mix yogurt and spices.", "Coat chicken and rest 30 minutes."],
                ),
                leaf("Cook chicken."),
                leaf("Prepare sauce and combine."),
            ],
        ),
        recipe(
            3,
            "Homemade Croissants",
            180,
            Difficulty::Hard,
            "Buttery, flaky French pastries that require patience.",
            "baking",
            &["Flour", "Butter", "Yeast", "Milk", "Sugar"],
            vec![
                group("Prepare Dough", &["Mix flour and yeast.", "Add milk and knead."]),
                group(
                    "Layer Butter",
                    &["Roll dough.", "Fold butter inside.", "Repeat folding process."],
                ),
                leaf("Bake until golden brown."),
            ],
        ),
        recipe(
            4,
            "Greek Salad",
            15,
            Difficulty::Easy,
            "Fresh vegetables with feta cheese and olives.",
            "salad",
            &["Tomatoes", "Cucumber", "Feta", "Olives", "Olive Oil"],
            vec![
                leaf("Chop vegetables."),
                leaf("Mix in bowl."),
                leaf("Add olive oil and toss."),
            ],
        ),
        recipe(
            5,
            "Beef Wellington",
            120,
            Difficulty::Hard,
            "Tender beef fillet wrapped in puff pastry.",
            "meat",
            &["Beef Fillet", "Mushrooms", "Puff Pastry", "Eggs", "Mustard"],
            vec![
                leaf("Season and sear beef."),
                group(
                    "Prepare Mushroom Duxelles",
                    &["Chop mushrooms.", "Cook until moisture evaporates."],
                ),
                leaf("Wrap beef in pastry."),
                leaf("Bake until golden."),
            ],
        ),
        recipe(
            6,
            "Vegetable Stir Fry",
            20,
            Difficulty::Easy,
            "Mixed vegetables cooked in savory sauce.",
            "vegetarian",
            &["Broccoli", "Carrots", "Bell Peppers", "Soy Sauce", "Garlic"],
            vec![
                leaf("Chop vegetables."),
                leaf("Heat oil in pan."),
                leaf("Stir fry vegetables."),
                leaf("Add sauce and cook 5 minutes."),
            ],
        ),
        recipe(
            7,
            "Pad Thai",
            30,
            Difficulty::Medium,
            "Thai rice noodles with shrimp and peanuts.",
            "noodles",
            &["Rice Noodles", "Shrimp", "Eggs", "Peanuts", "Tamarind Sauce"],
            vec![
                leaf("Soak noodles."),
                group("Cook Shrimp", &["Heat oil.", "Cook shrimp until pink."]),
                leaf("Add noodles and sauce."),
                leaf("Mix and serve."),
            ],
        ),
        recipe(
            8,
            "Margherita Pizza",
            60,
            Difficulty::Medium,
            "Classic pizza with mozzarella and basil.",
            "pizza",
            &["Pizza Dough", "Tomato Sauce", "Mozzarella", "Basil"],
            vec![
                leaf("Prepare dough."),
                leaf("Spread tomato sauce."),
                leaf("Add mozzarella."),
                leaf("Bake in oven."),
                leaf("Garnish with basil."),
            ],
        ),
    ]
}
