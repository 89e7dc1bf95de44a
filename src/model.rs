use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric identity of a recipe, unique within a catalog
pub type RecipeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single instruction, or a titled group of nested instructions.
///
/// In JSON a leaf is a bare string and a group is
/// `{"title": "...", "substeps": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Leaf(String),
    Group {
        title: String,
        #[serde(default)]
        substeps: Vec<Step>,
    },
}

impl Step {
    pub fn leaf(text: impl Into<String>) -> Self {
        Step::Leaf(text.into())
    }

    pub fn group(title: impl Into<String>, substeps: Vec<Step>) -> Self {
        Step::Group {
            title: title.into(),
            substeps,
        }
    }

    /// Text shown for this step: the instruction itself or the group title
    pub fn label(&self) -> &str {
        match self {
            Step::Leaf(text) => text,
            Step::Group { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// Preparation time in minutes
    pub time: u32,
    pub difficulty: Difficulty,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}
