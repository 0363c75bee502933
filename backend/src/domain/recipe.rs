//! Recipes: validated drafts, stored records, and read models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Maximum length of a recipe name, in characters.
pub const RECIPE_NAME_MAX: usize = 100;
/// Maximum length of the tags line, in characters.
pub const RECIPE_TAGS_MAX: usize = 100;

/// Validation failures for recipe input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("recipe id must be a positive integer")]
    NonPositiveId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("tags must be at most {max} characters")]
    TagsTooLong { max: usize },
    #[error("ingredients must not be empty")]
    EmptyIngredients,
    #[error("instructions must not be empty")]
    EmptyInstructions,
}

impl RecipeValidationError {
    /// Name of the offending payload field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId => "id",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::TagsTooLong { .. } => "tags",
            Self::EmptyIngredients => "ingredients",
            Self::EmptyInstructions => "instructions",
        }
    }
}

/// System-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RecipeId(i64);

impl RecipeId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, RecipeValidationError> {
        if raw <= 0 {
            return Err(RecipeValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    pub(crate) const fn assigned(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecipeId> for i64 {
    fn from(value: RecipeId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for RecipeId {
    type Error = RecipeValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for creating a recipe.
///
/// ## Invariants
/// - `name` is trimmed, non-empty, and at most [`RECIPE_NAME_MAX`] chars.
/// - `tags` is trimmed, may be empty, and at most [`RECIPE_TAGS_MAX`] chars.
/// - `ingredients` and `instructions` contain non-whitespace text.
///
/// # Examples
/// ```
/// use recipe_box::domain::RecipeDraft;
///
/// let draft = RecipeDraft::try_from_parts(" Pancakes ", "breakfast", "flour, eggs", "Whisk.")
///     .expect("valid draft");
/// assert_eq!(draft.name(), "Pancakes");
///
/// assert!(RecipeDraft::try_from_parts("", "", "x", "y").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    name: String,
    tags: String,
    ingredients: String,
    instructions: String,
}

impl RecipeDraft {
    /// Validate raw recipe fields.
    pub fn try_from_parts(
        name: &str,
        tags: &str,
        ingredients: &str,
        instructions: &str,
    ) -> Result<Self, RecipeValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if name.chars().count() > RECIPE_NAME_MAX {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX,
            });
        }
        let tags = tags.trim();
        if tags.chars().count() > RECIPE_TAGS_MAX {
            return Err(RecipeValidationError::TagsTooLong {
                max: RECIPE_TAGS_MAX,
            });
        }
        if ingredients.trim().is_empty() {
            return Err(RecipeValidationError::EmptyIngredients);
        }
        if instructions.trim().is_empty() {
            return Err(RecipeValidationError::EmptyInstructions);
        }
        Ok(Self {
            name: name.to_owned(),
            tags: tags.to_owned(),
            ingredients: ingredients.to_owned(),
            instructions: instructions.to_owned(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    #[must_use]
    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

/// Stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[schema(value_type = i64, example = 1)]
    id: RecipeId,
    #[schema(example = "Chocolate Cake")]
    name: String,
    #[schema(example = "dessert, chocolate")]
    tags: String,
    ingredients: String,
    instructions: String,
    #[schema(value_type = i64, example = 1)]
    author_id: UserId,
    created_at: DateTime<Utc>,
}

impl Recipe {
    /// Assemble a stored recipe from its validated content.
    #[must_use]
    pub fn new(
        id: RecipeId,
        draft: RecipeDraft,
        author_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let RecipeDraft {
            name,
            tags,
            ingredients,
            instructions,
        } = draft;
        Self {
            id,
            name,
            tags,
            ingredients,
            instructions,
            author_id,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> RecipeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    #[must_use]
    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Author reference; always resolves to a registered user.
    #[must_use]
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Single-recipe view: the recipe, its author's name, and whether the viewer
/// has favorited it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[schema(example = "alice")]
    pub author_username: String,
    pub is_favorite: bool,
}

/// Keyword search input.
///
/// A missing or blank term is "no query" and matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery(Option<String>);

impl SearchQuery {
    /// Normalise an optional raw term.
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(
            raw.map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_owned),
        )
    }

    /// Trimmed term, or `None` when there is nothing to search for.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Case-insensitive substring match against name or tags.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let Some(term) = self.term() else {
            return false;
        };
        let needle = term.to_lowercase();
        recipe.name().to_lowercase().contains(&needle)
            || recipe.tags().to_lowercase().contains(&needle)
    }
}
