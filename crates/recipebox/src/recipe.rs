//! The recipe record.
//!
//! A [`Recipe`] is the only entity in the catalog. Storage assigns its `id`;
//! everything else is supplied by the caller and stored verbatim.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Format used for `created_at`: ISO-8601, no timezone, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Identifier assigned by storage; `None` until the recipe is persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Display title. Never empty once persisted.
    pub title: String,

    /// Free-form ingredient list (may be JSON, stored opaquely).
    pub ingredients: String,

    /// Free-form preparation steps.
    pub steps: String,

    /// Comma-separated tags, e.g. `"dessert,vegetarian"`.
    pub tags: String,

    /// Creation time, e.g. `"2025-11-04T12:34:56"`.
    pub created_at: String,
}

impl Recipe {
    /// Create an unsaved recipe stamped with the current time.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        ingredients: impl Into<String>,
        steps: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self::with_created_at(title, ingredients, steps, tags, Self::now_iso())
    }

    /// Create an unsaved recipe with an explicit creation timestamp.
    #[must_use]
    pub fn with_created_at(
        title: impl Into<String>,
        ingredients: impl Into<String>,
        steps: impl Into<String>,
        tags: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            ingredients: ingredients.into(),
            steps: steps.into(),
            tags: tags.into(),
            created_at: created_at.into(),
        }
    }

    /// Current UTC time truncated to whole seconds, in [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn now_iso() -> String {
        Utc::now().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Whether the title is blank after trimming.
    #[must_use]
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// The `YYYY-MM-DD` part of `created_at`.
    #[must_use]
    pub fn created_date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }

    /// Individual tags, trimmed, with empty entries dropped.
    ///
    /// Display helper only; filtering matches on the raw `tags` string.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_recipe_new() {
        let recipe = Recipe::new("Soup", "water", "boil", "lunch");

        assert!(recipe.id.is_none());
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.ingredients, "water");
        assert_eq!(recipe.steps, "boil");
        assert_eq!(recipe.tags, "lunch");
        assert!(!recipe.created_at.is_empty());
    }

    #[test]
    fn test_now_iso_format() {
        let stamp = Recipe::now_iso();

        assert_eq!(stamp.len(), 19);
        assert!(!stamp.contains('.'));
        assert!(!stamp.ends_with('Z'));
        assert!(NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_has_blank_title() {
        assert!(Recipe::new("", "", "", "").has_blank_title());
        assert!(Recipe::new("   \t", "", "", "").has_blank_title());
        assert!(!Recipe::new(" Pie ", "", "", "").has_blank_title());
    }

    #[test]
    fn test_created_date() {
        let recipe = Recipe::with_created_at("A", "", "", "", "2025-11-04T10:00:00");
        assert_eq!(recipe.created_date(), "2025-11-04");

        let short = Recipe::with_created_at("A", "", "", "", "2025");
        assert_eq!(short.created_date(), "2025");
    }

    #[test]
    fn test_tag_list() {
        let recipe = Recipe::new("Pancakes", "", "", "breakfast, sweet,,  ");
        assert_eq!(recipe.tag_list(), vec!["breakfast", "sweet"]);

        let untagged = Recipe::new("Toast", "", "", "");
        assert!(untagged.tag_list().is_empty());
    }

    #[test]
    fn test_recipe_serialization_skips_missing_id() {
        let recipe = Recipe::with_created_at("Pie", "flour", "bake", "dessert", "2025-11-04T10:00:00");

        let json = serde_json::to_string(&recipe).unwrap();
        assert!(!json.contains("\"id\""));

        let deserialized: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, deserialized);
    }
}
