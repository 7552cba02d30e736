//! Plain-text rendering for CLI output.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::recipe::Recipe;

/// Widest bar drawn by [`activity_chart`].
const CHART_WIDTH: usize = 40;

/// Longest title shown in a [`recipe_table`] row before truncation.
const TITLE_WIDTH: usize = 32;

/// Full description of one recipe.
#[must_use]
pub fn recipe_details(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", recipe.id.unwrap_or_default(), recipe.title);
    let _ = writeln!(out, "Created:     {}", recipe.created_at);
    let _ = writeln!(out, "Tags:        {}", recipe.tag_list().join(", "));
    let _ = writeln!(out, "Ingredients: {}", recipe.ingredients);
    let _ = write!(out, "Steps:       {}", recipe.steps);
    out
}

/// One line per recipe: id, created date, title and tags.
#[must_use]
pub fn recipe_table(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes found.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<10}  {:<w$}  Tags",
        "ID",
        "Created",
        "Title",
        w = TITLE_WIDTH
    );
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:>5}  {:<10}  {:<w$}  {}",
            recipe.id.unwrap_or_default(),
            recipe.created_date(),
            truncate(&recipe.title, TITLE_WIDTH),
            recipe.tags,
            w = TITLE_WIDTH
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// Horizontal bar chart of recipes added per day.
#[must_use]
pub fn activity_chart(stats: &BTreeMap<String, i64>) -> String {
    if stats.is_empty() {
        return "No activity yet.".to_string();
    }

    let max = stats.values().copied().max().unwrap_or(0).max(1);
    let max = usize::try_from(max).unwrap_or(usize::MAX);
    let mut out = String::new();
    for (day, &count) in stats {
        let count_usize = usize::try_from(count).unwrap_or(0);
        let width = (count_usize.saturating_mul(CHART_WIDTH) / max).max(1);
        let _ = writeln!(
            out,
            "{day}  {:<w$}  {count}",
            "#".repeat(width),
            w = CHART_WIDTH
        );
    }
    out.truncate(out.trim_end().len());
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
