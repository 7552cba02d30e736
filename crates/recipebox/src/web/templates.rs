//! Page rendering for the web front end.
//!
//! Templates are embedded at compile time so the binary is self-contained.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use tracing::error;

use crate::error::Result;
use crate::recipe::Recipe;

const INDEX_TEMPLATE: &str = "index.html";

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    if let Err(e) = env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html")) {
        error!("Failed to parse template {INDEX_TEMPLATE}: {e:#}");
    }
    env
});

/// One bar of the activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBar {
    /// Day, `YYYY-MM-DD`.
    pub day: String,
    /// Recipes added that day.
    pub count: i64,
    /// Bar length relative to the busiest day, 1..=100.
    pub percent: i64,
}

/// Scale per-day counts into chart bars.
#[must_use]
pub fn activity_bars(stats: &BTreeMap<String, i64>) -> Vec<ActivityBar> {
    let max = stats.values().copied().max().unwrap_or(0).max(1);
    stats
        .iter()
        .map(|(day, &count)| ActivityBar {
            day: day.clone(),
            count,
            percent: (count * 100 / max).max(1),
        })
        .collect()
}

/// Everything the index page shows.
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    /// Recipes, newest first.
    pub recipes: &'a [Recipe],
    /// The recipe picked by `/random`, if any.
    pub random_recipe: Option<&'a Recipe>,
    /// The tag the random pick was filtered by.
    pub tag: Option<&'a str>,
    /// Per-day activity bars.
    pub bars: Vec<ActivityBar>,
    /// Per-day counts as JSON, for the chart script.
    pub stats_json: String,
    /// One-line notice (e.g. why an add was rejected).
    pub notice: Option<String>,
}

/// Render the index page.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_index(page: &IndexPage<'_>) -> Result<String> {
    let tpl = ENV.get_template(INDEX_TEMPLATE)?;
    Ok(tpl.render(page)?)
}
