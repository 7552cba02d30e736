//! Recipe use-cases.
//!
//! [`RecipeController`] sits between the front ends and [`Storage`]: it
//! normalizes input, stamps creation times, picks random recipes, and reports
//! what it did through an optional [`ActivitySink`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::recipe::Recipe;
use crate::storage::Storage;

/// Severity of an activity message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    /// Normal operation (recipe added, picked, ...).
    Info,
    /// An operation referenced something that does not exist.
    Warning,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Receiver for the controller's activity messages.
pub trait ActivitySink: Send {
    /// Record one message.
    fn record(&self, level: ActivityLevel, message: &str);
}

/// Forwards activity messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ActivitySink for TracingSink {
    fn record(&self, level: ActivityLevel, message: &str) {
        match level {
            ActivityLevel::Info => info!(target: "recipebox::activity", "{message}"),
            ActivityLevel::Warning => warn!(target: "recipebox::activity", "{message}"),
        }
    }
}

/// Keeps activity messages in memory.
///
/// Clones share the same buffer, so a front end can hand one clone to the
/// controller and read the log through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(ActivityLevel, String)>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<(ActivityLevel, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Formatted log lines, e.g. `"INFO - added recipe id=1 title='Soup'"`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(level, message)| format!("{level} - {message}"))
            .collect()
    }
}

impl ActivitySink for MemorySink {
    fn record(&self, level: ActivityLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}

/// Orchestrates recipe operations over a [`Storage`] instance.
pub struct RecipeController {
    storage: Storage,
    sink: Option<Box<dyn ActivitySink>>,
    rng: StdRng,
}

impl fmt::Debug for RecipeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeController")
            .field("storage", &self.storage)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl RecipeController {
    /// Create a controller with no activity sink and an OS-seeded RNG.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            sink: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Report activity to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ActivitySink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Use `rng` for random selection.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Add a recipe stamped with the current time and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the trimmed title is empty, or a storage error.
    pub fn add_recipe(
        &self,
        title: &str,
        ingredients: &str,
        steps: &str,
        tags: &str,
    ) -> Result<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::validation("title may not be empty"));
        }

        let recipe = Recipe::new(title, ingredients, steps, tags);
        let id = self.storage.create(&recipe)?;
        self.record(
            ActivityLevel::Info,
            &format!("added recipe id={id} title='{title}'"),
        );
        Ok(id)
    }

    /// Replace a recipe's title, ingredients, steps and tags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the recipe does not exist, or a storage error.
    pub fn edit_recipe(
        &self,
        id: i64,
        title: &str,
        ingredients: &str,
        steps: &str,
        tags: &str,
    ) -> Result<()> {
        match self.storage.update(id, title, ingredients, steps, tags) {
            Ok(()) => {
                self.record(ActivityLevel::Info, &format!("updated recipe id={id}"));
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                self.record(
                    ActivityLevel::Warning,
                    &format!("attempted to edit nonexistent recipe id={id}"),
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Permanently delete a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the recipe does not exist, or a storage error.
    pub fn delete_recipe(&self, id: i64) -> Result<()> {
        match self.storage.delete(id) {
            Ok(()) => {
                self.record(ActivityLevel::Info, &format!("deleted recipe id={id}"));
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                self.record(
                    ActivityLevel::Warning,
                    &format!("attempted to delete nonexistent recipe id={id}"),
                );
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// List recipes, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn list_recipes(&self, limit: Option<usize>) -> Result<Vec<Recipe>> {
        self.storage.list_all(limit)
    }

    /// Recipes whose tags contain `tag`, newest first, optionally truncated to
    /// `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn find_by_tag(&self, tag: &str, limit: Option<usize>) -> Result<Vec<Recipe>> {
        let mut found = self.storage.find_by_tag(tag)?;
        if let Some(limit) = limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    /// Fetch one recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the recipe does not exist, or a storage error.
    pub fn get_recipe(&self, id: i64) -> Result<Recipe> {
        self.storage.get_by_id(id)
    }

    /// Pick a recipe uniformly at random.
    ///
    /// A non-empty `tag_filter` restricts the candidates to recipes whose tags
    /// contain it; `None` or `""` considers every recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if there are no candidates, or a storage error.
    pub fn random_recipe(&mut self, tag_filter: Option<&str>) -> Result<Recipe> {
        let mut candidates = match tag_filter.filter(|tag| !tag.is_empty()) {
            Some(tag) => self.storage.find_by_tag(tag)?,
            None => self.storage.list_all(None)?,
        };

        if candidates.is_empty() {
            return Err(Error::validation("no matching recipes"));
        }

        let index = self.rng.random_range(0..candidates.len());
        let choice = candidates.swap_remove(index);
        self.record(
            ActivityLevel::Info,
            &format!(
                "picked random recipe id={} title='{}'",
                choice.id.unwrap_or_default(),
                choice.title
            ),
        );
        Ok(choice)
    }

    /// Number of recipes added per day (`YYYY-MM-DD`), ascending by day.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn activity_stats(&self) -> Result<BTreeMap<String, i64>> {
        self.storage.count_by_date()
    }

    fn record(&self, level: ActivityLevel, message: &str) {
        if let Some(sink) = &self.sink {
            sink.record(level, message);
        }
    }
}
