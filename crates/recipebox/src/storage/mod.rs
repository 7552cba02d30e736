//! Storage layer for recipebox.
//!
//! This module provides `SQLite`-based persistent storage for recipes: CRUD by
//! id, newest-first listing, tag search and per-day activity counts.

pub mod schema;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::recipe::Recipe;

/// Columns selected for every recipe query, in `row_to_recipe` order.
const RECIPE_COLUMNS: &str = "id, title, ingredients, steps, tags, created_at";

/// Newest first; equal timestamps fall back to insertion order, newest first.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// Storage engine for recipes.
///
/// Every mutating call is committed before it returns. Update and delete are
/// single statements, so the existence check and the write cannot interleave
/// with another writer.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then creates the `recipes` table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new recipe and return its assigned id.
    ///
    /// The recipe's own `id` is ignored. `created_at` is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the title is blank, or a database error.
    pub fn create(&self, recipe: &Recipe) -> Result<i64> {
        if recipe.has_blank_title() {
            return Err(Error::validation("recipe title may not be empty"));
        }

        self.conn.execute(
            r"
            INSERT INTO recipes (title, ingredients, steps, tags, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                recipe.title,
                recipe.ingredients,
                recipe.steps,
                recipe.tags,
                recipe.created_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted recipe with id {}", id);
        Ok(id)
    }

    /// Get a recipe by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no recipe has this id, or a database error.
    pub fn get_by_id(&self, id: i64) -> Result<Recipe> {
        self.conn
            .query_row(
                &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"),
                [id],
                Self::row_to_recipe,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(id))
    }

    /// Overwrite the editable fields of a recipe. `created_at` is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no recipe has this id, or a database error.
    pub fn update(
        &self,
        id: i64,
        title: &str,
        ingredients: &str,
        steps: &str,
        tags: &str,
    ) -> Result<()> {
        let affected = self.conn.execute(
            r"
            UPDATE recipes SET title = ?1, ingredients = ?2, steps = ?3, tags = ?4
            WHERE id = ?5
            ",
            params![title, ingredients, steps, tags, id],
        )?;

        if affected == 0 {
            return Err(Error::not_found(id));
        }
        debug!("Updated recipe with id {}", id);
        Ok(())
    }

    /// Permanently delete a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no recipe has this id, or a database error.
    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1", [id])?;

        if affected == 0 {
            return Err(Error::not_found(id));
        }
        debug!("Deleted recipe with id {}", id);
        Ok(())
    }

    /// List recipes, newest first, optionally truncated to `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_all(&self, limit: Option<usize>) -> Result<Vec<Recipe>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes {NEWEST_FIRST} LIMIT ?1"
        ))?;

        // SQLite treats a negative LIMIT as "no limit".
        let limit_i64 = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let recipes = stmt
            .query_map([limit_i64], Self::row_to_recipe)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Find recipes whose tags contain `tag` as a case-sensitive substring.
    ///
    /// Results are ordered like [`Storage::list_all`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>> {
        // instr() is case-sensitive and has no wildcard characters, unlike LIKE.
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE instr(tags, ?1) > 0 {NEWEST_FIRST}"
        ))?;

        let recipes = stmt
            .query_map([tag], Self::row_to_recipe)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Count recipes per creation day (`YYYY-MM-DD`), ascending by day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_by_date(&self) -> Result<BTreeMap<String, i64>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT substr(created_at, 1, 10) AS day, COUNT(*) AS cnt
            FROM recipes
            GROUP BY day
            ORDER BY day ASC
            ",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(day, count)| day.filter(|d| !d.is_empty()).map(|d| (d, count)))
            .collect())
    }

    /// Bulk-insert recipes in one transaction, skipping title validation.
    ///
    /// Intended for fixtures and tests.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub fn seed(&self, recipes: &[Recipe]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                r"
                INSERT INTO recipes (title, ingredients, steps, tags, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
            )?;
            for recipe in recipes {
                stmt.execute(params![
                    recipe.title,
                    recipe.ingredients,
                    recipe.steps,
                    recipe.tags,
                    recipe.created_at,
                ])?;
            }
        }
        tx.commit()?;

        info!("Seeded {} recipes", recipes.len());
        Ok(())
    }

    /// Count total recipes in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a Recipe struct.
    ///
    /// Nullable text columns read back as empty strings.
    fn row_to_recipe(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        let id: i64 = row.get(0)?;
        let title: String = row.get(1)?;
        let ingredients: Option<String> = row.get(2)?;
        let steps: Option<String> = row.get(3)?;
        let tags: Option<String> = row.get(4)?;
        let created_at: Option<String> = row.get(5)?;

        Ok(Recipe {
            id: Some(id),
            title,
            ingredients: ingredients.unwrap_or_default(),
            steps: steps.unwrap_or_default(),
            tags: tags.unwrap_or_default(),
            created_at: created_at.unwrap_or_default(),
        })
    }
}
