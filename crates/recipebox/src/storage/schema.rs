//! `SQLite` schema definitions for recipebox.
//!
//! There is no schema versioning: the statements are idempotent and run on
//! every open.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the recipes table.
pub const CREATE_RECIPES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    ingredients TEXT,
    steps TEXT,
    tags TEXT,
    created_at TEXT
)
";

/// SQL statement to create an index on `created_at` for ordered listing.
pub const CREATE_CREATED_AT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at DESC)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_RECIPES_TABLE, CREATE_CREATED_AT_INDEX];

/// Create the table and indexes if they don't exist.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.trim().is_empty());
        }
    }

    #[test]
    fn test_create_recipes_table_contains_required_columns() {
        assert!(CREATE_RECIPES_TABLE.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(CREATE_RECIPES_TABLE.contains("title TEXT NOT NULL"));
        assert!(CREATE_RECIPES_TABLE.contains("ingredients TEXT"));
        assert!(CREATE_RECIPES_TABLE.contains("steps TEXT"));
        assert!(CREATE_RECIPES_TABLE.contains("tags TEXT"));
        assert!(CREATE_RECIPES_TABLE.contains("created_at TEXT"));
    }

    #[test]
    fn test_initialize_schema_creates_table() {
        let conn = create_test_db();
        initialize_schema(&conn).expect("failed to initialize schema");

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='recipes'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let conn = create_test_db();

        initialize_schema(&conn).expect("first init failed");
        initialize_schema(&conn).expect("second init failed");
    }

    #[test]
    fn test_no_metadata_table() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='metadata'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_created_at_index_created() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='recipes'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(indexes.iter().any(|n| n.contains("created_at")));
    }
}
