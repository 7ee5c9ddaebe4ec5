// crates/db/src/migrations.rs
//! Versioned schema migrations for the timesheet store.
//!
//! Each migration is a list of steps that are individually idempotent, so a
//! store that was partially migrated by an older build (or that predates the
//! `db_version` table entirely) converges on the same schema.

/// One schema change inside a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A single idempotent statement (`CREATE ... IF NOT EXISTS`, backfills).
    Sql(&'static str),
    /// `ALTER TABLE <table> ADD COLUMN <column> <definition>`.
    /// SQLite's "duplicate column name" error is treated as already applied.
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
    /// `INSERT OR IGNORE` seed rows; conflicts with existing rows are ignored.
    Seed(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub steps: &'static [Step],
}

pub const VERSION_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS db_version (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL,
    applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
)"#;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "initial schema",
        steps: &[
            Step::Sql(
                r#"
CREATE TABLE IF NOT EXISTS time_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task TEXT NOT NULL,
    description TEXT,
    category TEXT NOT NULL DEFAULT 'other',
    start_time DATETIME,
    end_time DATETIME,
    duration INTEGER NOT NULL,
    date TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)"#,
            ),
            Step::Sql(
                r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    color TEXT NOT NULL DEFAULT '#718096',
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)"#,
            ),
            Step::Sql(
                r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category_id INTEGER,
    description TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE SET NULL
)"#,
            ),
            // Stores created before categories and explicit timestamps existed.
            Step::AddColumn {
                table: "time_entries",
                column: "category",
                definition: "TEXT DEFAULT 'other'",
            },
            Step::AddColumn {
                table: "time_entries",
                column: "start_time",
                definition: "DATETIME",
            },
            Step::AddColumn {
                table: "time_entries",
                column: "end_time",
                definition: "DATETIME",
            },
            Step::Sql("UPDATE time_entries SET category = 'other' WHERE category IS NULL"),
            Step::Seed(
                r#"
INSERT OR IGNORE INTO categories (name, color) VALUES
    ('project work', '#48bb78'),
    ('project support', '#ed8936'),
    ('other', '#718096')"#,
            ),
        ],
    },
    Migration {
        version: 2,
        description: "category lookup indexes",
        steps: &[
            Step::Sql(
                "CREATE INDEX IF NOT EXISTS idx_time_entries_category ON time_entries(category)",
            ),
            Step::Sql("CREATE INDEX IF NOT EXISTS idx_tasks_category ON tasks(category_id)"),
        ],
    },
];

/// The schema version this build expects: the highest migration version.
pub const TARGET_SCHEMA_VERSION: i64 = MIGRATIONS[MIGRATIONS.len() - 1].version;

impl Step {
    /// The SQL text executed for this step.
    pub fn sql(&self) -> String {
        match self {
            Step::Sql(sql) | Step::Seed(sql) => (*sql).to_string(),
            Step::AddColumn {
                table,
                column,
                definition,
            } => format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"),
        }
    }
}

/// True when `err` is SQLite rejecting an `ADD COLUMN` that already exists.
pub(crate) fn is_duplicate_column(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("duplicate column name"),
        _ => false,
    }
}
