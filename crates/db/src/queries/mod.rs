// crates/db/src/queries/mod.rs
// CRUD operations for the timesheet SQLite database.

mod categories;
mod entries;
pub(crate) mod row_types;
mod tasks;
