// crates/db/src/queries/categories.rs
//! Category CRUD queries and category reference checks.

use timesheet_core::{validate_category, Category, CategoryRequest, DbId};
use tracing::info;

use super::row_types::{CategoryRow, CATEGORY_COLUMNS};
use crate::{Database, DbError, DbResult};

/// Map a UNIQUE(name) violation to a domain error; pass anything else through.
fn map_unique_name(err: sqlx::Error, name: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::DuplicateCategory(name.to_string())
        }
        _ => DbError::Sqlx(err),
    }
}

impl Database {
    /// Fail with [`DbError::UnknownCategory`] unless a category has exactly this name.
    ///
    /// Matching is exact: no trimming, case-sensitive.
    pub async fn ensure_category_exists(&self, name: &str) -> DbResult<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?)")
                .bind(name)
                .fetch_one(self.pool())
                .await?;
        if exists {
            Ok(())
        } else {
            Err(DbError::UnknownCategory(name.to_string()))
        }
    }

    /// Fail with [`DbError::UnknownCategoryId`] unless a category has this id.
    pub async fn ensure_category_id_exists(&self, id: DbId) -> DbResult<()> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)")
                .bind(id)
                .fetch_one(self.pool())
                .await?;
        if exists {
            Ok(())
        } else {
            Err(DbError::UnknownCategoryId(id))
        }
    }

    /// All categories, ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name, id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    pub async fn get_category(&self, id: DbId) -> DbResult<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(CategoryRow::into_category))
    }

    pub async fn create_category(&self, req: &CategoryRequest) -> DbResult<Category> {
        let category = validate_category(req)?;

        let row: CategoryRow = sqlx::query_as(&format!(
            "INSERT INTO categories (name, color) VALUES (?, ?) RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&category.name)
        .bind(&category.color)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_unique_name(e, &category.name))?;

        let created = row.into_category();
        info!(id = created.id, name = %created.name, "Category created");
        Ok(created)
    }

    /// Replace a category's name and color.
    ///
    /// Time entries reference categories by name and are not rewritten.
    pub async fn update_category(&self, id: DbId, req: &CategoryRequest) -> DbResult<Category> {
        let category = validate_category(req)?;

        let row: Option<CategoryRow> = sqlx::query_as(&format!(
            "UPDATE categories SET name = ?, color = ? WHERE id = ? RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&category.name)
        .bind(&category.color)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_unique_name(e, &category.name))?;

        let updated = row
            .ok_or(DbError::NotFound {
                entity: "category",
                id,
            })?
            .into_category();
        info!(id, name = %updated.name, "Category updated");
        Ok(updated)
    }

    /// Delete a category. Tasks pointing at it fall back to no category.
    pub async fn delete_category(&self, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "category",
                id,
            });
        }
        info!(id, "Category deleted");
        Ok(())
    }
}
