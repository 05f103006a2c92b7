use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Category, CreateCategoryDto, UpdateCategoryDto};
use crate::errors::AppError;

/// Service layer for category business logic. Every query is scoped by owner.
pub struct CategoryService;

impl CategoryService {
    pub async fn get_by_id(
        pool: &PgPool,
        category_id: Uuid,
        user_id: Uuid,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, category_type, created_at, updated_at
            FROM categories
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn get_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, user_id, name, category_type, created_at, updated_at
            FROM categories
            WHERE user_id = $1
            ORDER BY name ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    pub async fn create(
        pool: &PgPool,
        dto: &CreateCategoryDto,
        user_id: Uuid,
    ) -> Result<Category, AppError> {
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Name cannot be empty".to_string(),
            ));
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, category_type)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, category_type, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(dto.category_type.as_str())
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    pub async fn update(
        pool: &PgPool,
        category_id: Uuid,
        dto: &UpdateCategoryDto,
        user_id: Uuid,
    ) -> Result<Category, AppError> {
        let existing = Self::get_by_id(pool, category_id, user_id).await?;

        let new_name = match &dto.name {
            Some(n) => {
                let trimmed = n.trim().to_string();
                if trimmed.is_empty() {
                    return Err(AppError::ValidationError(
                        "Name cannot be empty".to_string(),
                    ));
                }
                trimmed
            }
            None => existing.name.clone(),
        };
        let new_type = dto.category_type.unwrap_or(existing.get_type());

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $3, category_type = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, category_type, created_at, updated_at
            "#,
        )
        .bind(category_id)
        .bind(user_id)
        .bind(&new_name)
        .bind(new_type.as_str())
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Delete a category; its transactions become uncategorized (ON DELETE SET NULL)
    pub async fn delete(pool: &PgPool, category_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(category_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        Ok(())
    }
}
