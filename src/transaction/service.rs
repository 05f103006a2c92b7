use sqlx::{PgPool, Postgres};
use tracing::info;
use uuid::Uuid;

use super::models::{CreateTransactionDto, Transaction, UpdateTransactionDto};
use crate::errors::AppError;
use crate::report::range::MonthRange;

pub struct TransactionService;

const TRANSACTION_COLUMNS: &str =
    "id, user_id, category_id, amount, tx_date, note, created_at, updated_at";

impl TransactionService {
    /// Fails with NotFound unless `category_id` belongs to `user_id`
    async fn ensure_category_owned<'e, E>(
        executor: E,
        category_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND user_id = $2)",
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        if !owned {
            return Err(AppError::NotFound("Category not found".to_string()));
        }
        Ok(())
    }

    /// Create a transaction. The category check and insert share one database transaction.
    pub async fn create_transaction(
        pool: &PgPool,
        user_id: Uuid,
        dto: &CreateTransactionDto,
    ) -> Result<Transaction, AppError> {
        let mut tx = pool.begin().await?;

        if let Some(category_id) = dto.category_id {
            Self::ensure_category_owned(&mut *tx, category_id, user_id).await?;
        }

        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (user_id, category_id, amount, tx_date, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(dto.category_id)
        .bind(dto.amount)
        .bind(dto.tx_date)
        .bind(dto.note.as_deref().unwrap_or(""))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(transaction_id = %transaction.id, %user_id, "Transaction created");
        Ok(transaction)
    }

    pub async fn get_transaction(
        pool: &PgPool,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<Transaction, AppError> {
        sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1 AND user_id = $2"
        ))
        .bind(transaction_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    /// List the caller's transactions, newest first, optionally within one month
    pub async fn list_transactions(
        pool: &PgPool,
        user_id: Uuid,
        range: Option<MonthRange>,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1
              AND ($2::date IS NULL OR tx_date >= $2)
              AND ($3::date IS NULL OR tx_date <= $3)
            ORDER BY tx_date DESC, created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(range.map(|r| r.start))
        .bind(range.map(|r| r.end))
        .fetch_all(pool)
        .await?;

        Ok(transactions)
    }

    /// Apply a partial update. An explicit null `category_id` clears the category.
    pub async fn update_transaction(
        pool: &PgPool,
        user_id: Uuid,
        transaction_id: Uuid,
        dto: &UpdateTransactionDto,
    ) -> Result<Transaction, AppError> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#
        ))
        .bind(transaction_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        let category_id = match dto.category_id {
            Some(Some(category_id)) => {
                Self::ensure_category_owned(&mut *tx, category_id, user_id).await?;
                Some(category_id)
            }
            Some(None) => None,
            None => existing.category_id,
        };
        let amount = dto.amount.unwrap_or(existing.amount);
        let tx_date = dto.tx_date.unwrap_or(existing.tx_date);
        let note = dto.note.as_deref().unwrap_or(&existing.note);

        let updated = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions
            SET category_id = $3, amount = $4, tx_date = $5, note = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction_id)
        .bind(user_id)
        .bind(category_id)
        .bind(amount)
        .bind(tx_date)
        .bind(note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    pub async fn delete_transaction(
        pool: &PgPool,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(transaction_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        info!(%transaction_id, %user_id, "Transaction deleted");
        Ok(())
    }
}
