use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::range::MonthRange;
use crate::errors::AppError;

/// Which transactions a sum covers, by the sign of their amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSign {
    /// `amount > 0`
    Positive,
    /// `amount < 0`
    Negative,
}

impl AmountSign {
    pub fn matches(&self, amount: Decimal) -> bool {
        match self {
            AmountSign::Positive => amount > Decimal::ZERO,
            AmountSign::Negative => amount < Decimal::ZERO,
        }
    }
}

/// One grouped row: the joined category name (`None` when uncategorized) and
/// the signed sum of its transactions.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CategorySum {
    pub category_name: Option<String>,
    pub total: Decimal,
}

/// Read-side aggregate queries the report engine needs.
///
/// Implementations filter by owner and by the inclusive date range inside the
/// query itself; callers never post-filter rows.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Signed sum of the owner's amounts matching `sign` within `range` (zero when none).
    async fn sum_amounts_where(
        &self,
        user_id: Uuid,
        range: MonthRange,
        sign: AmountSign,
    ) -> Result<Decimal, AppError>;

    /// Signed sum per category of the owner's transactions within `range`.
    async fn group_sum_by_category(
        &self,
        user_id: Uuid,
        range: MonthRange,
    ) -> Result<Vec<CategorySum>, AppError>;
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn sum_amounts_where(
        &self,
        user_id: Uuid,
        range: MonthRange,
        sign: AmountSign,
    ) -> Result<Decimal, AppError> {
        let sql = match sign {
            AmountSign::Positive => {
                r#"
                SELECT COALESCE(SUM(amount), 0)
                FROM transactions
                WHERE user_id = $1
                  AND tx_date BETWEEN $2 AND $3
                  AND amount > 0
                "#
            }
            AmountSign::Negative => {
                r#"
                SELECT COALESCE(SUM(amount), 0)
                FROM transactions
                WHERE user_id = $1
                  AND tx_date BETWEEN $2 AND $3
                  AND amount < 0
                "#
            }
        };

        let total = sqlx::query_scalar::<_, Decimal>(sql)
            .bind(user_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn group_sum_by_category(
        &self,
        user_id: Uuid,
        range: MonthRange,
    ) -> Result<Vec<CategorySum>, AppError> {
        // The join repeats the owner check so a dangling or foreign category
        // reference falls into the uncategorized group.
        let rows = sqlx::query_as::<_, CategorySum>(
            r#"
            SELECT c.name AS category_name, SUM(t.amount) AS total
            FROM transactions t
            LEFT JOIN categories c ON c.id = t.category_id AND c.user_id = t.user_id
            WHERE t.user_id = $1
              AND t.tx_date BETWEEN $2 AND $3
            GROUP BY c.name
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
