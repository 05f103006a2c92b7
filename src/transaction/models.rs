use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::AppError;
use crate::report::range::{resolve_month_range, MonthRange};

/// Exclusive bound on |amount| imposed by NUMERIC(10,2)
const AMOUNT_LIMIT: i64 = 100_000_000;

/// Signed amounts: positive is inflow, negative is outflow, zero is rejected.
fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_zero() {
        return Err(ValidationError::new("amount_must_be_non_zero"));
    }
    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new("amount_too_precise"));
    }
    if amount.abs() >= Decimal::from(AMOUNT_LIMIT) {
        return Err(ValidationError::new("amount_out_of_range"));
    }
    Ok(())
}

/// Distinguishes an absent field from an explicit `null`
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Database model for transactions
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub amount: Decimal,
    pub tx_date: NaiveDate,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transaction information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Category, or null when uncategorized
    pub category_id: Option<Uuid>,
    /// Signed amount: positive inflow, negative outflow
    #[schema(value_type = String, example = "-12.50")]
    pub amount: Decimal,
    #[schema(example = "2024-02-29")]
    pub tx_date: NaiveDate,
    #[schema(example = "Weekly groceries")]
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            category_id: t.category_id,
            amount: t.amount,
            tx_date: t.tx_date,
            note: t.note,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Request body for creating a transaction
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionDto {
    /// Signed amount with at most two decimals
    #[validate(custom(
        function = "validate_amount",
        message = "Amount must be non-zero with at most 2 decimals and below 100000000"
    ))]
    #[schema(value_type = String, example = "-12.50")]
    pub amount: Decimal,

    #[schema(example = "2024-02-29")]
    pub tx_date: NaiveDate,

    #[validate(length(max = 500, message = "Note cannot exceed 500 characters"))]
    #[serde(default)]
    pub note: Option<String>,

    /// Must belong to the caller when present
    pub category_id: Option<Uuid>,
}

/// Request body for updating a transaction (PATCH - all fields optional)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTransactionDto {
    #[validate(custom(
        function = "validate_amount",
        message = "Amount must be non-zero with at most 2 decimals and below 100000000"
    ))]
    #[schema(value_type = Option<String>, example = "-20.00")]
    pub amount: Option<Decimal>,

    pub tx_date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Note cannot exceed 500 characters"))]
    pub note: Option<String>,

    /// Use null to make the transaction uncategorized
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
}

/// Query parameters for listing transactions
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TransactionListQuery {
    /// Calendar year; requires `month`
    #[param(example = 2024)]
    pub year: Option<i32>,
    /// Month 1-12; requires `year`
    #[param(example = 2)]
    pub month: Option<i32>,
}

impl TransactionListQuery {
    /// The month to filter by, if any
    pub fn month_range(&self) -> Result<Option<MonthRange>, AppError> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => resolve_month_range(year, month).map(Some),
            (None, None) => Ok(None),
            _ => Err(AppError::ValidationError(
                "year and month must be provided together".to_string(),
            )),
        }
    }
}

/// Path parameters for transaction ID
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionIdPath {
    /// Transaction UUID
    pub id: Uuid,
}
