use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::service::{CategoryTotal, MonthlyReport};

/// Query parameters for the monthly report
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct MonthReportQuery {
    /// Calendar year
    #[param(example = 2024)]
    pub year: i32,
    /// Calendar month (1-12)
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[param(example = 5)]
    pub month: i32,
}

/// Net total for one category label
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryReportResponse {
    /// Category name, or "Otros" for uncategorized transactions
    #[schema(example = "Food")]
    pub category: String,
    /// Signed sum of the category's transactions
    #[schema(value_type = String, example = "-40.00")]
    pub total: Decimal,
}

impl From<CategoryTotal> for CategoryReportResponse {
    fn from(row: CategoryTotal) -> Self {
        Self {
            category: row.label,
            total: row.total,
        }
    }
}

/// Monthly income/expense report
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthReportResponse {
    /// Sum of positive amounts
    #[schema(value_type = String, example = "100.00")]
    pub income: Decimal,
    /// Magnitude of the sum of negative amounts
    #[schema(value_type = String, example = "50.00")]
    pub expense: Decimal,
    /// income - expense
    #[schema(value_type = String, example = "50.00")]
    pub balance: Decimal,
    pub by_category: Vec<CategoryReportResponse>,
}

impl From<MonthlyReport> for MonthReportResponse {
    fn from(report: MonthlyReport) -> Self {
        Self {
            income: report.total_income,
            expense: report.total_expense,
            balance: report.balance,
            by_category: report.by_category.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_month_validation() {
        assert!(MonthReportQuery { year: 2024, month: 12 }.validate().is_ok());
        assert!(MonthReportQuery { year: 2024, month: 0 }.validate().is_err());
        assert!(MonthReportQuery { year: 2024, month: 13 }.validate().is_err());
    }

    #[test]
    fn test_response_wire_format() {
        let response = MonthReportResponse::from(MonthlyReport {
            total_income: Decimal::new(10000, 2),
            total_expense: Decimal::new(5000, 2),
            balance: Decimal::new(5000, 2),
            by_category: vec![CategoryTotal {
                label: "Food".to_string(),
                total: Decimal::new(-4000, 2),
            }],
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "income": "100.00",
                "expense": "50.00",
                "balance": "50.00",
                "byCategory": [{"category": "Food", "total": "-40.00"}]
            })
        );
    }
}
