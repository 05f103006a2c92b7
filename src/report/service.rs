use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::attribution::label_for;
use super::range::resolve_month_range;
use super::store::{AmountSign, CategorySum, TransactionStore};
use crate::errors::AppError;

/// Fractional digits of every monetary value in a report.
pub const MONEY_SCALE: u32 = 2;

/// Net total attributed to one category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub label: String,
    pub total: Decimal,
}

/// Derived monthly view for one user. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub total_income: Decimal,
    /// Magnitude of outflows; never negative.
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub by_category: Vec<CategoryTotal>,
}

/// Monthly report aggregation.
pub struct ReportService;

impl ReportService {
    /// Compute income, expense, balance and per-category totals for one month.
    ///
    /// Income and expense are classified by the sign of each amount, not by the
    /// category type. Either the whole report is returned or the first store
    /// error is propagated unchanged.
    pub async fn compute_month_report(
        store: &dyn TransactionStore,
        user_id: Uuid,
        year: i32,
        month: i32,
    ) -> Result<MonthlyReport, AppError> {
        let range = resolve_month_range(year, month)?;

        debug!(
            %user_id,
            year,
            month,
            start = %range.start,
            end = %range.end,
            "computing monthly report"
        );

        let (inflow, outflow, groups) = tokio::try_join!(
            store.sum_amounts_where(user_id, range, AmountSign::Positive),
            store.sum_amounts_where(user_id, range, AmountSign::Negative),
            store.group_sum_by_category(user_id, range),
        )?;

        let total_income = to_money(inflow);
        let total_expense = to_money(outflow.abs());
        let balance = to_money(total_income - total_expense);

        Ok(MonthlyReport {
            total_income,
            total_expense,
            balance,
            by_category: merge_by_label(groups),
        })
    }
}

/// Fold grouped rows into one row per label, sorted by label.
fn merge_by_label(groups: Vec<CategorySum>) -> Vec<CategoryTotal> {
    let mut rows: Vec<CategoryTotal> = Vec::with_capacity(groups.len());
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(groups.len());

    for group in groups {
        let label = label_for(group.category_name.as_deref());
        match positions.get(&label) {
            Some(&idx) => rows[idx].total += group.total,
            None => {
                positions.insert(label.clone(), rows.len());
                rows.push(CategoryTotal {
                    label,
                    total: group.total,
                });
            }
        }
    }

    for row in &mut rows {
        row.total = to_money(row.total);
    }
    rows.sort_by(|a, b| a.label.cmp(&b.label));
    rows
}

fn to_money(mut value: Decimal) -> Decimal {
    value.rescale(MONEY_SCALE);
    if value.is_zero() {
        // no "-0.00" in responses
        value.set_sign_positive(true);
    }
    value
}
