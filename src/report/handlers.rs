use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;

use super::models::{MonthReportQuery, MonthReportResponse};
use super::service::ReportService;
use super::store::TransactionStore;

/// GET /budgets/reports/month - Income, expense, balance and category breakdown for a month
#[utoipa::path(
    get,
    path = "/api/v1/budgets/reports/month",
    tag = "Reports",
    params(MonthReportQuery),
    responses(
        (status = 200, description = "Monthly report", body = MonthReportResponse),
        (status = 400, description = "Invalid year/month", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Data store unavailable", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/budgets/reports/month")]
pub async fn month_report(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    query: web::Query<MonthReportQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::InvalidRange(e.to_string()))?;

    let report =
        ReportService::compute_month_report(store.get_ref(), auth.user_id, query.year, query.month)
            .await?;

    Ok(HttpResponse::Ok().json(MonthReportResponse::from(report)))
}
