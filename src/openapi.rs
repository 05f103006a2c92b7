use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::models::{
    CreateUserDto, LoginDto, RegisterResponse, TokenResponse, UserResponseDto,
};
use crate::category::models::{
    CategoryResponse, CategoryType, CreateCategoryDto, UpdateCategoryDto,
};
use crate::errors::ErrorResponse;
use crate::report::models::{CategoryReportResponse, MonthReportResponse};
use crate::transaction::models::{
    CreateTransactionDto, TransactionResponse, UpdateTransactionDto,
};

/// Security scheme modifier for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT access token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finance Tracker API",
        version = "1.0.0",
        description = "Personal income/expense tracking with monthly reports"
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Auth", description = "Registration, login and current user"),
        (name = "Categories", description = "User-owned income/expense categories"),
        (name = "Transactions", description = "Signed money movements"),
        (name = "Reports", description = "Monthly income/expense aggregation")
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::me,
        crate::category::handlers::list_categories,
        crate::category::handlers::get_category,
        crate::category::handlers::create_category,
        crate::category::handlers::update_category,
        crate::category::handlers::delete_category,
        crate::transaction::handlers::list_transactions,
        crate::transaction::handlers::get_transaction,
        crate::transaction::handlers::create_transaction,
        crate::transaction::handlers::update_transaction,
        crate::transaction::handlers::delete_transaction,
        crate::report::handlers::month_report,
    ),
    components(
        schemas(
            ErrorResponse,
            // Auth schemas
            CreateUserDto,
            LoginDto,
            RegisterResponse,
            TokenResponse,
            UserResponseDto,
            // Category schemas
            CategoryType,
            CategoryResponse,
            CreateCategoryDto,
            UpdateCategoryDto,
            // Transaction schemas
            TransactionResponse,
            CreateTransactionDto,
            UpdateTransactionDto,
            // Report schemas
            MonthReportResponse,
            CategoryReportResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
