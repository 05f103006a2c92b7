use actix_web::{get, post, web, HttpRequest, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::config::JwtSettings;
use crate::errors::{AppError, ErrorResponse};

use super::jwt::extract_token;
use super::models::{CreateUserDto, LoginDto, RegisterResponse, TokenResponse, UserResponseDto};
use super::service::AuthService;

/// POST /auth/register - Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
#[post("/auth/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    body: web::Json<CreateUserDto>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = AuthService::register(pool.get_ref(), &body).await?;

    Ok(HttpResponse::Created().json(RegisterResponse::from_user(&user)))
}

/// POST /auth/login - Authenticate and get an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Authenticated", body = TokenResponse),
        (status = 401, description = "Incorrect email or password", body = ErrorResponse)
    )
)]
#[post("/auth/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    jwt: web::Data<JwtSettings>,
    body: web::Json<LoginDto>,
) -> Result<HttpResponse, AppError> {
    let response =
        AuthService::login(pool.get_ref(), jwt.get_ref(), &body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /auth/me - Get current user info
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = UserResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/auth/me")]
pub async fn me(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    jwt: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let token = extract_token(&req)?;
    let user = AuthService::current_user(pool.get_ref(), jwt.get_ref(), &token).await?;

    Ok(HttpResponse::Ok().json(UserResponseDto::from_user(&user)))
}
