use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::errors::AppError;

use super::jwt::{create_access_token, decode_token};
use super::models::{CreateUserDto, TokenResponse, User};
use super::password::{hash_password, verify_password};

const USER_COLUMNS: &str = "id, email, password_hash, full_name, is_active, created_at, updated_at";

/// Authentication service handling registration, login and identity lookup
pub struct AuthService;

impl AuthService {
    /// Register a new user
    pub async fn register(pool: &PgPool, dto: &CreateUserDto) -> Result<User, AppError> {
        let email = dto.email.trim().to_lowercase();

        let existing_user =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
                .bind(&email)
                .fetch_one(pool)
                .await?;

        if existing_user > 0 {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&email)
        .bind(&password_hash)
        .bind(&dto.full_name)
        .fetch_one(pool)
        .await?;

        info!(user_id = %user.id, "registered user");

        Ok(user)
    }

    /// Authenticate a user by email and password, return a bearer token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtSettings,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::Unauthorized("Incorrect email or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }

        let access_token = create_access_token(&user, jwt)?;

        Ok(TokenResponse::bearer(
            access_token,
            jwt.access_token_expiry_minutes,
        ))
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
    }

    /// Resolve a bearer credential to the active user it identifies.
    pub async fn current_user(
        pool: &PgPool,
        jwt: &JwtSettings,
        credential: &str,
    ) -> Result<User, AppError> {
        let claims = decode_token(credential, jwt)?;
        let user = Self::get_user_by_id(pool, claims.sub).await?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Inactive user".to_string()));
        }

        Ok(user)
    }
}
