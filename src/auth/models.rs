use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for user registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    /// User's email address
    #[validate(email(message = "Email must be a valid address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (min 6 chars)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123")]
    pub password: String,
    /// Optional full name
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    #[schema(example = "Ana García")]
    pub full_name: Option<String>,
}

/// Response returned after a successful registration
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User created successfully")]
    pub message: &'static str,
    pub user_id: Uuid,
    #[schema(example = "user@example.com")]
    pub email: String,
}

impl RegisterResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            message: "User created successfully",
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// User information returned in responses
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponseDto {
    /// Unique user identifier
    pub id: Uuid,
    /// User's email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User's full name
    #[schema(example = "Ana García")]
    pub full_name: Option<String>,
    pub is_active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserResponseDto {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Request body for user login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginDto {
    /// User's email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User's password
    #[schema(example = "secret123")]
    pub password: String,
}

// ============================================================================
// Token Models
// ============================================================================

/// JWT access token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,     // User ID
    pub email: String, // User email
    pub iat: usize,    // Issued at
    pub exp: usize,    // Expiration
}

/// Response containing the bearer access token
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: &'static str,
    /// Access token expiry time in seconds
    #[schema(example = 1800)]
    pub expires_in: u64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expiry_minutes: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            expires_in: expiry_minutes.max(0) as u64 * 60,
        }
    }
}
