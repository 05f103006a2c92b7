use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};
use uuid::Uuid;

use crate::auth::decode_token;
use crate::auth::jwt::extract_token;
use crate::config::JwtSettings;
use crate::errors::AppError;

/// Extractor that validates the bearer JWT and provides the authenticated user's ID.
///
/// Handlers taking this argument never run for an unauthenticated request;
/// the downstream services trust `user_id` without further checks.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let settings = match req.app_data::<web::Data<JwtSettings>>() {
            Some(settings) => settings,
            None => {
                return err(AppError::InternalError(
                    "JWT settings not configured".to_string(),
                ))
            }
        };

        let token = match extract_token(req) {
            Ok(t) => t,
            Err(e) => return err(e),
        };

        match decode_token(&token, settings.get_ref()) {
            Ok(claims) => ok(AuthenticatedUser {
                user_id: claims.sub,
            }),
            Err(e) => err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_access_token;
    use crate::auth::models::User;
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn settings() -> JwtSettings {
        JwtSettings::new("extractor_test_secret", 30)
    }

    #[actix_rt::test]
    async fn test_valid_token_yields_user_id() {
        let user = User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: String::new(),
            full_name: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let token = create_access_token(&user, &settings()).unwrap();

        let req = TestRequest::default()
            .app_data(web::Data::new(settings()))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();

        let auth = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(auth.user_id, user.id);
    }

    #[actix_rt::test]
    async fn test_missing_header_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(settings()))
            .to_http_request();

        let result = AuthenticatedUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[actix_rt::test]
    async fn test_missing_settings_is_internal_error() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer whatever"))
            .to_http_request();

        let result = AuthenticatedUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
