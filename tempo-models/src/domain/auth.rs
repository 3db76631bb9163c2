//! Authentication request/response shapes and JWT claims.

use super::user::UserInfo;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "The first_name field is required."),
        length(max = 255, message = "The first_name may not be greater than 255 characters.")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password must be at least 8 characters.")
    )]
    pub password: Option<String>,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(required(message = "The password field is required."))]
    pub password: Option<String>,
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub jti: String,
    pub sub: String,
    pub iss: String,
    pub aud: Option<Vec<String>>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub user_id: String,
    pub email: String,
    pub access_token_expire: i64,
}

impl Claims {
    pub fn new(
        iss: String,
        aud: Option<Vec<String>>,
        user_id: String,
        email: String,
        access_token_expire: i64,
    ) -> Self {
        let jti = Uuid::new_v4().into();
        let now = Utc::now();
        Self {
            jti,
            sub: user_id.clone(),
            iss,
            aud,
            exp: now.timestamp() + access_token_expire,
            nbf: now.timestamp(),
            iat: now.timestamp(),
            user_id,
            email,
            access_token_expire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_short_password_and_bad_email() {
        let body: RegisterRequest = serde_json::from_str(
            r#"{"first_name":"jane","email":"not-an-email","password":"short"}"#,
        )
        .unwrap();
        let errs = body.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("email"));
        assert!(errs.field_errors().contains_key("password"));
    }

    #[test]
    fn claims_window_covers_requested_lifetime() {
        let claims = Claims::new(
            "tempo".into(),
            None,
            "1".into(),
            "test@example.com".into(),
            86400,
        );
        assert_eq!(claims.exp - claims.iat, 86400);
        assert_eq!(claims.sub, claims.user_id);
        assert!(!claims.jti.is_empty());
    }
}
