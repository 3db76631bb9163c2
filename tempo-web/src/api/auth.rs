//! Registration, login and current-user endpoints

use crate::{middleware::RequestContext, AppState};
use actix_web::{web, HttpResponse};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tempo_error::{web::WebError, WebResult};
use tempo_models::{
    domain::prelude::{
        AuthResponse, Claims, LoginRequest, MessageResponse, RegisterRequest, UserInfo,
    },
    entities::prelude::{UserActiveModel, UserModel},
};
use tempo_repository::UserRepository;
use tempo_utils::{
    hash::{bcrypt_check, bcrypt_hash},
    jwt::encode_jwt,
};
use validator::Validate;

/// Configure public authentication routes
///
/// # Routes
/// - POST `/register`: Create an account and issue a token
/// - POST `/login`: Issue a token for existing credentials
pub(crate) fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}

/// Configure authenticated session routes
///
/// # Routes
/// - POST `/logout`: End the session
/// - GET `/user`: Return the authenticated principal
pub(crate) fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/logout", web::post().to(logout))
        .route("/user", web::get().to(user));
}

/// Register endpoint
///
/// # Endpoint
/// `POST /register`
///
/// # Description
/// Creates a new account and returns the user with a fresh bearer token
async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> WebResult<HttpResponse> {
    let body = req.into_inner();
    body.validate()?;
    let first_name = body.first_name.unwrap();
    let email = body.email.unwrap();
    let password = body.password.unwrap();

    if UserRepository::find_by_email(&email, None::<&DatabaseConnection>)
        .await?
        .is_some()
    {
        return Err(WebError::field(
            "email",
            "The email has already been taken.",
        ));
    }

    let user = UserRepository::create(
        UserActiveModel {
            first_name: Set(first_name),
            email: Set(email),
            password: Set(bcrypt_hash(&password)),
            ..Default::default()
        },
        None::<&DatabaseConnection>,
    )
    .await
    .map_err(|e| WebError::persistence("Failed to register user", e))?;

    let (token, expires_in) = issue_token(&state, &user)?;
    Ok(HttpResponse::Created().json(AuthResponse {
        user: user.into(),
        token,
        expires_in,
    }))
}

/// Login endpoint
///
/// # Endpoint
/// `POST /login`
///
/// # Description
/// Verifies credentials and returns the user with a fresh bearer token
async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> WebResult<HttpResponse> {
    let body = req.into_inner();
    body.validate()?;
    let email = body.email.unwrap();
    let password = body.password.unwrap();

    let user = match UserRepository::find_by_email(&email, None::<&DatabaseConnection>).await? {
        Some(user) => user,
        None => return Err(WebError::Unauthorized),
    };

    if !bcrypt_check(&password, &user.password) {
        return Err(WebError::Unauthorized);
    }

    let (token, expires_in) = issue_token(&state, &user)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        user: user.into(),
        token,
        expires_in,
    }))
}

/// Logout endpoint
///
/// # Endpoint
/// `POST /logout`
///
/// # Description
/// Tokens are stateless, so logout is an acknowledgement for clients to
/// discard theirs
async fn logout(_ctx: RequestContext) -> WebResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")))
}

/// Current user endpoint
///
/// # Endpoint
/// `GET /user`
///
/// # Description
/// Returns the authenticated principal, never including the password hash
async fn user(ctx: RequestContext) -> WebResult<HttpResponse> {
    let grant = ctx.grant.ok_or(WebError::Unauthorized)?;
    let user_id = grant
        .user_id
        .parse::<i32>()
        .map_err(|_| WebError::Unauthorized)?;

    let user = UserRepository::find_by_id(user_id, None::<&DatabaseConnection>)
        .await?
        .ok_or(WebError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserInfo::from(user)))
}

fn issue_token(state: &AppState, user: &UserModel) -> WebResult<(String, i64)> {
    let jwt = &state.settings.web.jwt;
    let claims = Claims::new(
        jwt.issuer.clone(),
        None,
        user.id.to_string(),
        user.email.clone(),
        jwt.expire,
    );
    let token = encode_jwt(&claims, jwt.secret.as_bytes(), None)
        .map_err(|_| WebError::InternalError("Failed to encode JWT".to_string()))?;
    Ok((token, jwt.expire))
}
