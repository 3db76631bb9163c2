//! Authentication middleware for handling bearer token authentication.
//! Validates bearer tokens and attaches the decoded claims to requests.

use crate::AppState;
use actix_service::{Service, Transform};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{header::AUTHORIZATION, Method},
    web::Data,
    Error, HttpMessage, HttpResponse,
};
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use jsonwebtoken::{Algorithm, Validation};
use serde_json::json;
use std::{
    cell::RefCell,
    rc::Rc,
    task::{Context, Poll},
};
use tempo_models::{constants::BEARER_TOKEN, domain::prelude::Claims, settings::Jwt};
use tempo_utils::jwt::decode_jwt;

/// Authentication middleware factory.
///
/// Implements the `Transform` trait to wrap services into authenticated
/// services.
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware {
            service: Rc::new(RefCell::new(service)),
        })
    }
}

/// Authentication middleware implementation.
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Decodes and validates the token against the configured secret/issuer
/// 3. Attaches the decoded claims to the request extensions
/// 4. Rejects the request with 401 when any step fails
pub struct AuthenticationMiddleware<S> {
    service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        async move {
            // Fast path for OPTIONS requests
            if Method::OPTIONS == req.method() {
                return srv.call(req).await.map(|res| res.map_into_left_body());
            }

            let token = match extract_bearer_token(&req) {
                Some(token) => token.to_owned(),
                None => return Ok(unauthenticated(req)),
            };

            let jwt = match req.app_data::<Data<AppState>>() {
                Some(state) => state.settings.web.jwt.clone(),
                None => return Ok(unauthenticated(req)),
            };

            let mut validation = Validation::new(Algorithm::HS256);
            validation.validate_aud = false;
            validation.set_issuer(&[&jwt.issuer]);

            let claims = match decode_token(&token, &jwt, validation) {
                Some(claims) => claims,
                None => return Ok(unauthenticated(req)),
            };

            req.extensions_mut().insert(claims);

            srv.call(req).await.map(|res| res.map_into_left_body())
        }
        .boxed_local()
    }
}

#[inline]
fn decode_token(token: &str, jwt: &Jwt, validation: Validation) -> Option<Claims> {
    decode_jwt::<Claims>(token, jwt.secret.as_bytes(), Some(validation))
        .ok()
        .map(|td| td.claims)
}

#[inline]
fn unauthenticated<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(HttpResponse::Unauthorized().json(json!({
        "message": "Unauthenticated"
    })))
    .map_into_right_body()
}

/// Extracts the bearer token from the request headers.
#[inline]
fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN)
        .map(str::trim)
}
