pub(crate) mod auth;
pub(crate) mod cors;

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use tempo_models::domain::prelude::Claims;

/// Per-request context populated by the authentication middleware.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub grant: Option<Claims>,
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let mut ctx = RequestContext::default();
        if let Some(grant) = req.extensions().get::<Claims>().cloned() {
            ctx.grant = Some(grant);
        }
        ready(Ok(ctx))
    }
}
