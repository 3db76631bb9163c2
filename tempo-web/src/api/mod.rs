//! Router module for handling all API routes

pub(crate) mod attribute;
pub(crate) mod auth;
pub(crate) mod project;
pub(crate) mod timesheet;

use actix_web::web;

/// Routes reachable without a bearer token.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    auth::configure_public_routes(cfg);
}

/// Routes behind the authentication middleware.
pub fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    auth::configure_protected_routes(cfg);
    cfg.service(web::scope(attribute::ROUTER_PREFIX).configure(attribute::configure_routes));
    cfg.service(web::scope(project::ROUTER_PREFIX).configure(project::configure_routes));
    cfg.service(web::scope(timesheet::ROUTER_PREFIX).configure(timesheet::configure_routes));
}
