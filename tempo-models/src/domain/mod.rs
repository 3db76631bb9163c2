pub mod attribute;
pub mod auth;
pub mod common;
pub mod filter;
pub mod prelude;
pub mod project;
pub mod timesheet;
pub mod user;
