pub mod attribute;
pub mod attribute_value;
pub mod prelude;
pub mod project;
pub mod timesheet;
pub mod user;
