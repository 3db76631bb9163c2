pub use super::attribute::{
    AttributeInfo, AttributeValueInfo, AttributeWithValues, NewAttribute, UpdateAttribute,
};
pub use super::auth::{AuthResponse, Claims, LoginRequest, RegisterRequest};
pub use super::common::{MessageResponse, PathId};
pub use super::filter::{FilterClause, FilterOperator, ProjectListParams};
pub use super::project::{
    AttributeEntry, NewProject, ProjectInfo, ProjectSummary, UpdateProject,
};
pub use super::timesheet::{NewTimesheet, TimesheetInfo, UpdateTimesheet};
pub use super::user::UserInfo;
