use sea_orm::DatabaseConnection;
use tempo_error::storage::StorageError;

pub mod attribute;
pub mod attribute_value;
pub mod project;
pub mod timesheet;
pub mod user;

pub use attribute::AttributeRepository;
pub use attribute_value::AttributeValueRepository;
pub use project::ProjectRepository;
pub use timesheet::TimesheetRepository;
pub use user::UserRepository;

#[inline]
pub async fn get_db_connection() -> Result<DatabaseConnection, StorageError> {
    tempo_storage::connection()
}
