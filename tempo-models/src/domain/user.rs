//! User response shape. The stored password hash never leaves the server.

use crate::entities::prelude::UserModel;
use sea_orm::entity::prelude::DateTimeUtc;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub first_name: String,
    pub email: String,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<UserModel> for UserInfo {
    fn from(m: UserModel) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            email: m.email,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
