use serde::{Deserialize, Serialize};

/// Path segment `{id}` shared by detail/update/delete routes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PathId {
    pub id: i32,
}

/// Plain success message body (delete and logout responses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
