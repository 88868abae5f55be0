pub mod assignments;
pub mod auth;
pub mod courses;
pub mod documents;
pub mod health;
pub mod industry_ratings;
pub mod lectures;
pub mod mentorship;
pub mod progress;
pub mod tas;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
