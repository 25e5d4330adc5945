//! User-related DTOs for API requests and responses.

use crate::models::{NewUser, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Body of the identity provider's `user.created` webhook.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "id must not be empty"))]
    #[schema(example = "user_2abc")]
    pub id: String,
    #[validate(length(min = 1, message = "clerkId must not be empty"))]
    #[schema(example = "user_2abc")]
    pub clerk_id: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email", example = "ada@example.com")]
    pub email: String,
}

impl SignUpRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            id: self.id,
            clerk_id: self.clerk_id,
            email: self.email,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub clerk_id: String,
    pub email: String,
    /// RFC 3339 timestamp.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            clerk_id: user.clerk_id,
            email: user.email,
            created_at: user.created_at.to_jiff().to_string(),
        }
    }
}
