use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug)]
pub struct ProfileInsert {
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Moderation-surface view of an account.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ProfileAdminView {
    pub id: Uuid,
    pub username: Option<String>,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for PublicProfile {
    fn from(profile: Profile) -> Self {
        PublicProfile {
            id: profile.id,
            email: profile.email,
            username: profile.username,
            role: profile.role,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 60))]
    pub username: Option<String>,

    #[validate(
        length(min = 8, message = "Must be at least 8 characters"),
        custom(
            function = "validate_password_strength",
            message = "Must include uppercase, number, and symbol"
        )
    )]
    pub password: String,
}

impl NewUser {
    pub fn prepare_for_insert(&self, password_hash: String) -> ProfileInsert {
        ProfileInsert {
            email: self.email.clone(),
            username: self.username.clone(),
            password_hash,
            role: ROLE_USER.to_string(),
            is_disabled: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewUserResponse {
    pub id: Uuid,
    pub message: String,
}
