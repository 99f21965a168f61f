use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::timestamp::format_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of a user. The password hash has no field here.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "User")]
pub struct UserDto {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            created_at: format_timestamp(&user.created_at),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto::from(&user)
    }
}

/// Token plus the user it was issued for, returned by register and login.
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserDto,
}
