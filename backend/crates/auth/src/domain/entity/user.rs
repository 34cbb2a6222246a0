//! User Record
//!
//! Row owned by the model gateway. The core only asks for it to be created
//! or read.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

use crate::domain::entity::permission::PermissionRecord;
use crate::domain::value_object::user_password::UserPassword;

/// Persisted user
///
/// `password_hash` is never serialized, so a record can be returned in a
/// response payload as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Registration data handed to the gateway
///
/// The password is already hashed; there is no way to build one from clear
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: UserPassword,
}

/// Result of storing a user together with its first permission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub users: Vec<UserRecord>,
    pub permission: PermissionRecord,
}

impl UserRecord {
    /// True when `identifier` names this user by user name or email
    pub fn is_known_as(&self, identifier: &str) -> bool {
        self.user_name == identifier || self.email == identifier
    }
}
