//! Permission Record
//!
//! A grant linking a user to a role.

use chrono::{DateTime, Utc};
use kernel::id::{PermissionId, UserId};
use serde::Serialize;

use crate::domain::value_object::role_name::RoleName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub user_id: UserId,
    pub role: RoleName,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    pub user_id: UserId,
    pub role: RoleName,
}
