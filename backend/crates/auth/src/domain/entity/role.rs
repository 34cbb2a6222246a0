//! Role Record

use chrono::{DateTime, Utc};
use kernel::id::RoleId;
use serde::Serialize;

use crate::domain::value_object::role_name::RoleName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub role: RoleName,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub role: RoleName,
    pub description: String,
}
