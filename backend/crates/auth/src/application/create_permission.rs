//! Create Permission Use Case
//!
//! Grants a role to an existing user.

use std::sync::Arc;

use kernel::id::UserId;
use serde_json::Value;

use crate::domain::entity::permission::{NewPermission, PermissionRecord};
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::role_name::RoleName;
use crate::error::{AuthError, AuthResult};
use crate::validation::validate_user_permission;

pub struct CreatePermissionUseCase<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
}

impl<G> CreatePermissionUseCase<G>
where
    G: ModelGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, payload: &Value) -> AuthResult<PermissionRecord> {
        let valid = validate_user_permission(payload)?;
        let user_id = valid.integer("user_id").map_err(AuthError::Validation)?;

        let input = NewPermission {
            user_id: UserId::new(user_id),
            role: RoleName::new(valid.text("role")),
        };

        let permission = self.gateway.create_permission(&input).await?;

        tracing::info!(
            user_id = %permission.user_id,
            role = %permission.role,
            "Permission granted"
        );

        Ok(permission)
    }
}
