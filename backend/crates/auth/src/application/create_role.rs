//! Create Role Use Case

use std::sync::Arc;

use serde_json::Value;

use crate::domain::entity::role::{NewRole, RoleRecord};
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::role_name::RoleName;
use crate::error::AuthResult;
use crate::validation::validate_user_role;

pub struct CreateRoleUseCase<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
}

impl<G> CreateRoleUseCase<G>
where
    G: ModelGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, payload: &Value) -> AuthResult<RoleRecord> {
        let valid = validate_user_role(payload)?;

        let input = NewRole {
            role: RoleName::new(valid.text("role")),
            description: valid.text("description"),
        };

        let role = self.gateway.create_user_role(&input).await?;
        tracing::info!(role = %role.role, "Role created");

        Ok(role)
    }
}
