//! Create User Use Case
//!
//! Registers a user and grants the default role in one gateway call.

use std::sync::Arc;

use platform::password::PasswordHasher;
use serde_json::Value;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, UserRecord};
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::{
    role_name::RoleName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::validation::validate_user_register;

/// Create user output
pub struct CreateUserOutput {
    /// Rows returned by the gateway
    pub users: Vec<UserRecord>,
    /// Roles granted during registration
    pub user_roles: Vec<RoleName>,
    /// Email of the created user
    pub email: String,
}

/// Create user use case
pub struct CreateUserUseCase<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
    hasher: PasswordHasher,
    config: Arc<AuthConfig>,
}

impl<G> CreateUserUseCase<G>
where
    G: ModelGateway,
{
    pub fn new(gateway: Arc<G>, hasher: PasswordHasher, config: Arc<AuthConfig>) -> Self {
        Self {
            gateway,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, payload: &Value) -> AuthResult<CreateUserOutput> {
        let valid = validate_user_register(payload)?;

        // Hash before anything reaches the gateway
        let raw_password = RawPassword::new(valid.text("password"));
        let password = UserPassword::hash_blocking(raw_password, self.hasher).await?;

        let new_user = NewUser {
            first_name: valid.text("first_name"),
            last_name: valid.text("last_name"),
            user_name: valid.text("user_name"),
            email: valid.text("email"),
            password,
        };

        let role = RoleName::new(self.config.default_role.as_str());
        let registration = self
            .gateway
            .create_user_with_permission(&new_user, &role)
            .await?;

        let users = registration.users;
        let user = users
            .first()
            .ok_or_else(|| AuthError::Internal("create_user returned no rows".to_string()))?;

        tracing::info!(
            user_id = %user.id,
            user_name = %user.user_name,
            role = %registration.permission.role,
            "User registered"
        );

        let email = user.email.clone();
        Ok(CreateUserOutput {
            users,
            user_roles: vec![registration.permission.role],
            email,
        })
    }
}
