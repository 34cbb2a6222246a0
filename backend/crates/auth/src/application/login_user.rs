//! Login User Use Case
//!
//! Verifies credentials and collects the user's roles.
//!
//! An unknown user and a wrong password fail identically (`401
//! Unauthorized`), and both paths run one bcrypt comparison.

use std::sync::Arc;

use kernel::error::kind::ErrorKind;
use platform::password::PasswordHasher;
use serde_json::Value;

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::{
    role_name::RoleName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::validation::validate_auth;

/// Clear text hashed once per controller to produce the decoy digest
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Login output
pub struct LoginUserOutput {
    /// Rows matching the identifier
    pub users: Vec<UserRecord>,
    /// Roles from the user's permissions, in grant order
    pub user_roles: Vec<RoleName>,
    /// Email of the authenticated user
    pub email: String,
}

/// Build the digest compared against when no user matches
pub fn decoy_password(hasher: &PasswordHasher) -> AuthResult<UserPassword> {
    UserPassword::from_raw(&RawPassword::new(DECOY_PASSWORD), hasher)
}

/// Login use case
pub struct LoginUserUseCase<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
    hasher: PasswordHasher,
    decoy: Arc<UserPassword>,
}

impl<G> LoginUserUseCase<G>
where
    G: ModelGateway,
{
    pub fn new(gateway: Arc<G>, hasher: PasswordHasher, decoy: Arc<UserPassword>) -> Self {
        Self {
            gateway,
            hasher,
            decoy,
        }
    }

    pub async fn execute(&self, payload: &Value) -> AuthResult<LoginUserOutput> {
        let valid = validate_auth(payload)?;
        let identifier = valid.text("user_name");
        let raw_password = RawPassword::new(valid.text("password"));

        let users = match self
            .gateway
            .get_user_details_by_name_or_email(&identifier)
            .await
        {
            Ok(users) => users,
            Err(AuthError::Persistence(e)) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };

        let Some(user) = users.first() else {
            // burn the same bcrypt work as a real comparison
            self.decoy.verify_blocking(raw_password, self.hasher).await?;
            return Err(AuthError::Unauthorized);
        };

        let stored = UserPassword::from_stored(user.password_hash.as_str())?;
        if !stored.verify_blocking(raw_password, self.hasher).await? {
            return Err(AuthError::Unauthorized);
        }

        if stored.needs_rehash(&self.hasher) {
            tracing::info!(
                user_id = %user.id,
                "Stored password hash uses a different cost than configured"
            );
        }

        let user_id = user.id;
        let email = user.email.clone();

        let permissions = self.gateway.get_user_permission(user_id).await?;
        let user_roles = permissions.into_iter().map(|p| p.role).collect();

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(LoginUserOutput {
            users,
            user_roles,
            email,
        })
    }
}
