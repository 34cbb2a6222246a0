//! User Controller
//!
//! Entry points consumed by the HTTP layer. Every operation takes the raw
//! request payload and returns an [`Envelope`]; failures are logged and
//! converted at this boundary, so nothing here returns `Result`.

use std::sync::Arc;

use kernel::envelope::Envelope;
use platform::password::PasswordHasher;
use serde_json::Value;

use crate::application::config::AuthConfig;
use crate::application::login_user::decoy_password;
use crate::application::{
    CreatePermissionUseCase, CreateRoleUseCase, CreateUserTokenUseCase, CreateUserUseCase,
    FetchUserUseCase, LoginUserUseCase,
};
use crate::domain::entity::{permission::PermissionRecord, role::RoleRecord, user::UserRecord};
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::user_password::UserPassword;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::SessionMetadata;

const STATUS_OK: u16 = 200;

/// Envelope carrying user rows and the caller's roles
pub type SessionEnvelope = Envelope<Vec<UserRecord>, SessionMetadata>;

/// Shared controller state
///
/// Holds only immutable data; per-request state lives in each call.
pub struct UserController<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
    config: Arc<AuthConfig>,
    hasher: PasswordHasher,
    decoy: Arc<UserPassword>,
}

impl<G> Clone for UserController<G>
where
    G: ModelGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            config: self.config.clone(),
            hasher: self.hasher,
            decoy: self.decoy.clone(),
        }
    }
}

impl<G> UserController<G>
where
    G: ModelGateway,
{
    /// Build a controller; fails when the configured hash cost is invalid
    pub fn new(gateway: Arc<G>, config: Arc<AuthConfig>) -> AuthResult<Self> {
        let hasher = config
            .hasher()
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let decoy = Arc::new(decoy_password(&hasher)?);

        Ok(Self {
            gateway,
            config,
            hasher,
            decoy,
        })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Register a user and grant the default role
    pub async fn create_user(&self, payload: &Value) -> SessionEnvelope {
        let use_case =
            CreateUserUseCase::new(self.gateway.clone(), self.hasher, self.config.clone());

        match use_case.execute(payload).await {
            Ok(output) => Envelope::success(STATUS_OK, output.users).with_metadata(
                SessionMetadata {
                    user_roles: output.user_roles,
                    email: output.email,
                },
            ),
            Err(e) => e.into_envelope("create_user"),
        }
    }

    pub async fn fetch_user(&self, payload: &Value) -> Envelope<UserRecord> {
        let use_case = FetchUserUseCase::new(self.gateway.clone());

        match use_case.execute(payload).await {
            Ok(user) => Envelope::success(STATUS_OK, user),
            Err(e) => e.into_envelope("fetch_user"),
        }
    }

    // ========================================================================
    // Roles & Permissions
    // ========================================================================

    pub async fn create_user_permission(&self, payload: &Value) -> Envelope<PermissionRecord> {
        let use_case = CreatePermissionUseCase::new(self.gateway.clone());

        match use_case.execute(payload).await {
            Ok(permission) => Envelope::success(STATUS_OK, permission),
            Err(e) => e.into_envelope("create_user_permission"),
        }
    }

    pub async fn create_user_role(&self, payload: &Value) -> Envelope<RoleRecord> {
        let use_case = CreateRoleUseCase::new(self.gateway.clone());

        match use_case.execute(payload).await {
            Ok(role) => Envelope::success(STATUS_OK, role),
            Err(e) => e.into_envelope("create_user_role"),
        }
    }

    // ========================================================================
    // Login & Tokens
    // ========================================================================

    /// Verify credentials; unknown users and wrong passwords both yield 401
    pub async fn login_user(&self, payload: &Value) -> SessionEnvelope {
        let use_case =
            LoginUserUseCase::new(self.gateway.clone(), self.hasher, self.decoy.clone());

        match use_case.execute(payload).await {
            Ok(output) => Envelope::success(STATUS_OK, output.users).with_metadata(
                SessionMetadata {
                    user_roles: output.user_roles,
                    email: output.email,
                },
            ),
            Err(e) => e.into_envelope("login_user"),
        }
    }

    /// Always `501 Not Implemented`
    pub async fn create_user_token(&self, payload: &Value) -> Envelope<()> {
        match CreateUserTokenUseCase::new().execute(payload).await {
            Ok(()) => Envelope::success(STATUS_OK, ()),
            Err(e) => e.into_envelope(crate::application::create_token::OPERATION),
        }
    }
}
