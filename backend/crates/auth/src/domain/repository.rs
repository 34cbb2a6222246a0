//! Model Gateway Trait
//!
//! Interface to the persistence layer. Implementations live in the
//! infrastructure layer and own their own locking and constraint checks.

use kernel::id::UserId;

use crate::domain::entity::{
    permission::{NewPermission, PermissionRecord},
    role::{NewRole, RoleRecord},
    user::{NewUser, Registration, UserRecord},
};
use crate::domain::value_object::role_name::RoleName;
use crate::error::AuthResult;

/// User / permission / role persistence
///
/// Errors are returned as [`AuthError::Persistence`](crate::error::AuthError)
/// and reach the caller with their status and message unchanged.
#[trait_variant::make(ModelGateway: Send)]
pub trait LocalModelGateway {
    /// Insert a user; returns the created row(s)
    ///
    /// Fails with `409 Conflict` when the user name or email is taken.
    async fn create_user(&self, input: &NewUser) -> AuthResult<Vec<UserRecord>>;

    /// Insert a user and grant `role` to it as one unit
    ///
    /// Either both rows are stored or neither is; a failed grant leaves no
    /// user behind.
    async fn create_user_with_permission(
        &self,
        input: &NewUser,
        role: &RoleName,
    ) -> AuthResult<Registration>;

    /// Grant a role to a user
    async fn create_permission(&self, input: &NewPermission) -> AuthResult<PermissionRecord>;

    /// Define a new role
    async fn create_user_role(&self, input: &NewRole) -> AuthResult<RoleRecord>;

    /// Read a user by id; `404 Not Found` when absent
    async fn get_details_by_id(&self, id: UserId) -> AuthResult<UserRecord>;

    /// Users whose user name or email equals `identifier`; empty when none
    async fn get_user_details_by_name_or_email(
        &self,
        identifier: &str,
    ) -> AuthResult<Vec<UserRecord>>;

    /// Permissions granted to a user, oldest first
    async fn get_user_permission(&self, user_id: UserId) -> AuthResult<Vec<PermissionRecord>>;
}
