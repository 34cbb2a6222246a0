//! In-Memory Model Gateway
//!
//! Table-per-`Vec` storage behind a `tokio::sync::RwLock`. Enforces the same
//! unique constraints as the PostgreSQL schema and reports violations with
//! the same status and message.

use chrono::Utc;
use kernel::error::app_error::{AppError, OptionExt};
use kernel::id::{PermissionId, RoleId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{
    permission::{NewPermission, PermissionRecord},
    role::{NewRole, RoleRecord},
    user::{NewUser, Registration, UserRecord},
};
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::role_name::RoleName;
use crate::error::AuthResult;

const DUPLICATE_KEY: &str = "Duplicate key value";

#[derive(Default)]
struct Tables {
    users: Vec<UserRecord>,
    roles: Vec<RoleRecord>,
    permissions: Vec<PermissionRecord>,
}

impl Tables {
    fn next_user_id(&self) -> UserId {
        UserId::new(self.users.len() as i64 + 1)
    }

    fn next_role_id(&self) -> RoleId {
        RoleId::new(self.roles.len() as i64 + 1)
    }

    fn next_permission_id(&self) -> PermissionId {
        PermissionId::new(self.permissions.len() as i64 + 1)
    }

    fn insert_user(&mut self, input: &NewUser) -> AuthResult<UserRecord> {
        let taken = self
            .users
            .iter()
            .any(|u| u.user_name == input.user_name || u.email == input.email);
        if taken {
            return Err(AppError::conflict(DUPLICATE_KEY).into());
        }

        let record = UserRecord {
            id: self.next_user_id(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            user_name: input.user_name.clone(),
            email: input.email.clone(),
            password_hash: input.password.as_str().to_string(),
            created_at: Utc::now(),
        };
        self.users.push(record.clone());

        Ok(record)
    }

    fn insert_permission(&mut self, input: &NewPermission) -> AuthResult<PermissionRecord> {
        // foreign key on users
        if !self.users.iter().any(|u| u.id == input.user_id) {
            return Err(AppError::conflict("Referenced record does not exist").into());
        }

        let record = PermissionRecord {
            id: self.next_permission_id(),
            user_id: input.user_id,
            role: input.role.clone(),
            created_at: Utc::now(),
        };
        self.permissions.push(record.clone());

        Ok(record)
    }
}

/// Model gateway for tests and local wiring
#[derive(Default)]
pub struct InMemoryModelGateway {
    tables: RwLock<Tables>,
}

impl InMemoryModelGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway seeded with the `customer` role, like a migrated database
    pub async fn seeded() -> Self {
        let gateway = Self::new();
        {
            let mut tables = gateway.tables.write().await;
            let id = tables.next_role_id();
            tables.roles.push(RoleRecord {
                id,
                role: RoleName::customer(),
                description: "Default role granted at registration".to_string(),
                created_at: Utc::now(),
            });
        }
        gateway
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

impl ModelGateway for InMemoryModelGateway {
    async fn create_user(&self, input: &NewUser) -> AuthResult<Vec<UserRecord>> {
        let mut tables = self.tables.write().await;
        let record = tables.insert_user(input)?;

        Ok(vec![record])
    }

    async fn create_user_with_permission(
        &self,
        input: &NewUser,
        role: &RoleName,
    ) -> AuthResult<Registration> {
        // one write guard covers both inserts
        let mut tables = self.tables.write().await;
        let user = tables.insert_user(input)?;
        let permission = tables.insert_permission(&NewPermission {
            user_id: user.id,
            role: role.clone(),
        })?;

        Ok(Registration {
            users: vec![user],
            permission,
        })
    }

    async fn create_permission(&self, input: &NewPermission) -> AuthResult<PermissionRecord> {
        let mut tables = self.tables.write().await;
        tables.insert_permission(input)
    }

    async fn create_user_role(&self, input: &NewRole) -> AuthResult<RoleRecord> {
        let mut tables = self.tables.write().await;

        if tables.roles.iter().any(|r| r.role == input.role) {
            return Err(AppError::conflict(DUPLICATE_KEY).into());
        }

        let record = RoleRecord {
            id: tables.next_role_id(),
            role: input.role.clone(),
            description: input.description.clone(),
            created_at: Utc::now(),
        };
        tables.roles.push(record.clone());

        Ok(record)
    }

    async fn get_details_by_id(&self, id: UserId) -> AuthResult<UserRecord> {
        let tables = self.tables.read().await;

        let user = tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_not_found("User not found")?;

        Ok(user)
    }

    async fn get_user_details_by_name_or_email(
        &self,
        identifier: &str,
    ) -> AuthResult<Vec<UserRecord>> {
        let tables = self.tables.read().await;

        Ok(tables
            .users
            .iter()
            .filter(|u| u.is_known_as(identifier))
            .cloned()
            .collect())
    }

    async fn get_user_permission(&self, user_id: UserId) -> AuthResult<Vec<PermissionRecord>> {
        let tables = self.tables.read().await;

        Ok(tables
            .permissions
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::UserPassword;
    use kernel::error::kind::ErrorKind;

    const DIGEST: &str = "$2b$04$C6UzMDM.H6dfI/f/IKxGhuXZv6Mf0pSVXQ4jP8KfTXBAmSPUm3XGi";

    fn new_user(user_name: &str, email: &str) -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            user_name: user_name.into(),
            email: email.into(),
            password: UserPassword::from_stored(DIGEST).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let gateway = InMemoryModelGateway::new();
        let created = gateway
            .create_user(&new_user("ada", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, UserId::new(1));
        assert_eq!(created[0].password_hash, DIGEST);

        let by_name = gateway.get_user_details_by_name_or_email("ada").await.unwrap();
        let by_email = gateway
            .get_user_details_by_name_or_email("ada@example.com")
            .await
            .unwrap();
        assert_eq!(by_name, created);
        assert_eq!(by_email, created);

        let missing = gateway.get_user_details_by_name_or_email("bob").await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_user_name_or_email() {
        let gateway = InMemoryModelGateway::new();
        gateway
            .create_user(&new_user("ada", "ada@example.com"))
            .await
            .unwrap();

        for dup in [
            new_user("ada", "other@example.com"),
            new_user("other", "ada@example.com"),
        ] {
            let err = gateway.create_user(&dup).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict);
            assert_eq!(err.public_message(), DUPLICATE_KEY);
        }
        assert_eq!(gateway.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_missing_user_by_id() {
        let gateway = InMemoryModelGateway::new();
        let err = gateway.get_details_by_id(UserId::new(42)).await.unwrap_err();

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.public_message(), "User not found");
    }

    #[tokio::test]
    async fn test_permissions_require_existing_user() {
        let gateway = InMemoryModelGateway::seeded().await;
        let err = gateway
            .create_permission(&NewPermission {
                user_id: UserId::new(9),
                role: RoleName::customer(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);

        let user = gateway
            .create_user(&new_user("ada", "ada@example.com"))
            .await
            .unwrap()
            .remove(0);
        for role in ["customer", "admin"] {
            gateway
                .create_permission(&NewPermission {
                    user_id: user.id,
                    role: role.into(),
                })
                .await
                .unwrap();
        }

        let roles: Vec<_> = gateway
            .get_user_permission(user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.role)
            .collect();
        assert_eq!(roles, vec![RoleName::customer(), RoleName::from("admin")]);
    }

    #[tokio::test]
    async fn test_seeded_customer_role_is_unique() {
        let gateway = InMemoryModelGateway::seeded().await;
        let err = gateway
            .create_user_role(&NewRole {
                role: RoleName::customer(),
                description: "again".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);

        let admin = gateway
            .create_user_role(&NewRole {
                role: "admin".into(),
                description: "Administrators".into(),
            })
            .await
            .unwrap();
        assert_eq!(admin.id, RoleId::new(2));
    }

    #[tokio::test]
    async fn test_registration_stores_user_and_grant_together() {
        let gateway = InMemoryModelGateway::new();
        let registration = gateway
            .create_user_with_permission(&new_user("ada", "ada@example.com"), &RoleName::customer())
            .await
            .unwrap();

        let user_id = registration.users[0].id;
        assert_eq!(registration.permission.user_id, user_id);
        assert_eq!(
            gateway.get_user_permission(user_id).await.unwrap(),
            vec![registration.permission]
        );

        let err = gateway
            .create_user_with_permission(&new_user("ada", "other@example.com"), &RoleName::customer())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(gateway.user_count().await, 1);
        assert_eq!(gateway.get_user_permission(user_id).await.unwrap().len(), 1);
    }
}
