//! PostgreSQL Model Gateway

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, OptionExt};
use kernel::id::{PermissionId, RoleId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{
    permission::{NewPermission, PermissionRecord},
    role::{NewRole, RoleRecord},
    user::{NewUser, Registration, UserRecord},
};
use crate::domain::repository::ModelGateway;
use crate::domain::value_object::role_name::RoleName;
use crate::error::AuthResult;

const INSERT_USER: &str = r#"
    INSERT INTO users (
        first_name,
        last_name,
        user_name,
        email,
        password_hash
    ) VALUES ($1, $2, $3, $4, $5)
    RETURNING id, first_name, last_name, user_name, email, password_hash, created_at
"#;

const INSERT_PERMISSION: &str = r#"
    INSERT INTO user_permissions (user_id, role)
    VALUES ($1, $2)
    RETURNING id, user_id, role, created_at
"#;

/// PostgreSQL-backed model gateway
#[derive(Clone)]
pub struct PgModelGateway {
    pool: PgPool,
}

impl PgModelGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled migrations
    pub async fn migrate(&self) -> AuthResult<()> {
        sqlx::migrate!("../../../database/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::internal(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations applied");

        Ok(())
    }
}

// ============================================================================
// Model Gateway Implementation
// ============================================================================

impl ModelGateway for PgModelGateway {
    async fn create_user(&self, input: &NewUser) -> AuthResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(INSERT_USER)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.user_name)
            .bind(&input.email)
            .bind(input.password.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserRow::into_record).collect())
    }

    async fn create_user_with_permission(
        &self,
        input: &NewUser,
        role: &RoleName,
    ) -> AuthResult<Registration> {
        // dropping the transaction without commit rolls both inserts back
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, UserRow>(INSERT_USER)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.user_name)
            .bind(&input.email)
            .bind(input.password.as_str())
            .fetch_all(&mut *tx)
            .await?;

        let user_id = rows
            .first()
            .map(|row| row.id)
            .ok_or_else(|| AppError::internal("User insert returned no rows"))?;

        let permission = sqlx::query_as::<_, PermissionRow>(INSERT_PERMISSION)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Registration {
            users: rows.into_iter().map(UserRow::into_record).collect(),
            permission: permission.into_record(),
        })
    }

    async fn create_permission(&self, input: &NewPermission) -> AuthResult<PermissionRecord> {
        let row = sqlx::query_as::<_, PermissionRow>(INSERT_PERMISSION)
            .bind(input.user_id.get())
            .bind(input.role.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into_record())
    }

    async fn create_user_role(&self, input: &NewRole) -> AuthResult<RoleRecord> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (role, description)
            VALUES ($1, $2)
            RETURNING id, role, description, created_at
            "#,
        )
        .bind(input.role.as_str())
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn get_details_by_id(&self, id: UserId) -> AuthResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, user_name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_not_found("User not found")?;

        Ok(row.into_record())
    }

    async fn get_user_details_by_name_or_email(
        &self,
        identifier: &str,
    ) -> AuthResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, user_name, email, password_hash, created_at
            FROM users
            WHERE user_name = $1 OR email = $1
            ORDER BY id
            "#,
        )
        .bind(identifier)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_record).collect())
    }

    async fn get_user_permission(&self, user_id: UserId) -> AuthResult<Vec<PermissionRecord>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, user_id, role, created_at
            FROM user_permissions
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PermissionRow::into_record).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    user_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> UserRecord {
        UserRecord {
            id: UserId::new(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: self.user_name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PermissionRow {
    id: i64,
    user_id: i64,
    role: String,
    created_at: DateTime<Utc>,
}

impl PermissionRow {
    fn into_record(self) -> PermissionRecord {
        PermissionRecord {
            id: PermissionId::new(self.id),
            user_id: UserId::new(self.user_id),
            role: RoleName::new(self.role),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    role: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_record(self) -> RoleRecord {
        RoleRecord {
            id: RoleId::new(self.id),
            role: RoleName::new(self.role),
            description: self.description,
            created_at: self.created_at,
        }
    }
}
