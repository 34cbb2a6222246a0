//! Controller scenarios against the in-memory gateway

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::error::app_error::AppError;
    use kernel::id::UserId;
    use serde_json::{Value, json};

    use crate::application::config::AuthConfig;
    use crate::domain::entity::{
        permission::{NewPermission, PermissionRecord},
        role::{NewRole, RoleRecord},
        user::{NewUser, Registration, UserRecord},
    };
    use crate::domain::repository::ModelGateway;
    use crate::domain::value_object::role_name::RoleName;
    use crate::error::AuthResult;
    use crate::infra::memory::InMemoryModelGateway;
    use crate::presentation::controller::UserController;

    /// Wraps the in-memory gateway and records which calls were made
    #[derive(Default)]
    pub struct CountingGateway {
        inner: InMemoryModelGateway,
        pub create_user_calls: AtomicUsize,
        pub registration_calls: AtomicUsize,
        pub create_permission_calls: AtomicUsize,
        pub lookup_calls: AtomicUsize,
        pub permission_lookups: AtomicUsize,
        /// Password digests handed to the user inserts
        pub stored_passwords: Mutex<Vec<String>>,
        /// Error returned by the next registration, with nothing stored
        pub registration_failure: Mutex<Option<AppError>>,
        /// Error returned by name/email lookups instead of querying
        pub lookup_failure: Mutex<Option<AppError>>,
    }

    impl CountingGateway {
        pub fn count(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    impl ModelGateway for CountingGateway {
        async fn create_user(&self, input: &NewUser) -> AuthResult<Vec<UserRecord>> {
            self.create_user_calls.fetch_add(1, Ordering::SeqCst);
            self.stored_passwords
                .lock()
                .unwrap()
                .push(input.password.as_str().to_string());
            self.inner.create_user(input).await
        }

        async fn create_user_with_permission(
            &self,
            input: &NewUser,
            role: &RoleName,
        ) -> AuthResult<Registration> {
            self.registration_calls.fetch_add(1, Ordering::SeqCst);
            self.stored_passwords
                .lock()
                .unwrap()
                .push(input.password.as_str().to_string());
            let failure = self.registration_failure.lock().unwrap().take();
            if let Some(err) = failure {
                return Err(err.into());
            }
            self.inner.create_user_with_permission(input, role).await
        }

        async fn create_permission(&self, input: &NewPermission) -> AuthResult<PermissionRecord> {
            self.create_permission_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.create_permission(input).await
        }

        async fn create_user_role(&self, input: &NewRole) -> AuthResult<RoleRecord> {
            self.inner.create_user_role(input).await
        }

        async fn get_details_by_id(&self, id: UserId) -> AuthResult<UserRecord> {
            self.inner.get_details_by_id(id).await
        }

        async fn get_user_details_by_name_or_email(
            &self,
            identifier: &str,
        ) -> AuthResult<Vec<UserRecord>> {
            self.lookup_calls.fetch_add(1, Ordering::SeqCst);
            let failure = self.lookup_failure.lock().unwrap().take();
            if let Some(err) = failure {
                return Err(err.into());
            }
            self.inner.get_user_details_by_name_or_email(identifier).await
        }

        async fn get_user_permission(&self, user_id: UserId) -> AuthResult<Vec<PermissionRecord>> {
            self.permission_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_user_permission(user_id).await
        }
    }

    pub fn controller() -> (UserController<CountingGateway>, Arc<CountingGateway>) {
        let gateway = Arc::new(CountingGateway::default());
        let controller =
            UserController::new(gateway.clone(), Arc::new(AuthConfig::development())).unwrap();
        (controller, gateway)
    }

    pub fn registration() -> Value {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "user_name": "ada",
            "email": "ada@example.com",
            "password": "correct horse",
        })
    }
}

#[cfg(test)]
mod create_user_tests {
    use super::support::*;
    use crate::domain::value_object::role_name::RoleName;
    use kernel::error::app_error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_user_returns_rows_and_default_role() {
        let (controller, gateway) = controller();
        let envelope = controller.create_user(&registration()).await;

        assert!(envelope.is_success());
        assert_eq!(envelope.status_code, 200);

        let users = envelope.data.as_ref().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_name, "ada");

        let meta = envelope.metadata.as_ref().unwrap();
        assert_eq!(meta.user_roles, vec![RoleName::customer()]);
        assert_eq!(meta.email, "ada@example.com");
        assert_eq!(CountingGateway::count(&gateway.registration_calls), 1);
        assert_eq!(CountingGateway::count(&gateway.create_user_calls), 0);
        assert_eq!(CountingGateway::count(&gateway.create_permission_calls), 0);
    }

    #[tokio::test]
    async fn test_create_user_never_persists_plaintext() {
        let (controller, gateway) = controller();
        controller.create_user(&registration()).await;

        let stored = gateway.stored_passwords.lock().unwrap().clone();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0], "correct horse");
        assert!(stored[0].starts_with("$2"));
    }

    #[tokio::test]
    async fn test_create_user_envelope_hides_hash() {
        let (controller, _) = controller();
        let envelope = controller.create_user(&registration()).await;
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["metadata"]["user_roles"], json!(["customer"]));
        assert!(json["data"][0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_create_user_missing_field() {
        let (controller, gateway) = controller();
        let envelope = controller
            .create_user(&json!({"first_name": "Ada", "last_name": "Lovelace"}))
            .await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.message.as_deref(), Some("user_name missing"));
        assert_eq!(CountingGateway::count(&gateway.registration_calls), 0);
    }

    #[tokio::test]
    async fn test_create_user_duplicate() {
        let (controller, gateway) = controller();
        controller.create_user(&registration()).await;
        let envelope = controller.create_user(&registration()).await;

        assert_eq!(envelope.status_code, 409);
        assert_eq!(envelope.message.as_deref(), Some("Duplicate key value"));
        assert!(envelope.data.is_none());
        assert_eq!(CountingGateway::count(&gateway.registration_calls), 2);
    }

    #[tokio::test]
    async fn test_failed_grant_leaves_no_user_behind() {
        let (controller, gateway) = controller();
        *gateway.registration_failure.lock().unwrap() =
            Some(AppError::service_unavailable("Database unavailable"));

        let failed = controller.create_user(&registration()).await;
        assert_eq!(failed.status_code, 503);
        assert_eq!(failed.message.as_deref(), Some("Database unavailable"));

        let login = controller
            .login_user(&json!({"user_name": "ada", "password": "correct horse"}))
            .await;
        assert_eq!(login.status_code, 401);

        let retry = controller.create_user(&registration()).await;
        assert_eq!(retry.status_code, 200);

        let login = controller
            .login_user(&json!({"user_name": "ada", "password": "correct horse"}))
            .await;
        assert_eq!(login.status_code, 200);
        assert_eq!(login.metadata.unwrap().user_roles, vec![RoleName::customer()]);
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use crate::domain::value_object::role_name::RoleName;
    use kernel::error::app_error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_returns_roles_from_permissions() {
        let (controller, gateway) = controller();
        let created = controller.create_user(&registration()).await;
        let user_id = created.data.unwrap()[0].id.get();

        controller.create_user_role(&json!({"role": "admin", "description": "Admins"})).await;
        let granted = controller
            .create_user_permission(&json!({"user_id": user_id, "role": "admin"}))
            .await;
        assert!(granted.is_success());

        let envelope = controller
            .login_user(&json!({"user_name": "ada", "password": "correct horse"}))
            .await;

        assert_eq!(envelope.status_code, 200);
        let meta = envelope.metadata.unwrap();
        assert_eq!(
            meta.user_roles,
            vec![RoleName::customer(), RoleName::from("admin")]
        );
        assert_eq!(meta.email, "ada@example.com");
        assert_eq!(CountingGateway::count(&gateway.permission_lookups), 1);
    }

    #[tokio::test]
    async fn test_login_by_email() {
        let (controller, _) = controller();
        controller.create_user(&registration()).await;

        let envelope = controller
            .login_user(&json!({"user_name": "ada@example.com", "password": "correct horse"}))
            .await;
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.data.unwrap()[0].user_name, "ada");
    }

    #[tokio::test]
    async fn test_login_wrong_password_skips_permission_lookup() {
        let (controller, gateway) = controller();
        controller.create_user(&registration()).await;

        let envelope = controller
            .login_user(&json!({"user_name": "ada", "password": "wrong"}))
            .await;

        assert_eq!(envelope.status_code, 401);
        assert_eq!(envelope.message.as_deref(), Some("Unauthorized"));
        assert!(envelope.metadata.is_none());
        assert_eq!(CountingGateway::count(&gateway.permission_lookups), 0);
    }

    #[tokio::test]
    async fn test_login_unknown_user_matches_wrong_password() {
        let (controller, gateway) = controller();
        controller.create_user(&registration()).await;

        let unknown = controller
            .login_user(&json!({"user_name": "bob", "password": "correct horse"}))
            .await;
        let wrong = controller
            .login_user(&json!({"user_name": "ada", "password": "nope"}))
            .await;

        assert_eq!(unknown.status_code, wrong.status_code);
        assert_eq!(unknown.message, wrong.message);
        assert_eq!(CountingGateway::count(&gateway.permission_lookups), 0);
    }

    #[tokio::test]
    async fn test_login_gateway_not_found_is_unauthorized() {
        let (controller, gateway) = controller();
        *gateway.lookup_failure.lock().unwrap() = Some(AppError::not_found("User not found"));

        let envelope = controller
            .login_user(&json!({"user_name": "ghost", "password": "x"}))
            .await;

        assert_eq!(envelope.status_code, 401);
        assert_eq!(envelope.message.as_deref(), Some("Unauthorized"));
    }

    #[tokio::test]
    async fn test_login_gateway_failure_passes_through() {
        let (controller, gateway) = controller();
        *gateway.lookup_failure.lock().unwrap() =
            Some(AppError::service_unavailable("Database unavailable"));

        let envelope = controller
            .login_user(&json!({"user_name": "ada", "password": "x"}))
            .await;

        assert_eq!(envelope.status_code, 503);
        assert_eq!(envelope.message.as_deref(), Some("Database unavailable"));
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let (controller, gateway) = controller();
        let envelope = controller.login_user(&json!({"user_name": "ada"})).await;

        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.message.as_deref(), Some("password missing"));
        assert_eq!(CountingGateway::count(&gateway.lookup_calls), 0);
    }
}

#[cfg(test)]
mod fetch_and_grant_tests {
    use super::support::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_user_by_id() {
        let (controller, _) = controller();
        controller.create_user(&registration()).await;

        let envelope = controller.fetch_user(&json!({"id": 1})).await;
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.data.unwrap().email, "ada@example.com");

        // numeric strings are accepted
        let envelope = controller.fetch_user(&json!({"id": "1"})).await;
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn test_fetch_missing_user_preserves_gateway_error() {
        let (controller, _) = controller();
        let envelope = controller.fetch_user(&json!({"id": 99})).await;

        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.message.as_deref(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_fetch_user_bad_id() {
        let (controller, _) = controller();

        let missing = controller.fetch_user(&json!({})).await;
        assert_eq!(missing.status_code, 400);
        assert_eq!(missing.message.as_deref(), Some("id missing"));

        let malformed = controller.fetch_user(&json!({"id": "abc"})).await;
        assert_eq!(malformed.status_code, 400);
        assert_eq!(malformed.message.as_deref(), Some("id must be an integer"));
    }

    #[tokio::test]
    async fn test_create_role_and_duplicate() {
        let (controller, _) = controller();
        let payload = json!({"role": "admin", "description": "Administrators"});

        let created = controller.create_user_role(&payload).await;
        assert_eq!(created.status_code, 200);
        assert_eq!(created.data.unwrap().role.as_str(), "admin");

        let duplicate = controller.create_user_role(&payload).await;
        assert_eq!(duplicate.status_code, 409);
    }

    #[tokio::test]
    async fn test_permission_for_unknown_user() {
        let (controller, _) = controller();
        let envelope = controller
            .create_user_permission(&json!({"user_id": 7, "role": "admin"}))
            .await;

        assert_eq!(envelope.status_code, 409);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_create_user_token_is_not_implemented() {
        let (controller, _) = controller();
        let envelope = controller.create_user_token(&json!({"user_name": "ada"})).await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.status_code, 501);
        assert_eq!(
            envelope.message.as_deref(),
            Some("create_user_token is not implemented")
        );
    }
}

#[cfg(test)]
mod controller_config_tests {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryModelGateway;
    use crate::presentation::controller::UserController;

    #[test]
    fn test_controller_rejects_invalid_cost() {
        let config = AuthConfig {
            password_hash_cost: 2,
            ..AuthConfig::development()
        };
        let result = UserController::new(Arc::new(InMemoryModelGateway::new()), Arc::new(config));

        let err = result.err().unwrap();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_custom_default_role() {
        let config = AuthConfig {
            default_role: "member".into(),
            ..AuthConfig::development()
        };
        let controller =
            UserController::new(Arc::new(InMemoryModelGateway::new()), Arc::new(config)).unwrap();

        let envelope = controller.create_user(&super::support::registration()).await;
        let meta = envelope.metadata.unwrap();
        assert_eq!(meta.user_roles[0].as_str(), "member");
    }
}
