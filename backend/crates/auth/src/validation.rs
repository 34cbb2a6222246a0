//! Request payload validators for the user operations
//!
//! Thin wrappers over [`kernel::validation::require_fields`] with the field
//! lists of each operation. Failures become [`AuthError::Validation`].

use kernel::validation::{self, ValidInput};
use serde_json::Value;

use crate::error::{AuthError, AuthResult};

pub const REGISTRATION_FIELDS: &[&str] =
    &["first_name", "last_name", "user_name", "email", "password"];

pub const PERMISSION_FIELDS: &[&str] = &["user_id", "role"];

pub const ROLE_FIELDS: &[&str] = &["role", "description"];

pub const CREDENTIAL_FIELDS: &[&str] = &["user_name", "password"];

fn require(body: &Value, fields: &[&str]) -> AuthResult<ValidInput> {
    validation::require_fields(body, fields).map_err(AuthError::Validation)
}

pub fn validate_user_register(body: &Value) -> AuthResult<ValidInput> {
    require(body, REGISTRATION_FIELDS)
}

pub fn validate_user_permission(body: &Value) -> AuthResult<ValidInput> {
    require(body, PERMISSION_FIELDS)
}

pub fn validate_user_role(body: &Value) -> AuthResult<ValidInput> {
    require(body, ROLE_FIELDS)
}

pub fn validate_auth(body: &Value) -> AuthResult<ValidInput> {
    require(body, CREDENTIAL_FIELDS)
}

pub fn validate_id(body: &Value) -> AuthResult<ValidInput> {
    validation::validate_id(body).map_err(AuthError::Validation)
}
