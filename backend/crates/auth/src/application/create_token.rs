//! Create User Token Use Case
//!
//! Token issuance is not designed yet; the operation always fails with
//! `501 Not Implemented`.

use serde_json::Value;

use crate::error::{AuthError, AuthResult};

pub const OPERATION: &str = "create_user_token";

#[derive(Debug, Default, Clone, Copy)]
pub struct CreateUserTokenUseCase;

impl CreateUserTokenUseCase {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, _payload: &Value) -> AuthResult<()> {
        Err(AuthError::NotImplemented(OPERATION))
    }
}
