//! Fetch User Use Case

use std::sync::Arc;

use kernel::id::UserId;
use serde_json::Value;

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::ModelGateway;
use crate::error::{AuthError, AuthResult};
use crate::validation::validate_id;

pub struct FetchUserUseCase<G>
where
    G: ModelGateway,
{
    gateway: Arc<G>,
}

impl<G> FetchUserUseCase<G>
where
    G: ModelGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Gateway errors (e.g. `404 User not found`) are returned unchanged.
    pub async fn execute(&self, payload: &Value) -> AuthResult<UserRecord> {
        let valid = validate_id(payload)?;
        let id = valid.integer("id").map_err(AuthError::Validation)?;

        self.gateway.get_details_by_id(UserId::new(id)).await
    }
}
