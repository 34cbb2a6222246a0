//! Envelope payload types

use serde::{Deserialize, Serialize};

use crate::domain::value_object::role_name::RoleName;

/// Metadata attached to registration and login envelopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub user_roles: Vec<RoleName>,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_keys_are_snake_case() {
        let meta = SessionMetadata {
            user_roles: vec![RoleName::customer()],
            email: "ada@example.com".into(),
        };

        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({"user_roles": ["customer"], "email": "ada@example.com"})
        );
    }
}
