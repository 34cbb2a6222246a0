//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::env;

use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};
use platform::password::{DEFAULT_HASH_COST, MIN_HASH_COST, PasswordHasher};

/// Environment variable overriding [`AuthConfig::password_hash_cost`]
pub const ENV_PASSWORD_HASH_COST: &str = "AUTH_PASSWORD_HASH_COST";

/// Environment variable overriding [`AuthConfig::default_role`]
pub const ENV_DEFAULT_ROLE: &str = "AUTH_DEFAULT_ROLE";

/// Auth application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// bcrypt cost factor for new password hashes
    pub password_hash_cost: u32,
    /// Role granted to every newly registered user
    pub default_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: DEFAULT_HASH_COST,
            default_role: "customer".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (cheapest hash cost)
    pub fn development() -> Self {
        Self {
            password_hash_cost: MIN_HASH_COST,
            ..Default::default()
        }
    }

    /// Load overrides from the environment, falling back to defaults
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup` (keyed by variable name)
    ///
    /// Invalid values fail with `500 Internal Server Error`.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_PASSWORD_HASH_COST) {
            config.password_hash_cost = raw.trim().parse::<u32>().map_app_err(
                ErrorKind::InternalServerError,
                format!("{} must be an unsigned integer", ENV_PASSWORD_HASH_COST),
            )?;
        }

        if let Some(role) = lookup(ENV_DEFAULT_ROLE) {
            let role = role.trim();
            if role.is_empty() {
                return Err(AppError::internal(format!(
                    "{} must not be empty",
                    ENV_DEFAULT_ROLE
                )));
            }
            config.default_role = role.to_string();
        }

        // cost must be within bcrypt's range
        config.hasher()?;

        Ok(config)
    }

    /// Build the password hasher for the configured cost
    pub fn hasher(&self) -> AppResult<PasswordHasher> {
        PasswordHasher::new(self.password_hash_cost)
            .map_app_err(ErrorKind::InternalServerError, "Invalid password hash cost")
    }
}
