//! Auth (Users & Permissions) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Records, value objects, model gateway trait
//! - `application/` - Use cases and configuration
//! - `infra/` - In-memory and PostgreSQL gateways
//! - `presentation/` - `UserController` and envelope payloads
//!
//! ## Features
//! - User registration with a default role grant
//! - Role definition and role grants (permissions)
//! - Login by user name or email, returning the user's roles
//!
//! ## Security Model
//! - Passwords hashed with bcrypt at a configured cost before persistence
//! - Unknown users and wrong passwords fail with the same `401`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod validation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::repository::ModelGateway;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryModelGateway, PgModelGateway};
pub use presentation::{SessionMetadata, UserController};

// Re-export kernel types for unified error handling
pub use kernel::envelope::Envelope;
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
