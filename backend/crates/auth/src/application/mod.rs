//! Application Layer
//!
//! One use case per controller operation. Use cases return `AuthResult`;
//! converting failures into envelopes is the controller's job.

pub mod config;
pub mod create_permission;
pub mod create_role;
pub mod create_token;
pub mod create_user;
pub mod fetch_user;
pub mod login_user;

// Re-exports
pub use config::AuthConfig;
pub use create_permission::CreatePermissionUseCase;
pub use create_role::CreateRoleUseCase;
pub use create_token::CreateUserTokenUseCase;
pub use create_user::{CreateUserOutput, CreateUserUseCase};
pub use fetch_user::FetchUserUseCase;
pub use login_user::{LoginUserOutput, LoginUserUseCase};
