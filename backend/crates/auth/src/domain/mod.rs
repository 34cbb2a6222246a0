//! Domain Layer
//!
//! Contains records, value objects, and the model gateway trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    permission::{NewPermission, PermissionRecord},
    role::{NewRole, RoleRecord},
    user::{NewUser, Registration, UserRecord},
};
pub use repository::{LocalModelGateway, ModelGateway};
