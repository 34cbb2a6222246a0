//! Records owned by the model gateway, and the inputs used to create them.

pub mod permission;
pub mod role;
pub mod user;
