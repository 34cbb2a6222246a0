//! Value Object Module

pub mod role_name;
pub mod user_password;
