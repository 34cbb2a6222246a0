//! Infrastructure Layer
//!
//! Model gateway implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryModelGateway;
pub use postgres::PgModelGateway;
