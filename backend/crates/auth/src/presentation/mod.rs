//! Presentation Layer
//!
//! The controller consumed by an HTTP layer, and the payload types it
//! returns inside envelopes.

pub mod controller;
pub mod dto;

pub use controller::UserController;
pub use dto::SessionMetadata;
