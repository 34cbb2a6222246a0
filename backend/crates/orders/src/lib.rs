//! Orders Backend Module
//!
//! Request validation for order and shipment payloads. Persistence of
//! orders lives behind the HTTP layer; this crate only checks that a payload
//! carries every required field.

pub mod validation;

pub use validation::{validate_order_register, validate_ship_register};
