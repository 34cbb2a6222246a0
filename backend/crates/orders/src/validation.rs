//! Order and shipment payload validators
//!
//! The shipment keys `carier_company` / `carier_id` are part of the wire
//! format and keep that spelling.

use kernel::error::app_error::AppResult;
use kernel::validation::{ValidInput, require_fields};
use serde_json::Value;

pub const ORDER_FIELDS: &[&str] = &["product_id", "user_id", "quantity", "sub_total", "stage"];

pub const SHIPMENT_FIELDS: &[&str] = &[
    "order_id",
    "user_id",
    "carier_company",
    "carier_id",
    "tracking_id",
];

pub fn validate_order_register(body: &Value) -> AppResult<ValidInput> {
    let valid = require_fields(body, ORDER_FIELDS)?;
    tracing::debug!(fields = valid.len(), "Order payload validated");
    Ok(valid)
}

pub fn validate_ship_register(body: &Value) -> AppResult<ValidInput> {
    let valid = require_fields(body, SHIPMENT_FIELDS)?;
    tracing::debug!(fields = valid.len(), "Shipment payload validated");
    Ok(valid)
}
