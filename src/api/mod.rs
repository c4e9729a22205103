//! Client side of the validation API contract.

pub mod client;

pub use client::{check_bulk_size, extract_error_message, ApiClient};
