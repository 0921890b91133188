//! Request and response schemas for every backend endpoint.
//!
//! # Validation
//!
//! Responses are plain `serde` types; [`parse`] is the single entry point that
//! turns a response body into one of them. It never coerces: a missing field,
//! a wrong JSON type or an unknown enum variant fails with a [`SchemaError`]
//! naming the offending field path.
//!
//! Schemas marked strict carry `#[serde(deny_unknown_fields)]`, so one
//! unexpected field is also a failure. Every request body is strict, as is
//! [`auth::Credentials`]. All other responses ignore fields they do not
//! declare.
//!
//! Request bodies additionally implement [`validator::Validate`] for the
//! field rules the backend enforces (non-empty strings, quantities, emails).

pub mod auth;
pub mod blog;
pub mod cart;
pub mod course;
pub mod event;
pub mod notification;
pub mod order;
pub mod product;
pub mod shipping;
pub mod upload;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A payload that does not match its declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation at `{path}`: {message}")]
pub struct SchemaError {
    /// Field path of the offending value (`.` for the document root).
    pub path: String,
    /// What the deserializer expected.
    pub message: String,
}

/// Validate a JSON document against the schema `T`.
///
/// # Errors
///
/// Returns a [`SchemaError`] carrying the field path when the document is not
/// valid JSON or does not conform to `T`.
pub fn parse<T: DeserializeOwned>(body: &str) -> Result<T, SchemaError> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    let value = serde_path_to_error::deserialize(deserializer).map_err(|err| SchemaError {
        path: err.path().to_string(),
        message: err.inner().to_string(),
    })?;
    Ok(value)
}

/// Validate an already-decoded JSON value against the schema `T`.
///
/// # Errors
///
/// Returns a [`SchemaError`] carrying the field path on mismatch.
pub fn parse_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, SchemaError> {
    serde_path_to_error::deserialize(value).map_err(|err| SchemaError {
        path: err.path().to_string(),
        message: err.inner().to_string(),
    })
}

// =============================================================================
// Envelopes
// =============================================================================

/// Standard single-payload envelope: `{ "data": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Paginated list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }
}

/// Acknowledgement returned by deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
