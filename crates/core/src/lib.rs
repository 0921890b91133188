//! Edumall Core - schemas and value types for the Edumall mobile API.
//!
//! This crate describes every payload exchanged with the backend:
//! - [`types`] - Newtype IDs, validated emails, prices and status enums
//! - [`schema`] - Request bodies, response shapes and the [`schema::parse`]
//!   validation function
//! - [`format`] - Display helpers for durations and prices
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! client, no caching. The `edumall-client` crate builds on it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod schema;
pub mod types;

pub use schema::{DataResponse, MessageResponse, PageResponse, Pagination, SchemaError, parse};
pub use types::*;
