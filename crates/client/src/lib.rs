//! Edumall Client - data layer of the Edumall mobile app.
//!
//! # Layers
//!
//! - [`http`] - Shared HTTP client: URL building, bearer auth, schema
//!   validation of every response
//! - [`api`] - One request wrapper per backend operation
//! - [`query`] - Cache with request deduplication and invalidation
//! - [`hooks`] - Per-resource queries and mutations wired to the cache and
//!   the [`store`]
//! - [`store`] - Session and notification badge shared across screens
//!
//! Screens hold an [`AppState`] and call hooks:
//!
//! ```rust,ignore
//! let state = AppState::new(ClientConfig::from_env()?)?;
//! hooks::auth::use_login(&state, "lan", "matkhau123").await?;
//! let cart = hooks::cart::use_cart(&state).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod query;
pub mod state;
pub mod store;

pub use config::{CacheConfig, ClientConfig, ConfigError};
pub use error::{ApiError, QueryError, QueryResult};
pub use http::{HttpClient, Upload};
pub use query::{QueryClient, QueryKey, QueryState, Resource};
pub use state::AppState;
pub use store::{AppStore, NotificationBadge, Session};
