//! Lifecycle of a single query or mutation as seen by a consumer.
//!
//! Hooks return a [`QueryResult`] once they settle. A screen that renders
//! while a hook is still pending keeps one `QueryState` per query, sets it to
//! `Loading` before awaiting and converts the settled result with `From`:
//!
//! ```
//! # use edumall_client::{QueryResult, QueryState};
//! # fn settle(result: QueryResult<u32>) {
//! let mut cart: QueryState<u32> = QueryState::Loading;
//! assert!(cart.is_loading());
//! cart = QueryState::from(result);
//! # let _ = cart;
//! # }
//! ```

use crate::error::{QueryError, QueryResult};

/// `Idle -> Loading -> Success | Error`.
#[derive(Debug, Clone, Default)]
pub enum QueryState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(QueryError),
}

impl<T> QueryState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&QueryError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Transform the payload of a successful state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            Self::Idle => QueryState::Idle,
            Self::Loading => QueryState::Loading,
            Self::Success(data) => QueryState::Success(f(data)),
            Self::Error(err) => QueryState::Error(err),
        }
    }
}

impl<T> From<QueryResult<T>> for QueryState<T> {
    fn from(result: QueryResult<T>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err),
        }
    }
}
