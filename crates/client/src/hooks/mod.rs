//! Per-resource queries and mutations.
//!
//! Read hooks go through [`QueryClient::fetch`](crate::query::QueryClient::fetch)
//! under a key built by the module's `*_key` function, so equal calls share one
//! cached result and one in-flight request. Mutation hooks go through
//! [`QueryClient::mutate`](crate::query::QueryClient::mutate) and name the
//! resources they make stale.
//!
//! Every hook reads the bearer token from the session in the
//! [`AppStore`](crate::store::AppStore); without a session the request is
//! sent without one.

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

use secrecy::{ExposeSecret, SecretString};

use crate::state::AppState;

/// Access token captured at the start of a hook.
struct Token(Option<SecretString>);

impl Token {
    fn current(state: &AppState) -> Self {
        Self(state.store().access_token())
    }

    fn as_deref(&self) -> Option<&str> {
        self.0.as_ref().map(|t| t.expose_secret())
    }
}
