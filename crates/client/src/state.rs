//! Application state injected into every hook.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::query::QueryClient;
use crate::store::AppStore;

/// Everything a hook needs: configuration, the shared HTTP client, the query
/// cache and the application store.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    http: HttpClient,
    queries: QueryClient,
    store: AppStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config)?;
        let queries = QueryClient::new(&config.cache);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                http,
                queries,
                store: AppStore::new(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    #[must_use]
    pub fn queries(&self) -> &QueryClient {
        &self.inner.queries
    }

    #[must_use]
    pub fn store(&self) -> &AppStore {
        &self.inner.store
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("queries", &self.inner.queries)
            .finish_non_exhaustive()
    }
}
