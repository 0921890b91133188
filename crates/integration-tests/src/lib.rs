//! Mock Edumall backend for end-to-end tests.
//!
//! [`MockBackend::start`] serves every mobile API endpoint under `/api/` on
//! an ephemeral local port. It keeps just enough state to make mutations
//! observable (cart lines, addresses, comments, reactions) and records, per
//! route:
//! - how many times it was hit,
//! - the last `Authorization` header it saw,
//! - the last raw query string.
//!
//! Protected routes answer 401 unless the request carries a token issued by
//! `mobile/login` or `mobile/refresh-token`.
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await;
//! let state = backend.signed_in().await;
//! hooks::cart::use_cart(&state).await?;
//! assert_eq!(backend.hits(routes::CART), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
mod handlers;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::routing::{delete, get, post, put};
use edumall_client::hooks;
use edumall_client::{AppState, ClientConfig};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

pub use fixtures::{ACCESS_TOKEN, PASSWORD, REFRESH_TOKEN, REFRESHED_ACCESS_TOKEN, USERNAME};

/// Route names used by the hit counters.
pub mod routes {
    pub const LOGIN: &str = "POST /mobile/login";
    pub const REFRESH_TOKEN: &str = "POST /mobile/refresh-token";
    pub const REGISTER: &str = "POST /auth/register";
    pub const CHECK_REFRESH: &str = "POST /mobile/check-refresh";
    pub const BLOGS: &str = "GET /blogs";
    pub const BLOG: &str = "GET /blogs/{id}";
    pub const BLOG_COMMENTS: &str = "GET /blog-comments/{id}";
    pub const CREATE_BLOG_COMMENT: &str = "POST /blog-comments";
    pub const REACT_BLOG: &str = "POST /blog-reacts";
    pub const CART: &str = "GET /mobile/cart";
    pub const UPDATE_CART: &str = "PUT /carts";
    pub const DELETE_CART_ITEM: &str = "DELETE /carts/{id}";
    pub const COURSES: &str = "GET /courses";
    pub const EVENTS: &str = "GET /events";
    pub const EVENT: &str = "GET /events/{id}";
    pub const NOTIFICATIONS: &str = "GET /notification/user";
    pub const CREATE_ORDER: &str = "POST /orders";
    pub const PRODUCTS: &str = "GET /products";
    pub const PRODUCT_REVIEWS: &str = "GET /products/{id}/reviews";
    pub const UPLOAD_IMAGE: &str = "POST /buckets/image";
    pub const UPLOAD_FILE: &str = "POST /buckets/file";
    pub const SHIPPING_INFOS: &str = "GET /delivery-infos";
    pub const CREATE_SHIPPING_INFO: &str = "POST /delivery-infos";
    pub const DELETE_SHIPPING_INFO: &str = "DELETE /delivery-infos/{id}";
}

/// Shared state of the mock server.
#[derive(Clone)]
pub(crate) struct Mock {
    inner: Arc<MockInner>,
}

struct MockInner {
    hits: Mutex<HashMap<&'static str, usize>>,
    authorization: Mutex<HashMap<&'static str, Option<String>>>,
    queries: Mutex<HashMap<&'static str, Option<String>>>,
    issued_tokens: Mutex<Vec<String>>,
    delay: Mutex<Duration>,
    malformed_notifications: AtomicBool,
    data: RwLock<fixtures::MockData>,
}

impl Mock {
    fn new() -> Self {
        Self {
            inner: Arc::new(MockInner {
                hits: Mutex::default(),
                authorization: Mutex::default(),
                queries: Mutex::default(),
                issued_tokens: Mutex::default(),
                delay: Mutex::new(Duration::ZERO),
                malformed_notifications: AtomicBool::new(false),
                data: RwLock::new(fixtures::MockData::seed()),
            }),
        }
    }

    /// Count a hit and remember what the request carried.
    pub(crate) fn record(&self, route: &'static str, headers: &HeaderMap, query: Option<String>) {
        *lock(&self.inner.hits).entry(route).or_default() += 1;
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        lock(&self.inner.authorization).insert(route, authorization);
        lock(&self.inner.queries).insert(route, query);
    }

    /// Whether the request carries a token this server issued.
    pub(crate) fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(token) = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return false;
        };
        lock(&self.inner.issued_tokens).iter().any(|t| t == token)
    }

    pub(crate) fn issue_token(&self, token: &str) {
        lock(&self.inner.issued_tokens).push(token.to_owned());
    }

    pub(crate) async fn simulate_latency(&self) {
        let delay = *lock(&self.inner.delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    pub(crate) fn malformed_notifications(&self) -> bool {
        self.inner.malformed_notifications.load(Ordering::SeqCst)
    }

    pub(crate) fn data(&self) -> &RwLock<fixtures::MockData> {
        &self.inner.data
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn router(mock: Mock) -> Router {
    let api = Router::new()
        .route("/mobile/login", post(handlers::login))
        .route("/mobile/refresh-token", post(handlers::refresh_token))
        .route("/mobile/check-refresh", post(handlers::check_refresh))
        .route("/auth/register", post(handlers::register))
        .route("/blogs", get(handlers::blogs))
        .route("/blogs/{id}", get(handlers::blog))
        .route("/blog-comments", post(handlers::create_blog_comment))
        .route("/blog-comments/{id}", get(handlers::blog_comments))
        .route("/blog-reacts", post(handlers::react_blog))
        .route("/mobile/cart", get(handlers::cart))
        .route("/carts", put(handlers::update_cart_item))
        .route("/carts/{id}", delete(handlers::delete_cart_item))
        .route("/courses", get(handlers::courses))
        .route("/events", get(handlers::events))
        .route("/events/{id}", get(handlers::event))
        .route("/notification/user", get(handlers::notifications))
        .route("/orders", post(handlers::create_order))
        .route("/products", get(handlers::products))
        .route("/products/{id}/reviews", get(handlers::product_reviews))
        .route("/buckets/image", post(handlers::upload_image))
        .route("/buckets/file", post(handlers::upload_file))
        .route(
            "/delivery-infos",
            get(handlers::shipping_infos).post(handlers::create_shipping_info),
        )
        .route("/delivery-infos/{id}", delete(handlers::delete_shipping_info))
        .with_state(mock);

    Router::new().nest("/api", api)
}

/// A running mock backend. The server stops when this is dropped.
pub struct MockBackend {
    base_url: Url,
    mock: Mock,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        let mock = Mock::new();
        let app = router(mock.clone());

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}/api/")).expect("Invalid mock URL");
        Self {
            base_url,
            mock,
            server,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.base_url.clone());
        config.request_timeout = Duration::from_secs(5);
        config
    }

    /// A fresh, signed-out application state.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn state(&self) -> AppState {
        AppState::new(self.config()).expect("Failed to build app state")
    }

    /// A fresh application state signed in as the fixture user.
    ///
    /// # Panics
    ///
    /// Panics if the login fails.
    pub async fn signed_in(&self) -> AppState {
        let state = self.state();
        hooks::auth::use_login(&state, USERNAME, PASSWORD)
            .await
            .expect("Fixture login failed");
        state
    }

    /// Number of requests served on `route`.
    #[must_use]
    pub fn hits(&self, route: &str) -> usize {
        lock(&self.mock.inner.hits).get(route).copied().unwrap_or(0)
    }

    /// `Authorization` header of the last request on `route`.
    #[must_use]
    pub fn last_authorization(&self, route: &str) -> Option<String> {
        lock(&self.mock.inner.authorization)
            .get(route)
            .cloned()
            .flatten()
    }

    /// Raw query string of the last request on `route`.
    #[must_use]
    pub fn last_query(&self, route: &str) -> Option<String> {
        lock(&self.mock.inner.queries).get(route).cloned().flatten()
    }

    /// Delay every cart, course and event read by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.mock.inner.delay) = delay;
    }

    /// Serve a notification list whose second entry has a string `isRead`.
    pub fn set_malformed_notifications(&self, malformed: bool) {
        self.mock
            .inner
            .malformed_notifications
            .store(malformed, Ordering::SeqCst);
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
