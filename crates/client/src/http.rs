//! Shared HTTP client for the Edumall backend.
//!
//! Every request wrapper describes its call as an [`Endpoint`] (plain data:
//! method, path segments, query pairs, optional bearer token, body) and hands
//! it to [`HttpClient::send`], which:
//!
//! 1. resolves the path under the configured base URL, percent-encoding path
//!    segments and form-encoding query values,
//! 2. attaches `Authorization: Bearer <token>` only when a non-empty token is
//!    present,
//! 3. executes the request with the configured timeouts,
//! 4. maps non-2xx answers to [`ApiError::Status`] and validates 2xx bodies
//!    against the expected schema.
//!
//! There are no retries and no caching at this level.

use std::sync::Arc;

use edumall_core::schema;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Maximum number of body characters copied into log records.
const LOG_BODY_LIMIT: usize = 500;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A file to send as `multipart/form-data` under the `file` field.
#[derive(Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Upload {
    fn to_form(&self) -> Result<Form, ApiError> {
        let part = Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)?;
        Ok(Form::new().part("file", part))
    }
}

/// Request payload.
#[derive(Debug)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Upload),
}

/// One backend call described as data.
#[derive(Debug)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// Path segments below the base URL, unencoded.
    pub segments: Vec<String>,
    /// Query pairs in send order, unencoded.
    pub query: Vec<(&'static str, String)>,
    pub bearer: Option<SecretString>,
    pub body: Body,
}

impl Endpoint {
    /// Start an endpoint at a fixed `/`-separated path such as `mobile/login`.
    #[must_use]
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            query: Vec::new(),
            bearer: None,
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Append one path segment. A `/` inside the value is encoded, not split.
    #[must_use]
    pub fn segment(mut self, value: impl std::fmt::Display) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Append a query pair.
    #[must_use]
    pub fn query(mut self, key: &'static str, value: impl std::fmt::Display) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Append a query pair only when a value is present.
    #[must_use]
    pub fn query_opt(self, key: &'static str, value: Option<impl std::fmt::Display>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Authenticate with a bearer token. `None` and empty tokens send no header.
    #[must_use]
    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_owned()));
        self
    }

    /// Send a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Send a multipart file upload.
    #[must_use]
    pub fn multipart(mut self, upload: Upload) -> Self {
        self.body = Body::Multipart(upload);
        self
    }

    /// Path below the base URL, for logs.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

// =============================================================================
// HttpClient
// =============================================================================

/// Shared HTTP client. Cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

struct HttpClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built (for
    /// instance when no TLS backend is available).
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("edumall-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Root every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint to its absolute URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry path segments.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(&endpoint.segments);

        if !endpoint.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(endpoint.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Build the request for an endpoint without sending it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or body cannot be built.
    pub fn prepare(&self, endpoint: &Endpoint) -> Result<reqwest::Request, ApiError> {
        let url = self.url_for(endpoint)?;
        let mut builder = self.inner.client.request(endpoint.method.into(), url);

        if let Some(token) = &endpoint.bearer {
            builder = builder.bearer_auth(token.expose_secret());
        }

        builder = match &endpoint.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(upload) => builder.multipart(upload.to_form()?),
        };

        Ok(builder.build()?)
    }

    /// Send an endpoint and validate the response against `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response arrives (including
    /// timeouts), [`ApiError::Status`] for non-2xx answers and
    /// [`ApiError::Schema`] when the body does not match `T`.
    #[instrument(
        skip(self, endpoint),
        fields(method = ?endpoint.method, path = %endpoint.path())
    )]
    pub async fn send<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let request = self.prepare(&endpoint)?;
        debug!(authenticated = endpoint.bearer.is_some(), "Sending request");

        let response = self.inner.client.execute(request).await?;
        let status = response.status();

        // Read as text first so failures can be logged with the raw body
        let text = response.text().await?;

        if !status.is_success() {
            if status.is_server_error() {
                tracing::error!(status = %status, body = %truncate(&text), "API returned server error");
            } else {
                tracing::warn!(status = %status, body = %truncate(&text), "API rejected request");
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        schema::parse::<T>(&text).map_err(|err| {
            tracing::error!(
                error = %err,
                body = %truncate(&text),
                "Response failed schema validation"
            );
            ApiError::Schema(err)
        })
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
