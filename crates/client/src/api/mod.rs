//! Shop backend REST client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the backend is the source of
//!   truth, there is no local sync.
//! - One cross-cutting concern: every outgoing request reads the session
//!   store and, when a token is present, carries it as a bearer credential.
//! - No retry, no backoff, no response interceptor. A rejected token
//!   surfaces as [`ApiError::Unauthorized`] and the caller decides what to
//!   do about it.
//! - Product reads are cached in-memory via `moka` (5-minute TTL); review
//!   mutations invalidate the cached product.
//!
//! List endpoints return pagination envelopes (`{products, page, pages}`);
//! single-resource endpoints return the bare resource.

mod orders;
mod products;
mod users;

pub use products::{NewReview, ProductQuery};
pub use users::ProfileUpdate;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::models::{Product, ProductPage};
use crate::store::SessionStore;

/// Product cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes
const CACHE_CAPACITY: u64 = 1000;

/// How much of an error body to keep in messages and logs.
const ERROR_BODY_LIMIT: usize = 500;

/// Errors that can occur when talking to the shop backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint path did not join onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Backend rejected the credentials (401/403).
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Cached catalog values.
#[derive(Debug, Clone)]
enum CacheValue {
    Product(Box<Product>),
    Page(ProductPage),
}

/// Client for the shop backend REST API.
///
/// Cheaply cloneable; clones share the HTTP connection pool, the session
/// store handle, and the product cache.
#[derive(Clone)]
pub struct ShopApi {
    inner: Arc<ShopApiInner>,
}

struct ShopApiInner {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    cache: Cache<String, CacheValue>,
}

impl ShopApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ShopApiInner {
                http,
                base_url: config.api_base_url.clone(),
                session,
                cache,
            }),
        })
    }

    /// Build a request for `path` relative to the base URL, attaching the
    /// current bearer token when a session is present.
    ///
    /// This is the only place credentials touch outgoing traffic; absence
    /// of a session means the request goes out unauthenticated.
    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.inner.base_url.join(path)?;
        let mut builder = self.inner.http.request(method, url);

        if let Some(token) = self.inner.session.token() {
            builder = builder.bearer_auth(token);
        }

        Ok(builder)
    }

    /// Send a built request and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let text = self.send_raw(path, builder).await?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    path,
                    error = %e,
                    body = %text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                    "failed to parse backend response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// Send a built request, discarding the response body.
    async fn send_unit(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        self.send_raw(path, builder).await.map(drop)
    }

    async fn send_raw(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_owned()));
        }

        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                path,
                status = %status,
                body = %text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(text)
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?;
        self.send_json(path, builder).await
    }

    async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?.query(query);
        self.send_json(path, builder).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send_json(path, builder).await
    }

    async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send_unit(path, builder).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path)?.json(body);
        self.send_json(path, builder).await
    }

    async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::PUT, path)?;
        self.send_unit(path, builder).await
    }

    async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path)?;
        self.send_unit(path, builder).await
    }

    // =========================================================================
    // Cache plumbing
    // =========================================================================

    async fn cache_get(&self, key: &str) -> Option<CacheValue> {
        self.inner.cache.get(key).await
    }

    async fn cache_put(&self, key: String, value: CacheValue) {
        self.inner.cache.insert(key, value).await;
    }

    pub(crate) async fn invalidate_cached_product(&self, key: &str) {
        self.inner.cache.invalidate(key).await;
    }

    /// Drop all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for ShopApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopApi")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
