//! Image Relay
//!
//! The cache-then-fetch pipeline behind `/api/image-proxy`, independent of
//! how it is hosted.

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::fetch::FetchResolver;

/// Response header reporting whether the body came from the cache.
pub const X_CACHE: &str = "x-cache";

/// Whether a relayed image was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// An image ready to be written back to the caller.
#[derive(Debug, Clone)]
pub struct RelayedImage {
    pub payload: Bytes,
    pub content_type: String,
    pub cache_status: CacheStatus,
    /// Seconds advertised in `Cache-Control: max-age`
    pub max_age: u64,
}

impl IntoResponse for RelayedImage {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(crate::cache::DEFAULT_CONTENT_TYPE));
        let cache_control = HeaderValue::from_str(&format!("public, max-age={}", self.max_age))
            .unwrap_or_else(|_| HeaderValue::from_static("public"));
        let cache_status = HeaderValue::from_static(self.cache_status.as_str());

        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type),
                (HeaderName::from_static(X_CACHE), cache_status),
                (header::CACHE_CONTROL, cache_control),
            ],
            self.payload,
        )
            .into_response()
    }
}

// == Image Relay ==
/// Validates a target URL, answers from the cache when possible and
/// otherwise resolves upstream and remembers the result.
///
/// Built with a cache for the long-running server, or without one for
/// per-invocation hosting where nothing survives between requests.
#[derive(Debug, Clone)]
pub struct ImageRelay {
    cache: Option<SharedCache>,
    resolver: FetchResolver,
    max_age: u64,
}

impl ImageRelay {
    /// Relay backed by `cache`; the advertised `max-age` is the cache TTL.
    pub fn new(cache: CacheStore, resolver: FetchResolver) -> Self {
        let max_age = cache.ttl();
        Self {
            cache: Some(Arc::new(RwLock::new(cache))),
            resolver,
            max_age,
        }
    }

    /// Relay without a cache. Every request resolves upstream and reports `MISS`.
    pub fn stateless(resolver: FetchResolver, max_age: u64) -> Self {
        Self {
            cache: None,
            resolver,
            max_age,
        }
    }

    /// Builds the relay described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = FetchResolver::new(config)?;
        if config.stateless {
            Ok(Self::stateless(resolver, config.cache_ttl))
        } else {
            let cache = CacheStore::new(config.max_entries, config.cache_ttl);
            Ok(Self::new(cache, resolver))
        }
    }

    /// The shared cache, absent in stateless mode.
    pub fn cache(&self) -> Option<&SharedCache> {
        self.cache.as_ref()
    }

    // == Relay ==
    /// Serves the image at `url`, the raw `url` query parameter.
    ///
    /// # Errors
    /// - `BadRequest` when `url` is missing or empty (no network call is made)
    /// - `FetchFailure` when both the direct fetch and the fallback failed;
    ///   nothing is cached in that case
    pub async fn relay(&self, url: Option<&str>) -> Result<RelayedImage> {
        let url = match url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ProxyError::BadRequest("Missing url parameter".to_string())),
        };

        if let Some(cache) = &self.cache {
            let cached = cache.write().await.get(url);
            if let Some(entry) = cached {
                info!(url = %url, "serving image from cache");
                return Ok(RelayedImage {
                    payload: entry.payload,
                    content_type: entry.content_type,
                    cache_status: CacheStatus::Hit,
                    max_age: self.max_age,
                });
            }
        }

        // The lock is released while upstream is being fetched
        let image = self
            .resolver
            .resolve(url)
            .await
            .map_err(|err| ProxyError::fetch_failure(url, &err))?;

        if let Some(cache) = &self.cache {
            let mut cache = cache.write().await;
            if let Some(evicted) = cache.put(
                url.to_string(),
                image.payload.clone(),
                image.content_type.clone(),
            ) {
                debug!(evicted = %evicted, "cache full, evicted oldest image");
            }
            info!(
                url = %url,
                "cached image ({}/{})",
                cache.len(),
                cache.max_entries()
            );
        }

        Ok(RelayedImage {
            payload: image.payload,
            content_type: image.content_type,
            cache_status: CacheStatus::Miss,
            max_age: self.max_age,
        })
    }
}
