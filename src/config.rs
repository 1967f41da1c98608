//! Configuration Module
//!
//! Handles loading and managing relay configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default Referer sent on direct fetches; the image CDN rejects requests without it.
pub const DEFAULT_REFERER: &str = "https://www.bilibili.com/";

/// Default browser-like User-Agent sent on direct fetches.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default public re-encoding proxy used when the direct fetch fails.
pub const DEFAULT_FALLBACK_PROXY_URL: &str = "https://images.weserv.nl/";

/// Relay configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of images the cache can hold
    pub max_entries: usize,
    /// Seconds a cached image stays fresh; also advertised as `max-age`
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Timeout in seconds for each outbound fetch
    pub fetch_timeout: u64,
    /// Referer header for direct fetches
    pub referer: String,
    /// User-Agent header for direct fetches
    pub user_agent: String,
    /// Base URL of the public fallback proxy
    pub fallback_proxy_url: String,
    /// Upgrade `http://` targets to `https://` before the direct fetch
    pub force_https: bool,
    /// Serve every request without a cache (per-invocation mode)
    pub stateless: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached images (default: 100)
    /// - `CACHE_TTL` - Freshness window in seconds (default: 1800)
    /// - `SERVER_PORT` - HTTP server port (default: 3001)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    /// - `FETCH_TIMEOUT` - Outbound timeout in seconds (default: 15)
    /// - `UPSTREAM_REFERER` - Referer for direct fetches
    /// - `UPSTREAM_USER_AGENT` - User-Agent for direct fetches
    /// - `FALLBACK_PROXY_URL` - Public proxy base URL
    /// - `FORCE_HTTPS` - Rewrite `http://` targets (default: true)
    /// - `STATELESS` - Disable the shared cache (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            fetch_timeout: parse_var("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            referer: env::var("UPSTREAM_REFERER").unwrap_or(defaults.referer),
            user_agent: env::var("UPSTREAM_USER_AGENT").unwrap_or(defaults.user_agent),
            fallback_proxy_url: env::var("FALLBACK_PROXY_URL")
                .unwrap_or(defaults.fallback_proxy_url),
            force_https: parse_var("FORCE_HTTPS").unwrap_or(defaults.force_https),
            stateless: parse_var("STATELESS").unwrap_or(defaults.stateless),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            cache_ttl: 1800,
            server_port: 3001,
            cleanup_interval: 60,
            fetch_timeout: 15,
            referer: DEFAULT_REFERER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fallback_proxy_url: DEFAULT_FALLBACK_PROXY_URL.to_string(),
            force_https: true,
            stateless: false,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
