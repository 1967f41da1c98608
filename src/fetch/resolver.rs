//! Fetch Resolver
//!
//! Fetches a remote image directly with hotlink-friendly headers, falling
//! back to a public re-encoding proxy when the origin refuses.

use std::borrow::Cow;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use crate::cache::DEFAULT_CONTENT_TYPE;
use crate::config::Config;
use crate::error::{FetchError, ProxyError};

/// Image bytes plus the content type the upstream declared.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub payload: Bytes,
    pub content_type: String,
}

// == Fetch Resolver ==
/// Two-stage image fetcher: direct origin request, then public proxy.
#[derive(Debug, Clone)]
pub struct FetchResolver {
    client: Client,
    referer: String,
    user_agent: String,
    fallback_proxy_url: String,
    force_https: bool,
}

impl FetchResolver {
    /// Builds a resolver whose HTTP client enforces `config.fetch_timeout`
    /// on every outbound request.
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout))
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            referer: config.referer.clone(),
            user_agent: config.user_agent.clone(),
            fallback_proxy_url: config.fallback_proxy_url.clone(),
            force_https: config.force_https,
        })
    }

    // == Resolve ==
    /// Fetches `target`, trying the origin first and the fallback proxy second.
    ///
    /// Only the fallback's failure is reported; a failed direct attempt is
    /// logged and otherwise invisible to the caller.
    pub async fn resolve(&self, target: &str) -> Result<FetchedImage, FetchError> {
        match self.fetch_direct(target).await {
            Ok(image) => {
                debug!(url = %target, "direct fetch succeeded");
                Ok(image)
            }
            Err(err) => {
                info!(url = %target, error = %err, "direct fetch failed, using fallback proxy");
                match self.fetch_fallback(target).await {
                    Ok(image) => {
                        debug!(url = %target, "fallback proxy succeeded");
                        Ok(image)
                    }
                    Err(err) => {
                        warn!(url = %target, error = %err, "fallback proxy failed");
                        Err(err)
                    }
                }
            }
        }
    }

    /// URL the direct attempt is sent to.
    pub fn direct_url<'a>(&self, target: &'a str) -> Cow<'a, str> {
        if self.force_https {
            upgrade_to_https(target)
        } else {
            Cow::Borrowed(target)
        }
    }

    /// URL of the fallback proxy request for the original `target`.
    pub fn fallback_url(&self, target: &str) -> String {
        let separator = if self.fallback_proxy_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}url={}",
            self.fallback_proxy_url,
            separator,
            urlencoding::encode(target)
        )
    }

    async fn fetch_direct(&self, target: &str) -> Result<FetchedImage, FetchError> {
        let url = self.direct_url(target);
        debug!(url = %url, "fetching image directly");

        let response = self
            .client
            .get(url.as_ref())
            .header(USER_AGENT, &self.user_agent)
            .header(REFERER, &self.referer)
            .send()
            .await?;

        read_image(response).await
    }

    async fn fetch_fallback(&self, target: &str) -> Result<FetchedImage, FetchError> {
        let response = self.client.get(self.fallback_url(target)).send().await?;
        read_image(response).await
    }
}

async fn read_image(response: Response) -> Result<FetchedImage, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let payload = response.bytes().await?;

    Ok(FetchedImage {
        payload,
        content_type,
    })
}

/// Rewrites an `http://` URL to `https://`; anything else is returned as is.
pub fn upgrade_to_https(url: &str) -> Cow<'_, str> {
    const HTTP: &str = "http://";

    match url.get(..HTTP.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(HTTP) => {
            Cow::Owned(format!("https://{}", &url[HTTP.len()..]))
        }
        _ => Cow::Borrowed(url),
    }
}
