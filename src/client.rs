//! updown API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on model types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::cache::AliasCache;
use crate::error::{Result, UpdownError};

const DEFAULT_API_URL: &str = "https://updown.io/api";
const USER_AGENT: &str = concat!("updown-rs/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "X-API-KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Low-level updown API client.
///
/// Handles authentication and HTTP requests. Resource operations are
/// implemented via the `Get`, `List`, `Add`, `Update` and `Remove` traits on
/// model types.
///
/// The client also owns the alias → token cache used by
/// [`Check::token_for_alias`](crate::Check::token_for_alias). Clones share
/// both the connection pool and that cache.
///
/// # Example
///
/// ```no_run
/// use updown::UpdownClient;
///
/// # fn example() -> updown::Result<()> {
/// // Create from environment variables
/// let client = UpdownClient::from_env()?;
///
/// // Or configure manually
/// let client = UpdownClient::new("your-api-key", "https://updown.io/api")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct UpdownClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: String,
    aliases: Arc<AliasCache>,
}

impl std::fmt::Debug for UpdownClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdownClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl UpdownClient {
    /// Create a client from environment variables.
    ///
    /// Uses `UPDOWN_API_KEY` for authentication and optionally
    /// `UPDOWN_API_URL` for the base URL (defaults to `https://updown.io/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if `UPDOWN_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("UPDOWN_API_KEY").map_err(|_| {
            UpdownError::ConfigMissing("UPDOWN_API_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("UPDOWN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&api_key, &base_url)
    }

    /// Create a new client with the provided API key and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        // Relative joins drop the last path segment unless it ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(UpdownError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: api_key.to_string(),
            aliases: Arc::new(AliasCache::new()),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up a cached alias without touching the network.
    ///
    /// Returns `None` if the alias has not been seen by the last check
    /// listing (or no listing has happened yet).
    pub async fn cached_token(&self, alias: &str) -> Option<String> {
        self.aliases.peek(alias).await
    }

    pub(crate) fn alias_cache(&self) -> &AliasCache {
        &self.aliases
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(UpdownError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(UpdownError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(UpdownError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(UpdownError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(UpdownError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(UpdownError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(UpdownError::ApiError {
            message,
            status_code: status.as_u16(),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // updown answers errors as {"error": "..."}
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

/// Removal endpoints answer `{"deleted": true}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct DeleteResponse {
    #[serde(default)]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = UpdownClient::new("secret-key", "https://updown.io/api").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("UpdownClient"));
        assert!(debug.contains("base_url"));
        // API key should not be in debug output
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = UpdownClient::new("key", "https://updown.io/api").unwrap();
        let client2 = UpdownClient::new("key", "https://updown.io/api/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(
            client1.base_url().join("checks").unwrap().as_str(),
            "https://updown.io/api/checks"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = UpdownClient::new("key", "not a url");
        assert!(matches!(result, Err(UpdownError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_clones_share_alias_cache() {
        let client = UpdownClient::new("key", "https://updown.io/api").unwrap();
        let clone = client.clone();

        client.alias_cache().replace([("web", "abcd")]).await;

        assert_eq!(clone.cached_token("web").await.as_deref(), Some("abcd"));
    }
}
