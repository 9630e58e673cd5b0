//! Client configuration.

use crate::error::{ClientError, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Default base URL for metadata, content and session endpoints.
pub const DEFAULT_API_URL: &str = "https://view-api.box.com/1";
/// Default base URL for multipart document uploads.
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.view-api.box.com/1";
/// Default base URL for viewer session pages.
pub const DEFAULT_SESSION_URL: &str = "https://view-api.box.com/1/sessions";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`Client`](crate::Client).
///
/// The API key is the only required value. Endpoint URLs default to the
/// public Box View API and are mostly overridden in tests.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    upload_url: String,
    session_url: String,
    timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("upload_url", &self.upload_url)
            .field("session_url", &self.session_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with default endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "API key is required".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_API_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            session_url: DEFAULT_SESSION_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BOX_VIEW_API_KEY`: API key (required)
    /// - `BOX_VIEW_API_URL`: metadata/content base URL
    /// - `BOX_VIEW_UPLOAD_URL`: upload base URL
    /// - `BOX_VIEW_SESSION_URL`: viewer session base URL
    /// - `BOX_VIEW_TIMEOUT_SECS`: request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `BOX_VIEW_API_KEY` is unset
    /// or empty, or if the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("BOX_VIEW_API_KEY").unwrap_or_default();
        let mut config = Self::new(api_key)?;

        if let Ok(url) = env::var("BOX_VIEW_API_URL") {
            config.base_url = url;
        }
        if let Ok(url) = env::var("BOX_VIEW_UPLOAD_URL") {
            config.upload_url = url;
        }
        if let Ok(url) = env::var("BOX_VIEW_SESSION_URL") {
            config.session_url = url;
        }
        if let Ok(secs) = env::var("BOX_VIEW_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                ClientError::InvalidArgument(format!(
                    "BOX_VIEW_TIMEOUT_SECS must be a number of seconds, got: {}",
                    secs
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the metadata/content base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the upload base URL.
    #[must_use]
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    /// Override the viewer session base URL.
    #[must_use]
    pub fn with_session_url(mut self, url: impl Into<String>) -> Self {
        self.session_url = url.into();
        self
    }

    /// Set the timeout applied to every request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Metadata/content base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload base URL.
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Viewer session base URL.
    pub fn session_url(&self) -> &str {
        &self.session_url
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that every endpoint is an http(s) URL.
    pub(crate) fn validate(&self) -> Result<()> {
        for url in [&self.base_url, &self.upload_url, &self.session_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClientError::InvalidUrl(format!(
                    "URL must start with http:// or https://, got: {}",
                    url
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_endpoints() {
        let config = ClientConfig::new("key").unwrap();
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert_eq!(config.upload_url(), DEFAULT_UPLOAD_URL);
        assert_eq!(config.session_url(), DEFAULT_SESSION_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            ClientConfig::new(""),
            Err(ClientError::InvalidArgument(_))
        ));
        assert!(matches!(
            ClientConfig::new("   "),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_non_http_urls() {
        let config = ClientConfig::new("key")
            .unwrap()
            .with_upload_url("upload.example.com");
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        let config = ClientConfig::new("key")
            .unwrap()
            .with_base_url("http://localhost:9000");
        assert!(config.validate().is_ok());
    }
}
