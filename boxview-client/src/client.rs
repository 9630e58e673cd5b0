//! Core Box View client implementation.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::format::mimetype_from_content_type;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A client for the Box View API.
///
/// The client owns one HTTP connection pool that carries the API key on
/// every request. Clone it to share the pool.
///
/// # Example
///
/// ```no_run
/// use boxview_client::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("my-api-key")?;
///
/// let documents = client.get_documents(&Default::default()).await?;
/// println!("{} documents", documents.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    /// Endpoint and credential settings.
    config: ClientConfig,
    /// HTTP client with the authorization header preset.
    http: HttpClient,
}

impl Client {
    /// Create a client for the public Box View API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    /// Create a client configured from `BOX_VIEW_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `BOX_VIEW_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint URL is invalid, the API key cannot be
    /// sent as a header, or the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut auth = HeaderValue::from_str(&format!("Token {}", config.api_key()))
            .map_err(|_| {
                ClientError::InvalidArgument(
                    "API key contains characters not allowed in a header".to_string(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a full API URL from a path.
    fn url(&self, path: &str) -> String {
        join_url(self.config.base_url(), path)
    }

    /// Build a full upload URL from a path.
    fn upload_url(&self, path: &str) -> String {
        join_url(self.config.upload_url(), path)
    }

    async fn send(&self, method: Method, url: &str, builder: RequestBuilder) -> Result<Response> {
        tracing::debug!(method = %method, url = %url, "Sending Box View request");
        let response = builder.send().await.map_err(ClientError::Http)?;
        tracing::debug!(
            method = %method,
            url = %url,
            status = response.status().as_u16(),
            "Received Box View response"
        );
        Ok(response)
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        self.send(Method::GET, &url, self.http.get(&url)).await
    }

    /// Execute a HEAD request.
    pub(crate) async fn head(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        self.send(Method::HEAD, &url, self.http.head(&url)).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T>(&self, path: &str, body: &T) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(Method::POST, &url, self.http.post(&url).json(body)).await
    }

    /// Execute a multipart POST against the upload endpoint.
    pub(crate) async fn post_multipart(&self, path: &str, form: Form) -> Result<Response> {
        let url = self.upload_url(path);
        self.send(Method::POST, &url, self.http.post(&url).multipart(form)).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T>(&self, path: &str, body: &T) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(Method::PUT, &url, self.http.put(&url).json(body)).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        self.send(Method::DELETE, &url, self.http.delete(&url)).await
    }

    /// Check the status against `expected` and deserialize the JSON body.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self.expect_status(response, expected).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ClientError::Deserialize)
    }

    /// Handle a response that must be exactly 204 No Content.
    pub(crate) async fn handle_no_content(&self, response: Response) -> Result<()> {
        self.expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Pass through a response with the expected status, turn anything
    /// else (other 2xx included) into a remote error.
    pub(crate) async fn expect_status(
        &self,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response> {
        if response.status() == expected {
            Ok(response)
        } else {
            Err(remote_error(response).await)
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Build a [`ClientError::Remote`] from a failed response.
///
/// The message is the `message` or `error` field of a JSON body, else the
/// raw body, else the status reason phrase.
pub(crate) async fn remote_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => json["message"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .map(str::to_string)
            .unwrap_or(body),
        Err(_) => body,
    };
    let message = if message.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        message
    };

    tracing::warn!(status = status.as_u16(), message = %message, "Box View request failed");

    ClientError::Remote {
        status: status.as_u16(),
        message,
    }
}

/// Read the media type from a response's `Content-Type` header.
pub(crate) fn response_mimetype(response: &Response) -> Result<String> {
    let value = response
        .headers()
        .get(CONTENT_TYPE)
        .ok_or_else(|| ClientError::InvalidResponse("missing Content-Type header".to_string()))?;
    let value = value.to_str().map_err(|_| {
        ClientError::InvalidResponse("Content-Type header is not valid ASCII".to_string())
    })?;
    Ok(mimetype_from_content_type(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = Client::new("test-key").unwrap();
        assert_eq!(client.config().base_url(), crate::config::DEFAULT_API_URL);
    }

    #[test]
    fn test_client_requires_api_key() {
        assert!(matches!(
            Client::new(""),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_client_rejects_header_unsafe_key() {
        assert!(matches!(
            Client::new("bad\nkey"),
            Err(ClientError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_client_invalid_url() {
        let config = ClientConfig::new("key").unwrap().with_base_url("not-a-url");
        assert!(matches!(
            Client::with_config(config),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_building() {
        let config = ClientConfig::new("key")
            .unwrap()
            .with_base_url("http://localhost:8080/1/")
            .with_upload_url("http://localhost:8081/1");
        let client = Client::with_config(config).unwrap();
        assert_eq!(client.url("documents"), "http://localhost:8080/1/documents");
        assert_eq!(client.url("/documents"), "http://localhost:8080/1/documents");
        assert_eq!(
            client.upload_url("documents"),
            "http://localhost:8081/1/documents"
        );
    }
}
