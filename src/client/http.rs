//! HTTP Client
//!
//! Builds authenticated requests, executes them, records the rate limit
//! headers, and decodes the API's error payload.

use crate::client::multipart::upload_form;
use crate::client::rate_limiter::{RateLimit, RateLimitTracker};
use crate::config::ClientConfig;
use crate::error::{ChatworkError, Result};
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio::sync::OnceCell;

/// Authentication header sent with every request
pub const TOKEN_HEADER: &str = "x-chatworktoken";

/// Flat request parameters
pub type Params = HashMap<String, String>;

/// Error payload returned on non-200 responses
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// HTTP client bound to one API key
pub struct HttpClient {
    /// API credential
    api_key: String,

    /// Base URL every endpoint is appended to
    base_url: String,

    /// Transport timeout, if configured
    timeout: Option<Duration>,

    /// Inner reqwest client, created on first use
    transport: OnceCell<Client>,

    /// Latest rate limit snapshot
    rate_limiter: RateLimitTracker,
}

impl HttpClient {
    /// Create a new HTTP client. The transport is built lazily.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            transport: OnceCell::new(),
            rate_limiter: RateLimitTracker::new(),
        }
    }

    /// Create a client that uses an already configured reqwest client
    pub fn with_transport(config: &ClientConfig, transport: Client) -> Self {
        Self {
            transport: OnceCell::new_with(Some(transport)),
            ..Self::new(config)
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the rate limiter
    pub fn rate_limiter(&self) -> &RateLimitTracker {
        &self.rate_limiter
    }

    async fn transport(&self) -> Result<&Client> {
        self.transport
            .get_or_try_init(|| async move {
                let mut builder = Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(|e| {
                    ChatworkError::Config(format!("Failed to create HTTP client: {}", e))
                })
            })
            .await
    }

    fn token(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.api_key)
            .map_err(|e| ChatworkError::Config(format!("Invalid API key format: {}", e)))
    }

    /// Build a request for `endpoint`.
    ///
    /// GET parameters go into the query string as raw `key=value` pairs
    /// joined with `&`. Values are not percent-encoded here, so a value
    /// containing `&` or `=` will split into extra pairs. Other methods send
    /// the parameters as a form-urlencoded body.
    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
    ) -> Result<Request> {
        let mut raw_url = format!("{}{}", self.base_url, endpoint);
        let form = if method == Method::GET {
            if !params.is_empty() {
                let query: Vec<String> =
                    params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                raw_url.push('?');
                raw_url.push_str(&query.join("&"));
            }
            None
        } else {
            let body = serde_urlencoded::to_string(params).map_err(|e| {
                ChatworkError::InvalidRequest(format!("Failed to encode form body: {}", e))
            })?;
            Some(body)
        };

        let url = Url::parse(&raw_url)
            .map_err(|e| ChatworkError::InvalidRequest(format!("Invalid URL {}: {}", raw_url, e)))?;

        let mut request = Request::new(method, url);
        if let Some(body) = form {
            request.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
            *request.body_mut() = Some(body.into());
        }
        request.headers_mut().insert(TOKEN_HEADER, self.token()?);

        Ok(request)
    }

    /// Build a multipart POST carrying `message` and the contents of `file`
    pub async fn build_upload<R>(
        &self,
        endpoint: &str,
        message: &str,
        file_name: &str,
        file: R,
    ) -> Result<Request>
    where
        R: AsyncRead + Unpin,
    {
        let form = upload_form(message, file_name, file).await?;
        let url = format!("{}{}", self.base_url, endpoint);

        // RequestBuilder::multipart sets the boundary content type
        let request = self
            .transport()
            .await?
            .post(url)
            .header(TOKEN_HEADER, self.token()?)
            .multipart(form)
            .build()?;

        Ok(request)
    }

    /// Execute `method` against `endpoint`
    pub async fn execute(&self, method: Method, endpoint: &str, params: &Params) -> Result<Bytes> {
        let request = self.build_request(method, endpoint, params)?;
        self.send(request).await
    }

    /// Upload a file to `endpoint`
    pub async fn upload<R>(
        &self,
        endpoint: &str,
        message: &str,
        file_name: &str,
        file: R,
    ) -> Result<Bytes>
    where
        R: AsyncRead + Unpin,
    {
        let request = self.build_upload(endpoint, message, file_name, file).await?;
        self.send(request).await
    }

    /// Send a built request, record its rate limit headers, and decode the
    /// response.
    pub async fn send(&self, request: Request) -> Result<Bytes> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.transport().await?.execute(request).await;

        let response = match response {
            Ok(resp) => {
                self.rate_limiter.update_from_response(Some(resp.headers()));
                resp
            }
            Err(e) => {
                self.rate_limiter.update_from_response(None);
                tracing::warn!(error = %e, "request failed before a response was received");
                return Err(e.into());
            }
        };

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        let body = response.bytes().await.map_err(std::io::Error::other);
        decode_response(status, body)
    }

    /// The last recorded snapshot, if any
    pub fn latest_rate_limit(&self) -> Option<RateLimit> {
        self.rate_limiter.latest()
    }
}

/// Turn a status and fully read body into the caller's result.
///
/// Only 200 counts as success. A non-200 response whose error list is empty
/// or unreadable yields an empty body and no error.
pub fn decode_response(status: StatusCode, body: std::io::Result<Bytes>) -> Result<Bytes> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read response body");
            return Err(e.into());
        }
    };

    if status != StatusCode::OK {
        let payload: ApiErrorBody = serde_json::from_slice(&body).unwrap_or_default();
        if payload.errors.is_empty() {
            tracing::warn!(
                status = status.as_u16(),
                "non-success response without error messages"
            );
            return Ok(Bytes::new());
        }
        return Err(ChatworkError::Api {
            status: status.as_u16(),
            errors: payload.errors,
        });
    }

    Ok(body)
}
