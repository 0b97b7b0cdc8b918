//! ChatWork - typed client for the ChatWork v2 API
//!
//! Wraps the REST endpoints (account, rooms, messages, tasks, files,
//! contacts) in typed async methods and keeps the latest rate limit
//! snapshot reported by the server.
//!
//! ```no_run
//! # async fn run() -> chatwork::Result<()> {
//! let client = chatwork::ChatworkClient::from_env()?;
//! let me = client.me().await?;
//! println!("{} ({} requests left)", me.name, client.rate_limit().await.remaining);
//! # Ok(())
//! # }
//! ```
//!
//! The client is `Send + Sync`. Concurrent calls share one transport, and
//! the stored rate limit is whichever response was recorded last.

use bytes::Bytes;
use reqwest::Method;
use tokio::io::AsyncRead;
use tokio::sync::Mutex;

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use api::{Account, Contact, File, Me, Member, Message, MyTask, Room, Status, Task, TaskRoom};
pub use client::{HttpClient, Params, RateLimit};
pub use config::{ClientConfig, ConfigLoader, DEFAULT_BASE_URL};
pub use error::{ChatworkError, Result};

/// The main ChatWork client
pub struct ChatworkClient {
    /// HTTP client
    http_client: HttpClient,

    /// Serializes the first-access rate limit request
    first_fetch: Mutex<()>,
}

impl ChatworkClient {
    /// Create a client from a config object
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http_client: HttpClient::new(&config),
            first_fetch: Mutex::new(()),
        }
    }

    /// Create a client for `api_key` against the production endpoint
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ClientConfig::new(api_key))
    }

    /// Create a client from config files and the environment
    pub fn from_env() -> Result<Self> {
        let loader = ConfigLoader::new()?;
        Ok(Self::new(loader.into_config()?))
    }

    /// Create a client with a custom config path
    pub fn with_config_path(path: &str) -> Result<Self> {
        let loader = ConfigLoader::from_path(path)?;
        Ok(Self::new(loader.into_config()?))
    }

    /// Create a client that sends through an existing reqwest client
    pub fn with_transport(config: ClientConfig, transport: reqwest::Client) -> Self {
        Self {
            http_client: HttpClient::with_transport(&config, transport),
            first_fetch: Mutex::new(()),
        }
    }

    /// Get the HTTP client
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// GET `endpoint` with `params` in the query string
    pub async fn get(&self, endpoint: &str, params: &Params) -> Result<Bytes> {
        self.http_client.execute(Method::GET, endpoint, params).await
    }

    /// POST `endpoint` with `params` as a form body
    pub async fn post(&self, endpoint: &str, params: &Params) -> Result<Bytes> {
        self.http_client.execute(Method::POST, endpoint, params).await
    }

    /// PUT `endpoint` with `params` as a form body
    pub async fn put(&self, endpoint: &str, params: &Params) -> Result<Bytes> {
        self.http_client.execute(Method::PUT, endpoint, params).await
    }

    /// DELETE `endpoint` with `params` as a form body
    pub async fn delete(&self, endpoint: &str, params: &Params) -> Result<Bytes> {
        self.http_client
            .execute(Method::DELETE, endpoint, params)
            .await
    }

    /// POST a multipart upload of `file` with an accompanying message
    pub async fn post_file<R>(
        &self,
        endpoint: &str,
        message: &str,
        file_name: &str,
        file: R,
    ) -> Result<Bytes>
    where
        R: AsyncRead + Unpin,
    {
        self.http_client
            .upload(endpoint, message, file_name, file)
            .await
    }

    /// The latest rate limit reported by the API.
    ///
    /// Before any request has been made this issues one `GET /me` to obtain
    /// the headers, even when several callers arrive at once. A failure of
    /// that call is logged and yields a zero snapshot.
    pub async fn rate_limit(&self) -> RateLimit {
        if let Some(snapshot) = self.http_client.latest_rate_limit() {
            return snapshot;
        }

        let _guard = self.first_fetch.lock().await;
        // Another caller may have populated it while we waited
        if let Some(snapshot) = self.http_client.latest_rate_limit() {
            return snapshot;
        }

        if let Err(e) = self.me().await {
            tracing::warn!(error = %e, "rate limit request failed");
        }

        self.http_client.latest_rate_limit().unwrap_or_default()
    }
}
