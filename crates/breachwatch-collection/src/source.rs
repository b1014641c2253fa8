//! Where the breach list comes from.
//!
//! A [`BreachSource`] performs exactly one fetch per call and hands back the
//! raw JSON records; coercion and validation happen in the loader.

use crate::error::{CollectionError, Result};
use async_trait::async_trait;
use breachwatch_core::SourceConfig;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// A provider of the raw breach list.
#[async_trait]
pub trait BreachSource: Send + Sync {
    /// Fetch the list once.
    async fn fetch(&self) -> Result<Vec<Value>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Fetches the list with a single HTTP GET.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source for the endpoint described by `config`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let url = config.endpoint();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| CollectionError::Transport {
                url: url.clone(),
                source,
            })?;

        Ok(Self { client, url })
    }

    /// The endpoint this source requests.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BreachSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Value>> {
        debug!(url = %self.url, "fetching breach list");

        let transport = |source| CollectionError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectionError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let value: Value = serde_json::from_slice(&body).map_err(|e| CollectionError::Decode {
            message: format!("response from {} is not JSON: {e}", self.url),
        })?;

        into_records(value)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Serves a list held in memory, for fixtures and local files.
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: Value,
    origin: String,
}

impl StaticSource {
    /// Serve an already-parsed JSON body.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self {
            body,
            origin: "memory".to_string(),
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let body = serde_json::from_str(json).map_err(|e| CollectionError::Decode {
            message: format!("not JSON: {e}"),
        })?;
        Ok(Self::new(body))
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut source = Self::from_json_str(&contents)?;
        source.origin = path.display().to_string();
        Ok(source)
    }
}

#[async_trait]
impl BreachSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Value>> {
        into_records(self.body.clone())
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}

fn into_records(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(CollectionError::Decode {
            message: format!("expected a JSON array of breaches, got {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
