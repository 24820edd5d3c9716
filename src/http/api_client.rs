use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Ordered query parameters. Order is insertion order, so building the same
/// criteria twice yields byte-identical query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Backend answered with a non-success status.
    Status { code: u16, body: String },
    /// Connection, timeout or TLS failure.
    Network(String),
    /// Body was not the JSON we expected.
    Decode(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Pulls `message`/`error` out of a JSON error body, if the backend sent one.
    pub fn backend_message(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let parsed: Value = serde_json::from_str(body).ok()?;
        parsed
            .get("message")
            .or_else(|| parsed.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { code, body } => write!(f, "HTTP {}: {}", code, body),
            ApiError::Network(err) => write!(f, "Network error: {}", err),
            ApiError::Decode(err) => write!(f, "Decode error: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

/// Seam between the search pipeline and the travel-booking backend.
///
/// Paths are relative to the configured API base (`tours`, `transport/companies`, ...).
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &QueryParams,
        body: Option<&Value>,
        auth: Option<&str>,
    ) -> Result<Value, ApiError>;

    async fn get_json(&self, path: &str, params: &QueryParams) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, path, params, None, None).await
    }

    async fn send_json(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request(method, path, &QueryParams::new(), body, None)
            .await
    }
}
