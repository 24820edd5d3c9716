use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use url::Url;

use super::api_client::{ApiClient, ApiError, HttpMethod, QueryParams};

/// `ApiClient` backed by a pooled reqwest client.
pub struct ReqwestApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ReqwestApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Network(format!("Invalid path {}: {}", path, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &QueryParams,
        body: Option<&Value>,
        auth: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.build_url(path, params)?;
        debug!("{} {}", method.as_str(), url);

        let mut request = match method {
            HttpMethod::Get => self.http_client.get(url),
            HttpMethod::Post => self.http_client.post(url),
            HttpMethod::Put => self.http_client.put(url),
            HttpMethod::Delete => self.http_client.delete(url),
        };
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(auth) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("{} {} failed with {}", method.as_str(), path, status);
            return Err(ApiError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{} (path: {})", e, path)))
    }
}
