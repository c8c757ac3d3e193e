//! HTTP client for the duties API
//!
//! GET responses may be served from a local TTL cache; any successful write
//! (and any 204) clears that cache so later reads see the change.

use async_trait::async_trait;
use reqwest::{header, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{ClientError, DutyService, GetDutiesParams};
use crate::cache::{TtlCache, CLIENT_CACHE_TTL, DEFAULT_MAX_ENTRIES};
use crate::models::{Duty, DutyPage};

const DUTIES_ENDPOINT: &str = "/duties";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Mutex<TtlCache<Value>>,
}

impl ApiClient {
    /// Creates a client for the API served at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_cache(base_url, TtlCache::new(CLIENT_CACHE_TTL, DEFAULT_MAX_ENTRIES))
    }

    /// Creates a client with a caller-supplied response cache.
    pub fn with_cache(base_url: impl Into<String>, cache: TtlCache<Value>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Mutex::new(cache),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.invalidate(None);
        debug!("API cache cleared");
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    /// Sends one request and decodes the JSON answer.
    ///
    /// Returns `Ok(None)` for 204 responses.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        use_cache: bool,
    ) -> Result<Option<T>, ClientError> {
        let cacheable = method == Method::GET && use_cache;
        let body_key = body.as_ref().map_or_else(|| "{}".to_string(), Value::to_string);
        let cache_key = format!("{}:{}:{}", method, endpoint, body_key);

        if cacheable {
            if let Some(cached) = self.cache.lock().await.get(&cache_key) {
                debug!("Serving from cache: {}", cache_key);
                return Ok(Some(serde_json::from_value(cached)?));
            }
        }

        let url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                format!("Server responded with status: {}", status.as_u16())
            } else {
                text
            };
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            self.clear_cache().await;
            return Ok(None);
        }

        let value: Value = response.json().await?;

        if cacheable {
            self.cache.lock().await.set(cache_key, value.clone());
        }
        if method != Method::GET {
            self.clear_cache().await;
        }

        Ok(Some(serde_json::from_value(value)?))
    }

    async fn expect_body<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        use_cache: bool,
    ) -> Result<T, ClientError> {
        self.request(method, endpoint, body, use_cache)
            .await?
            .ok_or_else(|| ClientError::EmptyResponse(endpoint.to_string()))
    }

    /// Fetches one duty, served from the cache while fresh.
    pub async fn get_duty(&self, id: Uuid) -> Result<Duty, ClientError> {
        self.expect_body(Method::GET, &format!("{}/{}", DUTIES_ENDPOINT, id), None, true)
            .await
    }
}

#[async_trait]
impl DutyService for ApiClient {
    /// Lists are always fetched fresh so paging reflects recent writes.
    async fn get_duties(&self, params: &GetDutiesParams) -> Result<DutyPage, ClientError> {
        let endpoint = format!("{}?{}", DUTIES_ENDPOINT, params.to_query_string());
        self.expect_body(Method::GET, &endpoint, None, false).await
    }

    async fn create_duty(&self, name: &str) -> Result<Duty, ClientError> {
        self.expect_body(Method::POST, DUTIES_ENDPOINT, Some(json!({ "name": name })), true)
            .await
    }

    async fn update_duty(&self, id: Uuid, name: &str) -> Result<Duty, ClientError> {
        let endpoint = format!("{}/{}", DUTIES_ENDPOINT, id);
        self.expect_body(Method::PUT, &endpoint, Some(json!({ "name": name })), true)
            .await
    }

    async fn delete_duty(&self, id: Uuid) -> Result<(), ClientError> {
        let endpoint = format!("{}/{}", DUTIES_ENDPOINT, id);
        self.request::<Value>(Method::DELETE, &endpoint, None, true)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[tokio::test]
    async fn test_invalid_base_url() {
        let client = ApiClient::new("not a url");
        let result = client.get_duty(Uuid::new_v4()).await;
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let client = ApiClient::new("http://127.0.0.1:9");
        let result = client.create_duty("Nobody listens").await;
        assert!(matches!(result, Err(ClientError::Network(_))));
        assert_eq!(client.cached_entries().await, 0);
    }
}
