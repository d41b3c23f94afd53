//! Authenticated wallet API client.
//!
//! # Responsibilities
//! - Resolve endpoints against the version prefix
//! - Serialize the body once and sign exactly that string
//! - Issue one HTTP attempt per call, bounded by the configured timeout
//! - Fold every outcome into an [`ApiResult`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::auth::RequestBuilder;
use crate::client::types::{ApiFailure, ApiResult, ClientError, ClientResult};
use crate::config::{ApiConfig, Credentials};

/// One authenticated call against the wallet API.
///
/// Implementations never panic or return early with an error: every outcome,
/// including transport faults, is an [`ApiResult`].
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    async fn call(&self, method: Method, endpoint: &str, body: Option<Value>) -> ApiResult;
}

/// HTTP client for the wallet API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_prefix: String,
    signer: RequestBuilder,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Fails if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, credentials: Credentials) -> ClientResult<Self> {
        Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        tracing::debug!(
            base_url = %config.base_url,
            api_prefix = %config.api_prefix,
            access_key = %credentials.access_key,
            "API client initialized"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_prefix: config.api_prefix.clone(),
            signer: RequestBuilder::new(credentials),
        })
    }

    /// Full request path (prefix + endpoint), as signed.
    pub fn request_path(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_prefix, endpoint)
    }

    /// Authenticated GET.
    pub async fn get(&self, endpoint: &str) -> ApiResult {
        self.call(Method::GET, endpoint, None).await
    }

    /// Authenticated POST with a JSON body.
    pub async fn post(&self, endpoint: &str, body: Value) -> ApiResult {
        self.call(Method::POST, endpoint, Some(body)).await
    }
}

#[async_trait]
impl ExchangeApi for ApiClient {
    async fn call(&self, method: Method, endpoint: &str, body: Option<Value>) -> ApiResult {
        let path = self.request_path(endpoint);

        let body_string = match body.as_ref().map(serde_json::to_string).transpose() {
            Ok(body_string) => body_string,
            Err(e) => {
                return ApiResult::Failure(ApiFailure::request(format!(
                    "failed to serialize request body: {}",
                    e
                )))
            }
        };

        let signed = match self
            .signer
            .build_headers(method.as_str(), &path, body_string.as_deref(), None)
        {
            Ok(signed) => signed,
            Err(e) => return ApiResult::Failure(ApiFailure::request(e.to_string())),
        };

        let url = format!("{}{}", self.base_url, signed.path);
        let mut request = self.http.request(method.clone(), &url);
        for (name, value) in &signed.headers {
            request = request.header(*name, value.as_str());
        }
        if let Some(body) = signed.body {
            request = request.body(body);
        }

        tracing::debug!(method = %method, path = %path, "Sending request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let failure = ApiFailure::transport(&e);
                tracing::warn!(method = %method, path = %path, error = %failure, "Request failed");
                return ApiResult::Failure(failure);
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let failure = ApiFailure::transport(&e);
                tracing::warn!(method = %method, path = %path, error = %failure, "Failed to read response");
                return ApiResult::Failure(failure);
            }
        };

        let result = ApiResult::from_response(status, &text);
        match &result {
            ApiResult::Success(_) => {
                tracing::debug!(method = %method, path = %path, status = status.as_u16(), "Request succeeded");
            }
            ApiResult::Failure(failure) => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    error = %failure,
                    "Request rejected"
                );
            }
        }
        result
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_prefix", &self.api_prefix)
            .field("access_key", &self.signer.access_key())
            .finish()
    }
}
