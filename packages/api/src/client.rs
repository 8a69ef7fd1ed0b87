//! # HTTP client for the marketplace REST API
//!
//! [`HttpApi`] is a cheap-to-clone handle around a shared `reqwest::Client`,
//! the API base URL and the current bearer token. Clones share the token slot,
//! so updating it on one handle (e.g. from a session observer) affects every
//! clone.
//!
//! Relative paths are joined onto the base URL, which is normalised to end in
//! `/` so that `http://host/api` + `notifications/user/7` keeps the `/api`
//! prefix.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";

#[derive(Clone, Debug)]
pub struct HttpApi {
    http: reqwest::Client,
    base: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client whose requests fail with [`ApiError::Network`] after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::Validation(format!("invalid base URL {base_url:?}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http,
            base,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Set or clear the token sent as `Authorization: Bearer ...`.
    pub fn set_bearer_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Validation(format!("invalid path {path:?}: {e}")))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "api request");
        let mut request = self.http.request(method, url);
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Network(format!("unreadable response: {e}")))
    }

    pub(crate) async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);
        tracing::debug!(%status, %error, "api request failed");
        Err(error)
    }
}
