// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authenticated JSON requests against the finance API.
//!
//! Every call reads the bearer token from the [`TokenStore`] right before the
//! request goes out, serializes the body as JSON and maps any non-success
//! status into an [`ApiError`]. Nothing is retried at this level.

use crate::config::Config;
use crate::db::TokenStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const UA: &str = concat!(
    "tally/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/tally)"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
        }
    }
}

pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Error surfaced to callers for every failed request.
///
/// `status` is `0` when no response reached the client, otherwise the HTTP
/// status returned by the server. `data` carries the raw error payload.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub data: Value,
}

impl ApiError {
    pub fn transport(err: &TransportError) -> Self {
        ApiError {
            message: err.message.clone(),
            status: 0,
            data: Value::String(err.message.clone()),
        }
    }

    pub fn from_response(resp: &HttpResponse) -> Self {
        let data: Value =
            serde_json::from_str(&resp.body).unwrap_or_else(|_| Value::Object(Default::default()));
        let message = data
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| resp.status_text.clone());
        ApiError {
            message,
            status: resp.status,
            data,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status == 0
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Blocking reqwest transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(UA)
            .build()?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .text()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            body,
        })
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            base_url,
            transport,
            tokens,
        }
    }

    pub fn from_config(config: &Config, tokens: Arc<dyn TokenStore>) -> reqwest::Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(config.api_url.clone(), Arc::new(transport), tokens))
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request against `path`, relative to the base URL.
    pub fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(b) => Some(serde_json::to_string(b).map_err(|e| ApiError {
                message: format!("could not serialize request body: {e}"),
                status: 0,
                data: Value::Null,
            })?),
            None => None,
        };
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer: self.tokens.current(),
            body,
        };
        debug!(%method, path, authenticated = request.bearer.is_some(), "api request");

        let resp = match self.transport.send(request) {
            Ok(r) => r,
            Err(e) => {
                warn!(%method, path, error = %e, "request did not reach the server");
                return Err(ApiError::transport(&e));
            }
        };

        if !resp.is_success() {
            let err = ApiError::from_response(&resp);
            warn!(%method, path, status = err.status, message = %err.message, "api error");
            return Err(err);
        }

        decode_body(&resp)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, Value>(Method::Get, path, None)
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::Post, path, Some(body))
    }

    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::Put, path, Some(body))
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, Value>(Method::Delete, path, None)
    }
}

fn decode_body<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, ApiError> {
    if resp.is_json() && !resp.body.trim().is_empty() {
        return serde_json::from_str(&resp.body).map_err(|e| ApiError {
            message: format!("could not decode response: {e}"),
            status: 0,
            data: Value::String(resp.body.clone()),
        });
    }
    empty_value()
}

/// The value a body-less response decodes to: `{}` when `T` accepts an empty
/// object, otherwise `null`.
fn empty_value<T: DeserializeOwned>() -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(Default::default()))
        .or_else(|_| serde_json::from_value(Value::Null))
        .map_err(|e| ApiError {
            message: format!("response had no JSON content: {e}"),
            status: 0,
            data: Value::Null,
        })
}
