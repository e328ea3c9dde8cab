//! HTTP client for the ShareIt server.
//!
//! The gateway never interprets server responses: status and JSON body are
//! relayed unchanged, errors included.

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, GatewayResult};
use axum::{
    body::Bytes,
    http::{Method, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_helpers::{Page, SHARER_USER_ID_HEADER};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// One request to forward.
#[derive(Debug, Clone)]
pub struct Call {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    user_id: Option<i64>,
    body: Option<serde_json::Value>,
}

impl Call {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            user_id: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets `X-Sharer-User-Id`.
    pub fn user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn page(self, page: Page) -> Self {
        self.query("from", page.from).query("size", page.size)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> GatewayResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Clone)]
pub struct ServerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `call` and turns the server's reply into a response.
    #[instrument(skip(self, call), fields(method = %call.method, path = %call.path))]
    pub async fn forward(&self, call: Call) -> GatewayResult<Response> {
        let url = format!("{}{}", self.base_url, call.path);

        let mut request = self.client.request(call.method, &url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(user_id) = call.user_id {
            request = request.header(SHARER_USER_ID_HEADER, user_id);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "ShareIt server request failed");
            GatewayError::Unreachable(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(GatewayError::Unreachable)?;
        debug!(status = %status, bytes = body.len(), "ShareIt server replied");

        Ok(relay(status, body))
    }

    /// `GET /health` on the server, for the gateway's readiness probe.
    pub async fn ping(&self) -> Result<(), String> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| format!("ShareIt server unreachable: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("ShareIt server health returned {}", response.status()))
        }
    }
}

fn relay(status: reqwest::StatusCode, body: Bytes) -> Response {
    if body.is_empty() {
        return status.into_response();
    }
    (status, [(CONTENT_TYPE, "application/json")], body).into_response()
}
