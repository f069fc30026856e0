//! Request builder, response parser and executor for the short-link API.
//!
//! # Design
//! `ShortLinkClient` holds only its configuration and a transport; it carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The executing methods (`create_short_link` and friends)
//! run `build_*`, the transport, then `parse_*`, so all four share one
//! success / application-error / transport-error contract.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::credential::{bearer, resolve_credential};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{AnalyticsRecord, ErrorPayload, ShortLinkRecord, TargetUrl};

/// The four backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Analytics,
}

impl Operation {
    /// Message reported when a non-2xx response carries no usable payload.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to generate short URL",
            Operation::Update => "Failed to update URL",
            Operation::Delete => "Failed to delete URL",
            Operation::Analytics => "Failed to get analytics",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Analytics => "analytics",
        };
        f.write_str(name)
    }
}

/// Client for the short-link backend.
///
/// `credential` arguments override the configured default when non-empty.
#[derive(Clone)]
pub struct ShortLinkClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ShortLinkClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> ShortLinkClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_create_short_link(
        &self,
        target_url: &str,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(target_url)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint(&["urls"])?,
            headers: self.headers(credential, true),
            body: Some(body),
        })
    }

    pub fn build_update_short_link(
        &self,
        short_code: &str,
        target_url: &str,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(target_url)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.endpoint(&["urls", checked_code(short_code)?])?,
            headers: self.headers(credential, true),
            body: Some(body),
        })
    }

    pub fn build_delete_short_link(
        &self,
        short_code: &str,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.endpoint(&["urls", checked_code(short_code)?])?,
            headers: self.headers(credential, false),
            body: None,
        })
    }

    pub fn build_get_analytics(
        &self,
        short_code: &str,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["analytics", checked_code(short_code)?])?,
            headers: self.headers(credential, false),
            body: None,
        })
    }

    pub fn parse_create_short_link(&self, response: HttpResponse) -> Result<ShortLinkRecord, ApiError> {
        check_status(&response, Operation::Create)?;
        decode(&response)
    }

    pub fn parse_update_short_link(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, Operation::Update)
    }

    pub fn parse_delete_short_link(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, Operation::Delete)
    }

    pub fn parse_get_analytics(&self, response: HttpResponse) -> Result<AnalyticsRecord, ApiError> {
        check_status(&response, Operation::Analytics)?;
        decode(&response)
    }

    /// Base URL plus `segments`, each percent-encoded as a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<String, ApiError> {
        let mut url = self.config.base().clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest("base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn headers(&self, credential: Option<&str>, json_body: bool) -> Vec<(String, String)> {
        let token = resolve_credential(credential, self.config.default_api_key());
        if token.is_empty() {
            warn!("no API key supplied and no default configured");
        }
        let mut headers = Vec::with_capacity(2);
        if json_body {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        headers.push(("authorization".to_string(), bearer(token)));
        headers
    }
}

impl<T: Transport> ShortLinkClient<T> {
    /// Creates a short link for `target_url`.
    ///
    /// The target is not validated locally; the backend decides.
    pub fn create_short_link(
        &self,
        target_url: &str,
        credential: Option<&str>,
    ) -> Result<ShortLinkRecord, ApiError> {
        let request = self.build_create_short_link(target_url, credential)?;
        let response = self.round_trip(Operation::Create, request)?;
        self.parse_create_short_link(response)
    }

    /// Points `short_code` at a new target.
    pub fn update_short_link(
        &self,
        short_code: &str,
        target_url: &str,
        credential: Option<&str>,
    ) -> Result<(), ApiError> {
        let request = self.build_update_short_link(short_code, target_url, credential)?;
        let response = self.round_trip(Operation::Update, request)?;
        self.parse_update_short_link(response)
    }

    pub fn delete_short_link(&self, short_code: &str, credential: Option<&str>) -> Result<(), ApiError> {
        let request = self.build_delete_short_link(short_code, credential)?;
        let response = self.round_trip(Operation::Delete, request)?;
        self.parse_delete_short_link(response)
    }

    pub fn get_analytics(
        &self,
        short_code: &str,
        credential: Option<&str>,
    ) -> Result<AnalyticsRecord, ApiError> {
        let request = self.build_get_analytics(short_code, credential)?;
        let response = self.round_trip(Operation::Analytics, request)?;
        self.parse_get_analytics(response)
    }

    fn round_trip(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(%operation, method = %request.method, url = %request.path, "sending request");
        match self.transport.execute(request) {
            Ok(response) => {
                debug!(%operation, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(%operation, error = %err, "request did not complete");
                Err(err)
            }
        }
    }
}

impl<T> fmt::Debug for ShortLinkClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortLinkClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Rejects codes that would address the collection instead of one link.
fn checked_code(short_code: &str) -> Result<&str, ApiError> {
    match short_code {
        "" => Err(ApiError::InvalidRequest("short code must not be empty".to_string())),
        "." | ".." => Err(ApiError::InvalidRequest(format!(
            "{short_code:?} is not a valid short code"
        ))),
        code => Ok(code),
    }
}

fn encode(target_url: &str) -> Result<String, ApiError> {
    let payload = TargetUrl {
        url: target_url.to_string(),
    };
    serde_json::to_string(&payload).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a non-2xx response to `ApiError::Application`, preferring the
/// backend's own message over the operation's fallback.
fn check_status(response: &HttpResponse, operation: Operation) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorPayload>(&response.body)
        .ok()
        .map(|payload| payload.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| operation.fallback_message().to_string());
    warn!(%operation, status = response.status, %message, "backend rejected request");
    Err(ApiError::Application {
        status: response.status,
        message,
    })
}
