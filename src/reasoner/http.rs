//! HTTP client for a reasoning service exposing a JSON directive endpoint.

use super::ReasoningService;
use crate::config::ServiceConfig;
use crate::models::{Directive, DirectiveResponse};
use crate::{Error, Result};
use std::time::Duration;

/// Reasoning service reached over HTTP.
///
/// Directives are posted as JSON to `{endpoint}/directive`; availability is
/// probed with `GET {endpoint}/health`.
pub struct HttpReasoningService {
    /// Service name.
    name: String,
    /// Base URL.
    endpoint: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
    /// Bound on one health probe, independent of the request timeout.
    probe_timeout: Duration,
}

impl HttpReasoningService {
    /// Creates a client from service settings.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            name: config.name.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client: build_http_client(config.timeout_ms, config.connect_timeout_ms),
            probe_timeout: Duration::from_millis(config.probe_timeout_ms.max(1)),
        }
    }

    fn directive_url(&self) -> String {
        format!("{}/directive", self.endpoint)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.endpoint)
    }
}

impl ReasoningService for HttpReasoningService {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(self.probe_timeout)
            .send()
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(service = %self.name, error = %e, "Health probe failed");
                false
            },
        }
    }

    fn execute(&self, directive: &Directive) -> Result<DirectiveResponse> {
        let response = self
            .client
            .post(self.directive_url())
            .json(directive)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    service = %self.name,
                    command = directive.command.as_str(),
                    error = %e,
                    error_kind,
                    "Reasoning service request failed"
                );
                Error::OperationFailed {
                    operation: "reasoner_request".to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                service = %self.name,
                command = directive.command.as_str(),
                status = %status,
                body = %body,
                "Reasoning service returned error status"
            );
            return Err(Error::OperationFailed {
                operation: "reasoner_request".to_string(),
                cause: format!("service returned status: {status} - {body}"),
            });
        }

        response.json().map_err(|e| {
            tracing::error!(
                service = %self.name,
                command = directive.command.as_str(),
                error = %e,
                "Failed to parse reasoning service reply"
            );
            Error::OperationFailed {
                operation: "reasoner_response".to_string(),
                cause: e.to_string(),
            }
        })
    }
}

/// Builds a blocking HTTP client with the given timeouts (0 disables one).
fn build_http_client(timeout_ms: u64, connect_timeout_ms: u64) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    } else {
        builder = builder.timeout(None);
    }
    if connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build reasoning service HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
