//! Request executor
//!
//! Orchestrates one request end to end: resolve the URL and query from the
//! endpoint registry, obtain a bearer token, issue the HTTP call, classify
//! the response, and synchronize successful payloads into the model store.
//!
//! Every invocation runs to exactly one terminal outcome: `Ok` with the
//! synchronized value, or `Err` with the classified error. There is no
//! retry loop and no cancellation; a failure at any stage is terminal for
//! that invocation.

mod resources;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::query;
use crate::registry::Operation;
use crate::resolve;
use crate::store::{ModelStore, SyncOutcome};
use crate::template::RequestContext;
use crate::token::{HttpTokenSource, TokenSource};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Client for the tokenized-payments API.
///
/// Owns its model store: models synchronized by this client are addressable
/// through it for the client's lifetime and are never shared globally.
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    token_source: Box<dyn TokenSource>,
    store: Mutex<ModelStore>,
}

impl Client {
    /// Create a client whose tokens come from the configured token endpoint
    pub fn new(config: ClientConfig) -> Self {
        let http = reqwest::Client::new();
        let token_source = Box::new(HttpTokenSource::with_client(
            config.token_url.clone(),
            http.clone(),
        ));
        Self {
            http,
            config,
            token_source,
            store: Mutex::new(ModelStore::new()),
        }
    }

    /// Create a client with a custom token source
    pub fn with_token_source(
        config: ClientConfig,
        token_source: impl TokenSource + 'static,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token_source: Box::new(token_source),
            store: Mutex::new(ModelStore::new()),
        }
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access the model store
    pub async fn store(&self) -> MutexGuard<'_, ModelStore> {
        self.store.lock().await
    }

    /// Execute a registered operation.
    ///
    /// `data` is the request payload: carried in the query string for read
    /// operations, as the JSON body for write operations. `ctx` must supply
    /// every placeholder the operation's path template references.
    pub async fn execute(
        &self,
        operation: Operation,
        data: Option<Value>,
        ctx: &RequestContext,
    ) -> Result<SyncOutcome> {
        let descriptor = operation.descriptor();

        // BUILDING
        let url = resolve::resolve_url(self.config.effective_base_url(), operation, ctx)?;
        let params = query::build_query(operation, &self.config.auth, data.as_ref());
        let query_string = query::serialize_query(&params);
        let body = if descriptor.method.sends_body() {
            data
        } else {
            None
        };

        // AWAITING_TOKEN: a token failure is terminal and the payments API
        // is never contacted.
        let token = self.token_source.fetch_token().await?;

        // AWAITING_RESPONSE
        let full_url = if query_string.is_empty() {
            url
        } else {
            format!("{url}?{query_string}")
        };
        debug!(operation = operation.name(), url = %full_url, "issuing request");

        let mut request = self
            .http
            .request(descriptor.method.into(), &full_url)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .bearer_auth(token);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;

        // The body is always decoded as JSON, success or failure.
        let decoded: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        self.classify(operation, status, decoded).await
    }

    /// Classify a response and synchronize successful payloads.
    /// Checks run in a fixed order; the first match wins.
    async fn classify(
        &self,
        operation: Operation,
        status: StatusCode,
        body: Value,
    ) -> Result<SyncOutcome> {
        if status == StatusCode::UNAUTHORIZED {
            warn!(operation = operation.name(), "request unauthorized");
            return Err(Error::unauthorized(errors_field(&body)));
        }

        if let Some(errors) = structured_errors(&body) {
            warn!(
                operation = operation.name(),
                status = status.as_u16(),
                "API returned errors"
            );
            return Err(Error::api(errors));
        }

        if matches!(status.as_u16(), 400 | 422 | 500) {
            warn!(
                operation = operation.name(),
                status = status.as_u16(),
                "fault status without structured errors"
            );
            return Err(Error::fault(status.as_u16(), vec![body]));
        }

        // SYNCHRONIZING: the lock is held only across this synchronous pass,
        // so overlapping requests interleave at suspension points and the
        // store's last-write-wins merge governs the outcome.
        let mut store = self.store.lock().await;
        Ok(store.sync_document(&body))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The body's `errors` field as a list, however the server shaped it
fn errors_field(body: &Value) -> Vec<Value> {
    match body.get("errors") {
        Some(Value::Array(errors)) => errors.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}

/// A non-empty `errors` field, if the body carries one
fn structured_errors(body: &Value) -> Option<Vec<Value>> {
    match body.get("errors") {
        Some(Value::Array(errors)) if !errors.is_empty() => Some(errors.clone()),
        Some(Value::Null) | Some(Value::Array(_)) | None => None,
        Some(other) => Some(vec![other.clone()]),
    }
}

#[cfg(test)]
mod tests;
