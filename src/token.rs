//! Bearer-token acquisition
//!
//! The token source is an external collaborator: a same-origin GET endpoint
//! that returns a short-lived bearer token as a raw text body. Any
//! non-success status is a terminal token failure; the payments API is
//! never contacted without a token.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Source of short-lived bearer tokens
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch a fresh bearer token
    async fn fetch_token(&self) -> Result<String>;
}

/// Token source backed by a same-origin HTTP GET endpoint
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    url: String,
    client: Client,
}

impl HttpTokenSource {
    /// Create a token source for the given endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    /// Create a token source sharing an existing HTTP client
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn fetch_token(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::token(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::token(format!(
                "token endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::token(format!("failed to read token body: {e}")))?;

        debug!(url = %self.url, "fetched bearer token");
        Ok(body.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_token_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok_abc123\n"))
            .mount(&mock_server)
            .await;

        let source = HttpTokenSource::new(format!("{}/token", mock_server.uri()));
        let token = source.fetch_token().await.unwrap();

        assert_eq!(token, "tok_abc123");
    }

    #[tokio::test]
    async fn test_fetch_token_non_success_status_surfaces_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let source = HttpTokenSource::new(format!("{}/token", mock_server.uri()));
        let err = source.fetch_token().await.unwrap_err();

        assert!(matches!(err, Error::TokenFetch { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_token_transport_failure() {
        // Nothing listening on this port.
        let source = HttpTokenSource::new("http://127.0.0.1:9/token");
        let err = source.fetch_token().await.unwrap_err();

        assert!(matches!(err, Error::TokenFetch { .. }));
    }
}
