//! Client configuration
//!
//! The configuration surface consumed by the request executor:
//! authentication descriptor, target environment, and the same-origin
//! token endpoint.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Environment
// ============================================================================

/// Target API environment. A closed set; selection is part of client
/// configuration, not a per-call parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Staging,
    Uat,
}

impl Environment {
    /// Base URL for this environment
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => "https://api.tokenpay.com/v1",
            Environment::Staging => "https://api.staging.tokenpay.com/v1",
            Environment::Uat => "https://api.uat.tokenpay.com/v1",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "uat" => Ok(Environment::Uat),
            other => Err(Error::unknown_environment(other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Uat => "uat",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Authentication Descriptor
// ============================================================================

/// Authentication fields merged into every query string unless an
/// operation's override rules suppress a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthDescriptor {
    /// Shop identifier
    pub shop_id: String,

    /// Customer identifier
    pub customer_id: String,

    /// Additional authentication fields carried verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AuthDescriptor {
    /// Create a descriptor with the two required identifiers
    pub fn new(shop_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            customer_id: customer_id.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Add an extra authentication field
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Flatten the descriptor into query-parameter pairs
    pub fn as_query_pairs(&self) -> Vec<(String, Value)> {
        let mut pairs = vec![
            ("shop_id".to_string(), Value::String(self.shop_id.clone())),
            (
                "customer_id".to_string(),
                Value::String(self.customer_id.clone()),
            ),
        ];
        for (key, value) in &self.extra {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Authentication descriptor
    pub auth: AuthDescriptor,

    /// Target environment
    #[serde(default)]
    pub environment: Environment,

    /// Same-origin endpoint that issues short-lived bearer tokens
    pub token_url: String,

    /// Overrides the environment base URL (self-hosted gateways, tests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for the given auth and environment
    pub fn new(auth: AuthDescriptor, environment: Environment, token_url: impl Into<String>) -> Self {
        Self {
            auth,
            environment,
            token_url: token_url.into(),
            base_url: None,
        }
    }

    /// Override the base URL for all API requests
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The effective base URL for API requests
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("uat".parse::<Environment>().unwrap(), Environment::Uat);

        let err = "sandbox".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("sandbox"));
    }

    #[test]
    fn test_environment_base_urls() {
        assert!(Environment::Production.base_url().starts_with("https://"));
        assert_ne!(
            Environment::Staging.base_url(),
            Environment::Production.base_url()
        );
    }

    #[test]
    fn test_auth_query_pairs() {
        let auth = AuthDescriptor::new("S1", "C1").with_extra("session_token", "abc");
        let pairs = auth.as_query_pairs();

        assert_eq!(pairs[0], ("shop_id".to_string(), json!("S1")));
        assert_eq!(pairs[1], ("customer_id".to_string(), json!("C1")));
        assert_eq!(pairs[2], ("session_token".to_string(), json!("abc")));
    }

    #[test]
    fn test_effective_base_url_override() {
        let config = ClientConfig::new(
            AuthDescriptor::new("S1", "C1"),
            Environment::Staging,
            "https://shop.example.com/token",
        );
        assert_eq!(config.effective_base_url(), Environment::Staging.base_url());

        let config = config.with_base_url("http://localhost:8080");
        assert_eq!(config.effective_base_url(), "http://localhost:8080");
    }
}
