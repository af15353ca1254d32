//! Error types for the tokenpay client
//!
//! This module defines the error taxonomy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use thiserror::Error;

/// The main error type for the tokenpay client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown environment: {name}")]
    UnknownEnvironment { name: String },

    // ============================================================================
    // URL Resolution Errors
    // ============================================================================
    #[error("Undefined placeholder in path template: {placeholder}")]
    UndefinedPlaceholder { placeholder: String },

    // ============================================================================
    // Token Errors
    // ============================================================================
    #[error("Token fetch failed: {message}")]
    TokenFetch { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("Unauthorized: {errors:?}")]
    Unauthorized { errors: Vec<Value> },

    #[error("API returned errors: {errors:?}")]
    Api { errors: Vec<Value> },

    #[error("HTTP {status}: {errors:?}")]
    Fault { status: u16, errors: Vec<Value> },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown environment error
    pub fn unknown_environment(name: impl Into<String>) -> Self {
        Self::UnknownEnvironment { name: name.into() }
    }

    /// Create an undefined placeholder error
    pub fn undefined_placeholder(placeholder: impl Into<String>) -> Self {
        Self::UndefinedPlaceholder {
            placeholder: placeholder.into(),
        }
    }

    /// Create a token fetch error
    pub fn token(message: impl Into<String>) -> Self {
        Self::TokenFetch {
            message: message.into(),
        }
    }

    /// Create an unauthorized error from the server's errors field
    pub fn unauthorized(errors: Vec<Value>) -> Self {
        Self::Unauthorized { errors }
    }

    /// Create a structured API error
    pub fn api(errors: Vec<Value>) -> Self {
        Self::Api { errors }
    }

    /// Create a fault-status error wrapping the whole response body
    pub fn fault(status: u16, errors: Vec<Value>) -> Self {
        Self::Fault { status, errors }
    }

    /// The server-supplied error list, if this error carries one.
    ///
    /// Token failures are surfaced as a single string element so callers
    /// can always consume failures as a uniform list.
    pub fn error_values(&self) -> Vec<Value> {
        match self {
            Self::Unauthorized { errors } | Self::Api { errors } | Self::Fault { errors, .. } => {
                errors.clone()
            }
            Self::TokenFetch { message } => vec![Value::String(message.clone())],
            other => vec![Value::String(other.to_string())],
        }
    }
}

/// Result type alias for the tokenpay client
pub type Result<T> = std::result::Result<T, Error>;
