//! # Tokenpay Client
//!
//! Async client for a tokenized-payments JSON:API. Resolves symbolic
//! operation names into concrete HTTP requests, authenticates them with a
//! short-lived bearer token from a same-origin endpoint, and synchronizes
//! JSON:API responses into an identity-stable local model store that callers
//! can traverse without re-parsing relationships.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tokenpay_client::{AuthDescriptor, Client, ClientConfig, Environment};
//!
//! #[tokio::main]
//! async fn main() -> tokenpay_client::Result<()> {
//!     let config = ClientConfig::new(
//!         AuthDescriptor::new("shop_123", "cust_456"),
//!         Environment::Production,
//!         "https://shop.example.com/tokenpay/token",
//!     );
//!     let client = Client::new(config);
//!
//!     // Synchronized models land in the client's store, keyed by (type, id).
//!     let outcome = client.subscriptions().await?;
//!     let store = client.store().await;
//!     for key in outcome.many().unwrap_or_default() {
//!         println!("{key}: {:?}", store.get(key).map(|m| m.attributes()));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! resource method ─▶ Request Executor
//!                      │  registry: operation → verb + path template + overrides
//!                      │  resolve:  {{ placeholder }} interpolation + base URL
//!                      │  query:    auth ⊕ data (GET only) ⊕ overrides
//!                      │  token:    same-origin bearer token fetch
//!                      ▼
//!                    HTTP round trip ─▶ classification ─▶ ModelStore sync
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Client configuration: auth descriptor, environments, token endpoint
pub mod config;

/// Endpoint registry: the closed operation table
pub mod registry;

/// Path-template interpolation
pub mod template;

/// URL resolution
pub mod resolve;

/// Layered query-string construction
pub mod query;

/// Model store and JSON:API synchronizer
pub mod store;

/// Bearer-token acquisition
pub mod token;

/// Request executor and per-resource methods
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use config::{AuthDescriptor, ClientConfig, Environment};
pub use error::{Error, Result};
pub use registry::{Method, Operation, OperationDescriptor, QueryOverride};
pub use store::{Model, ModelKey, ModelStore, Relation, SyncOutcome};
pub use template::RequestContext;
pub use token::{HttpTokenSource, TokenSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
