//! Query-string construction
//!
//! Builds a single flat query-parameter mapping by layering three sources,
//! later layers overriding earlier ones:
//!
//! 1. the authentication descriptor,
//! 2. the request data, only for read (GET) operations,
//! 3. the operation's query override rules, where `Omit` deletes the key.
//!
//! Null values are dropped before serialization, so an omitted parameter and
//! a never-set parameter are observably identical in the final query string.

use crate::config::AuthDescriptor;
use crate::registry::{Operation, QueryOverride};
use crate::template::value_to_string;
use serde_json::Value;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Build the layered query-parameter mapping for one request.
pub fn build_query(
    operation: Operation,
    auth: &AuthDescriptor,
    data: Option<&Value>,
) -> BTreeMap<String, Value> {
    let descriptor = operation.descriptor();
    let mut params = BTreeMap::new();

    // Layer 1: authentication fields
    for (key, value) in auth.as_query_pairs() {
        params.insert(key, value);
    }

    // Layer 2: request data, query-borne only for reads
    if descriptor.method.is_read() {
        if let Some(Value::Object(map)) = data {
            for (key, value) in map {
                params.insert(key.clone(), value.clone());
            }
        }
    }

    // Layer 3: per-operation overrides win over everything
    for (key, rule) in descriptor.overrides {
        match rule {
            QueryOverride::Omit => {
                params.remove(*key);
            }
            QueryOverride::Set(value) => {
                params.insert((*key).to_string(), Value::String((*value).to_string()));
            }
        }
    }

    // Null is "never set"
    params.retain(|_, value| !value.is_null());

    params
}

/// Serialize a query mapping, percent-encoding both keys and values.
pub fn serialize_query(params: &BTreeMap<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &value_to_string(value));
    }
    serializer.finish()
}
