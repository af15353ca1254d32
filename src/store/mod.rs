//! Model store and synchronizer
//!
//! Walks a JSON:API-shaped response recursively and upserts every resource
//! into a local store keyed by (type, id). Relationship links resolve to
//! stored keys, so repeated appearances of the same resource within one
//! response coerce to a single identity. Synchronization is idempotent and
//! merges rather than replaces, so callers holding a key observe updates.

mod types;

pub use types::{Model, ModelKey, Relation, SyncOutcome};

use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

/// Registry of all local models seen during the client's lifetime.
/// One store per client instance; grows monotonically, no eviction.
#[derive(Debug, Default)]
pub struct ModelStore {
    models: HashMap<ModelKey, Model>,
}

impl ModelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a model by key
    pub fn get(&self, key: &ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    /// Whether the store holds a model for the key
    pub fn contains(&self, key: &ModelKey) -> bool {
        self.models.contains_key(key)
    }

    /// Number of models in the store
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over all stored models
    pub fn iter(&self) -> impl Iterator<Item = (&ModelKey, &Model)> {
        self.models.iter()
    }

    /// Synchronize one decoded response body into the store.
    ///
    /// Bodies that do not match the JSON:API envelope (no `data` member, or
    /// not an object) pass through unchanged: not every response is a
    /// JSON:API document.
    pub fn sync_document(&mut self, body: &Value) -> SyncOutcome {
        let Some(envelope) = body.as_object() else {
            return SyncOutcome::Passthrough(body.clone());
        };
        let Some(data) = envelope.get("data") else {
            return SyncOutcome::Passthrough(body.clone());
        };

        // Side-loaded resources first, so relationship references resolve to
        // populated models rather than stubs.
        if let Some(included) = envelope.get("included").and_then(Value::as_array) {
            for resource in included {
                self.upsert_resource(resource);
            }
        }

        let outcome = match data {
            Value::Array(items) => {
                let keys = items
                    .iter()
                    .filter_map(|resource| self.upsert_resource(resource))
                    .collect();
                SyncOutcome::Many(keys)
            }
            other => match self.upsert_resource(other) {
                Some(key) => SyncOutcome::One(key),
                // `data` present but not a typed, identified resource
                None => return SyncOutcome::Passthrough(body.clone()),
            },
        };

        // Second pass: attribute values may themselves be nested JSON:API
        // documents that need the same identity-resolution treatment.
        match &outcome {
            SyncOutcome::One(key) => self.sync_nested_attributes(key),
            SyncOutcome::Many(keys) => {
                for key in keys {
                    self.sync_nested_attributes(key);
                }
            }
            SyncOutcome::Passthrough(_) => {}
        }

        outcome
    }

    /// Upsert a single resource object, merging into any existing entry
    /// with the same (type, id).
    fn upsert_resource(&mut self, resource: &Value) -> Option<ModelKey> {
        let resource = resource.as_object()?;
        let key = ModelKey::from_resource(resource)?;

        let model = self
            .models
            .entry(key.clone())
            .or_insert_with(|| Model::new(key.clone()));

        if let Some(Value::Object(attributes)) = resource.get("attributes") {
            for (name, value) in attributes {
                model.attributes.insert(name.clone(), value.clone());
            }
        }

        let relationships = parse_relationships(resource.get("relationships"));
        if !relationships.is_empty() {
            debug!(model = %key, count = relationships.len(), "resolved relationships");
        }
        for (name, relation) in relationships {
            // Every referenced identity must exist as a top-level entry, so
            // relationship lookups never dangle.
            for referenced in relation.keys() {
                self.models
                    .entry(referenced.clone())
                    .or_insert_with(|| Model::new(referenced.clone()));
            }
            if let Some(model) = self.models.get_mut(&key) {
                model.relationships.insert(name, relation);
            }
        }

        Some(key)
    }

    /// Re-run synchronization over each attribute value of a stored model.
    ///
    /// Attribute values shaped like JSON:API documents are synchronized into
    /// the store and rewritten to resource-linkage form, so traversal goes
    /// through the store and re-synchronization stays idempotent. Plain
    /// scalars and plain objects pass through unchanged.
    fn sync_nested_attributes(&mut self, key: &ModelKey) {
        // Identifier-only linkages are already resolved; recursing into them
        // would chase store cross-references in circles.
        let nested: Vec<(String, Value)> = match self.models.get(key) {
            Some(model) => model
                .attributes
                .iter()
                .filter(|(_, value)| is_document(value) && !is_resolved_linkage(value))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            None => return,
        };

        for (name, value) in nested {
            let linkage = match self.sync_document(&value) {
                SyncOutcome::One(nested_key) => json!({ "data": nested_key.to_identifier() }),
                SyncOutcome::Many(nested_keys) => json!({
                    "data": nested_keys
                        .iter()
                        .map(ModelKey::to_identifier)
                        .collect::<Vec<_>>()
                }),
                SyncOutcome::Passthrough(_) => continue,
            };
            if let Some(model) = self.models.get_mut(key) {
                model.attributes.insert(name, linkage);
            }
        }
    }
}

/// Whether a value looks like a JSON:API document envelope
fn is_document(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|envelope| envelope.contains_key("data"))
}

/// Whether a value is already in resource-linkage form: a lone `data`
/// member holding identifier-only objects
fn is_resolved_linkage(value: &Value) -> bool {
    let Some(envelope) = value.as_object() else {
        return false;
    };
    if envelope.len() != 1 {
        return false;
    }
    match envelope.get("data") {
        Some(Value::Object(identifier)) => is_identifier(identifier),
        Some(Value::Array(items)) => items
            .iter()
            .all(|item| item.as_object().is_some_and(is_identifier)),
        _ => false,
    }
}

/// An identifier object carries exactly `type` and `id`
fn is_identifier(object: &serde_json::Map<String, Value>) -> bool {
    object.len() == 2 && object.contains_key("type") && object.contains_key("id")
}

/// Parse a resource's `relationships` member into resolved relations
fn parse_relationships(member: Option<&Value>) -> Vec<(String, Relation)> {
    let Some(Value::Object(relationships)) = member else {
        return Vec::new();
    };

    let mut parsed = Vec::new();
    for (name, entry) in relationships {
        let Some(data) = entry.get("data") else {
            continue;
        };
        match data {
            Value::Object(identifier) => {
                if let Some(key) = ModelKey::from_resource(identifier) {
                    parsed.push((name.clone(), Relation::One(key)));
                }
            }
            Value::Array(identifiers) => {
                let keys: Vec<ModelKey> = identifiers
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(ModelKey::from_resource)
                    .collect();
                parsed.push((name.clone(), Relation::Many(keys)));
            }
            // data: null is an explicitly empty to-one relationship
            _ => {}
        }
    }
    parsed
}
