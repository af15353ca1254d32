//! Local model types
//!
//! A `Model` is the in-memory, identity-stable representation of one
//! JSON:API resource. Relationships are stored as keys into the model
//! store (arena pattern) rather than owning pointers, so cyclic resource
//! graphs need no reference counting.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Model Key
// ============================================================================

/// Composite identity of a JSON:API resource: (type, id).
/// Never changes after a model is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    /// JSON:API resource type
    pub kind: String,
    /// Resource identifier, coerced to a string
    pub id: String,
}

impl ModelKey {
    /// Create a key from a type and id
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Extract the identity from a JSON:API resource object.
    ///
    /// Ids arrive as strings or numbers on the wire; both coerce to the
    /// string form so identity comparison is uniform.
    pub(crate) fn from_resource(resource: &Map<String, Value>) -> Option<Self> {
        let kind = resource.get("type")?.as_str()?;
        let id = match resource.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(Self::new(kind, id))
    }

    /// Resource-identifier JSON form: `{"type": ..., "id": ...}`
    pub fn to_identifier(&self) -> Value {
        serde_json::json!({ "type": self.kind, "id": self.id })
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

// ============================================================================
// Relations
// ============================================================================

/// A resolved relationship: one or many store keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    One(ModelKey),
    Many(Vec<ModelKey>),
}

impl Relation {
    /// All keys referenced by this relation
    pub fn keys(&self) -> Vec<&ModelKey> {
        match self {
            Relation::One(key) => vec![key],
            Relation::Many(keys) => keys.iter().collect(),
        }
    }
}

// ============================================================================
// Local Model
// ============================================================================

/// One synchronized resource: stable identity plus mutable attributes and
/// relationships. Re-synchronizing the same (type, id) merges into this
/// entry in place, so the store never holds duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    key: ModelKey,
    pub(crate) attributes: Map<String, Value>,
    pub(crate) relationships: HashMap<String, Relation>,
}

impl Model {
    pub(crate) fn new(key: ModelKey) -> Self {
        Self {
            key,
            attributes: Map::new(),
            relationships: HashMap::new(),
        }
    }

    /// The model's identity
    pub fn key(&self) -> &ModelKey {
        &self.key
    }

    /// All attributes
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// A single attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All relationships
    pub fn relationships(&self) -> &HashMap<String, Relation> {
        &self.relationships
    }

    /// A single relationship by name
    pub fn relationship(&self, name: &str) -> Option<&Relation> {
        self.relationships.get(name)
    }
}

// ============================================================================
// Sync Outcome
// ============================================================================

/// Result of synchronizing one response body, preserving the cardinality
/// of the input document.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The body was not a JSON:API document and passed through unchanged
    Passthrough(Value),
    /// A singular `data` member synchronized to one model
    One(ModelKey),
    /// An array `data` member synchronized to an ordered sequence of models
    Many(Vec<ModelKey>),
}

impl SyncOutcome {
    /// The passthrough body, if any
    pub fn passthrough(&self) -> Option<&Value> {
        match self {
            SyncOutcome::Passthrough(value) => Some(value),
            _ => None,
        }
    }

    /// The single synchronized key, if singular
    pub fn single(&self) -> Option<&ModelKey> {
        match self {
            SyncOutcome::One(key) => Some(key),
            _ => None,
        }
    }

    /// The synchronized keys, if a collection
    pub fn many(&self) -> Option<&[ModelKey]> {
        match self {
            SyncOutcome::Many(keys) => Some(keys),
            _ => None,
        }
    }
}
