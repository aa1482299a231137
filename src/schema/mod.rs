//! Descriptor tree produced by the schema walker.
//!
//! The wire shape mirrors the stored documentation format: leaves carry
//! `type`/`description`/`isRequired`, nested nodes additionally carry a
//! `nested` mapping of wire field name to child descriptor. Field order is
//! preserved end to end, which is why the mapping is an `IndexMap` rather
//! than a sorted one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod example;
pub mod walker;

pub use example::example_value;
pub use walker::{WalkContext, describe_value};

/// Wire type name for absent values and null references.
pub const INTERFACE_TYPE_NAME: &str = "interface";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Shape of a nested descriptor: an owned object or an array of such.
pub enum NestedKind {
    #[default]
    Object,
    Array,
}

impl NestedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NestedKind::Object => "object",
            NestedKind::Array => "array",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// One node of a schema tree.
///
/// `Nested` is listed first so untagged deserialization tries the richer
/// shape before falling back to a leaf; a leaf document never carries a
/// `nested` key.
pub enum Descriptor {
    Nested(NestedDescriptor),
    Leaf(FieldDescriptor),
}

impl Descriptor {
    /// The kind this node produced: `Some` for nested nodes, `None` for
    /// leaves.
    pub fn kind(&self) -> Option<NestedKind> {
        match self {
            Descriptor::Nested(nested) => Some(nested.kind),
            Descriptor::Leaf(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Leaf descriptor for a scalar-shaped field.
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    #[serde(rename = "isRequired")]
    pub required: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Descriptor for an owned object or an array of owned objects.
///
/// `nested` holds exactly one entry per declared field of the described
/// type, keyed by wire name, in declaration order.
pub struct NestedDescriptor {
    #[serde(rename = "type")]
    pub kind: NestedKind,
    pub description: String,
    #[serde(rename = "isRequired")]
    pub required: bool,
    pub nested: IndexMap<String, Descriptor>,
}
