//! Self-describing shape model consumed by the walkers.
//!
//! The schema and example walkers never touch concrete payload types
//! directly; payload types describe themselves as [`Reflected`] values via
//! the [`Describe`] trait. A `Reflected` tree carries everything the walkers
//! need: qualified type names, wire-level field names, `required` and
//! `description` tags, and zero-valued element prototypes for arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod describe;

pub use describe::Describe;

/// Wire-level type name for date/time leaves.
pub const DATETIME_TYPE_NAME: &str = "chrono.DateTime";

/// Qualified type name, e.g. `model.User`.
///
/// The segment before the first `.` is the namespace the type registry
/// matches against. Unqualified names (`string`, `i64`) have an empty
/// namespace and are never owned.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(pub String);

impl QualifiedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace segment before the first `.`, or `""` when unqualified.
    pub fn namespace(&self) -> &str {
        match self.0.find('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        QualifiedName(value.to_string())
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        QualifiedName(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Reflected payload value: the input shape for both walkers.
///
/// The enum is closed on purpose. Shapes the engine does not model further
/// (`Opaque`) still carry their raw type name so the walkers can degrade to a
/// generic leaf instead of failing.
pub enum Reflected {
    /// No value present at all.
    Absent,
    /// Scalar leaf identified by its declared type name.
    Scalar { type_name: QualifiedName },
    /// Date/time leaf; rendered as the placeholder string `"string"` in
    /// example trees.
    DateTime,
    /// A shape the engine cannot expand; described by its raw type name.
    Opaque { type_name: QualifiedName },
    /// Composite object with declared fields.
    Object(ObjectShape),
    /// Array with a declared element shape and an optional first live element.
    Array(ArrayShape),
    /// Optional reference. `None` models a null reference.
    Reference(Option<Box<Reflected>>),
}

impl Reflected {
    /// Strip exactly one level of reference indirection.
    ///
    /// Used when classifying array elements: the element shape counts as an
    /// object even when it sits behind one reference.
    pub fn strip_reference(&self) -> &Reflected {
        match self {
            Reflected::Reference(Some(inner)) => inner,
            other => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Composite object shape: qualified name plus declared fields in
/// declaration order.
pub struct ObjectShape {
    pub name: QualifiedName,
    pub fields: Vec<FieldShape>,
}

impl ObjectShape {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        ObjectShape {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a declared field, preserving declaration order.
    pub fn with_field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One declared field of an object shape.
///
/// `wire_name` is the serialized field name; `required` and `description`
/// come from the field's declared metadata tags and default to
/// `false`/empty.
pub struct FieldShape {
    pub wire_name: String,
    pub required: bool,
    pub description: String,
    pub value: Reflected,
}

impl FieldShape {
    pub fn new(wire_name: impl Into<String>, value: Reflected) -> Self {
        FieldShape {
            wire_name: wire_name.into(),
            required: false,
            description: String::new(),
            value,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn described(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Array shape.
///
/// `element` is a zero-valued prototype of the declared element type, built
/// independently of any live data so that empty and non-empty arrays
/// describe identically. `first` holds the first live element when one
/// exists; only the example walker consumes it.
pub struct ArrayShape {
    pub element_type: QualifiedName,
    pub element: Box<Reflected>,
    pub first: Option<Box<Reflected>>,
}

impl ArrayShape {
    /// Declared name of the array type itself, e.g. `[]model.Item`.
    pub fn declared_name(&self) -> String {
        format!("[]{}", self.element_type)
    }
}
