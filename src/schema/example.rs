//! Example value walker: placeholder JSON trees from reflected shapes.
//!
//! Independent of the schema walker and of required/description tags.
//! Objects expand unconditionally (ownership does not apply here), leaves
//! render their declared type name, date/times render the literal `"string"`,
//! and arrays wrap either the first live element or the declared element
//! type name as a placeholder.

use crate::reflect::Reflected;
use serde_json::{Map, Value};

/// Produce a placeholder JSON value mirroring the reflected shape.
pub fn example_value(value: &Reflected) -> Value {
    match value {
        Reflected::Absent | Reflected::Reference(None) => Value::Null,
        Reflected::Reference(Some(inner)) => example_value(inner),
        Reflected::DateTime => Value::String("string".to_string()),
        Reflected::Scalar { type_name } | Reflected::Opaque { type_name } => {
            Value::String(type_name.to_string())
        }
        Reflected::Object(shape) => {
            let mut out = Map::with_capacity(shape.fields.len());
            for field in &shape.fields {
                out.insert(field.wire_name.clone(), example_value(&field.value));
            }
            Value::Object(out)
        }
        Reflected::Array(shape) => match &shape.first {
            Some(first) => Value::Array(vec![example_value(first)]),
            None => Value::Array(vec![Value::String(shape.element_type.to_string())]),
        },
    }
}
