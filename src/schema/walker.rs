//! Recursive schema walker: reflected values in, descriptor trees out.
//!
//! The walker is a pure function over the shape model. All ambient state the
//! recursion needs (the current field's required/description tags and the
//! kind the produced node should carry) travels in a [`WalkContext`] that
//! callers construct and pass by value, so sibling fields can never observe
//! each other's state and repeated walks of the same shape are structurally
//! identical.
//!
//! Collapsing policy: always-wrap. Every owned object, at any depth, becomes
//! a [`NestedDescriptor`]; nothing is flattened on revisit. Arrays of object
//! elements are described from the zero-valued element prototype, never from
//! live data, so empty and populated arrays describe identically.

use crate::reflect::{ArrayShape, DATETIME_TYPE_NAME, ObjectShape, Reflected};
use crate::registry::TypeRegistry;
use crate::schema::{
    Descriptor, FieldDescriptor, INTERFACE_TYPE_NAME, NestedDescriptor, NestedKind,
};
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
/// Ambient state for the field currently being described.
///
/// Callers capture a field's own tag values into a fresh context *before*
/// recursing into the field's value. The default context (top-level walks)
/// is not-required, undescribed, kind `object`.
pub struct WalkContext {
    pub required: bool,
    pub description: String,
    pub kind: NestedKind,
}

/// Describe a reflected value as a schema descriptor.
///
/// Never fails on a well-formed shape: anything the dispatch does not model
/// further degrades to a leaf carrying its raw type name.
pub fn describe_value(value: &Reflected, ctx: WalkContext, registry: &TypeRegistry) -> Descriptor {
    match value {
        Reflected::Absent | Reflected::Reference(None) => leaf(INTERFACE_TYPE_NAME, ctx),
        Reflected::Reference(Some(inner)) => describe_value(inner, ctx, registry),
        Reflected::Scalar { type_name } => leaf(type_name.as_str(), ctx),
        Reflected::DateTime => leaf(DATETIME_TYPE_NAME, ctx),
        Reflected::Opaque { type_name } => leaf(type_name.as_str(), ctx),
        Reflected::Object(shape) => describe_object(shape, ctx, registry),
        Reflected::Array(shape) => describe_array(shape, ctx, registry),
    }
}

fn describe_object(shape: &ObjectShape, ctx: WalkContext, registry: &TypeRegistry) -> Descriptor {
    if !registry.is_owned(&shape.name) {
        return leaf(shape.name.as_str(), ctx);
    }

    let mut nested = IndexMap::with_capacity(shape.fields.len());
    for field in &shape.fields {
        // The child's tags are captured here, before descending; mutations
        // further down cannot reach a sibling's context.
        let child_ctx = WalkContext {
            required: field.required,
            description: field.description.clone(),
            kind: NestedKind::Object,
        };
        nested.insert(
            field.wire_name.clone(),
            describe_value(&field.value, child_ctx, registry),
        );
    }

    Descriptor::Nested(NestedDescriptor {
        kind: ctx.kind,
        description: ctx.description,
        required: ctx.required,
        nested,
    })
}

fn describe_array(shape: &ArrayShape, ctx: WalkContext, registry: &TypeRegistry) -> Descriptor {
    let element = shape.element.strip_reference();
    match element {
        Reflected::Object(_) => describe_value(
            element,
            WalkContext {
                kind: NestedKind::Array,
                ..ctx
            },
            registry,
        ),
        _ => leaf(&shape.declared_name(), ctx),
    }
}

fn leaf(type_name: &str, ctx: WalkContext) -> Descriptor {
    Descriptor::Leaf(FieldDescriptor {
        type_name: type_name.to_string(),
        description: ctx.description,
        required: ctx.required,
    })
}
