//! Recursive type-introspection engine for API route documentation.
//!
//! The crate turns request/response payload shapes into two trees: a
//! normalized schema tree (field descriptors annotated with required-ness
//! and descriptions from declared metadata) and an independent placeholder
//! example tree. Routes collect in an append-only catalog; an upload pass
//! runs both walkers per route and upserts the resulting documents into a
//! backing store keyed by `(service, path, method)`.
//!
//! Payload types self-describe through [`reflect::Describe`]; whether a
//! composite type is expanded recursively or kept as an opaque leaf is
//! decided by the namespace set held in [`registry::TypeRegistry`]. The
//! walkers are deterministic: all recursion state travels in an explicit
//! [`schema::WalkContext`] passed by value.

pub mod catalog;
pub mod reflect;
pub mod registry;
pub mod schema;
pub mod store;

pub use catalog::{DocumentId, Route, RouteCatalog, RouteDocument, RouteKey, UploadOptions};
pub use reflect::{ArrayShape, Describe, FieldShape, ObjectShape, QualifiedName, Reflected};
pub use registry::TypeRegistry;
pub use schema::{
    Descriptor, FieldDescriptor, NestedDescriptor, NestedKind, WalkContext, describe_value,
    example_value,
};
pub use store::{JsonFileStore, MemoryStore, RouteStore, StoreError};
