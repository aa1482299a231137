//! Route entities: pending entries and persisted documents.
//!
//! A [`Route`] is what callers append to the catalog: endpoint metadata plus
//! the reflected request/response payload shapes. A [`RouteDocument`] is what
//! the store persists: the same metadata with the walker outputs attached and
//! an optional store-assigned identity. The wire field names match the stored
//! documentation format (`isQuery`, `responseJSON`).

use crate::reflect::Reflected;
use crate::schema::Descriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Store-assigned identity of a persisted route document.
///
/// Assigned on first insert and stable across repeated upserts of the same
/// route key.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity of a route: one endpoint of one service.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RouteKey {
    pub service: String,
    pub path: String,
    pub method: String,
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.path, self.service)
    }
}

#[derive(Clone, Debug)]
/// One documented API endpoint pending upload.
///
/// `request` and `response` hold reflected payload shapes; either may be
/// absent for endpoints without a body in that direction.
pub struct Route {
    pub description: String,
    pub path: String,
    pub method: String,
    pub is_query: bool,
    pub service: String,
    pub request: Option<Reflected>,
    pub response: Option<Reflected>,
}

impl Route {
    pub fn key(&self) -> RouteKey {
        RouteKey {
            service: self.service.clone(),
            path: self.path.clone(),
            method: self.method.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Persisted documentation entry for one route.
pub struct RouteDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    pub description: String,
    pub path: String,
    pub method: String,
    #[serde(rename = "isQuery")]
    pub is_query: bool,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Descriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Descriptor>,
    #[serde(rename = "responseJSON", default, skip_serializing_if = "Option::is_none")]
    pub response_json: Option<Value>,
}

impl RouteDocument {
    pub fn key(&self) -> RouteKey {
        RouteKey {
            service: self.service.clone(),
            path: self.path.clone(),
            method: self.method.clone(),
        }
    }
}
