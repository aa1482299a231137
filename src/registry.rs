//! Registry of owned type namespaces.
//!
//! A composite type is *owned* (recursively expanded by the schema walker)
//! when the namespace segment of its qualified name is registered here;
//! everything else is treated as an opaque leaf. Registration is the
//! explicit capability grant: the walker asks this table instead of
//! inspecting name strings on its own.

use crate::reflect::QualifiedName;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default)]
/// Set of namespace prefixes whose types the walkers expand.
pub struct TypeRegistry {
    owned: BTreeSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add namespaces to the recognized set. Additive and idempotent.
    ///
    /// Entries are compared literally when resolving ownership: glob markers
    /// are not expanded, so an entry such as `*model` never matches any
    /// qualified name and is effectively inert.
    pub fn register<I, S>(&mut self, namespaces: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for namespace in namespaces {
            self.owned.insert(namespace.into());
        }
    }

    /// True when the name's namespace segment exactly matches a registered
    /// entry.
    pub fn is_owned(&self, name: &QualifiedName) -> bool {
        self.owned.contains(name.namespace())
    }

    /// Number of registered namespaces.
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }
}
