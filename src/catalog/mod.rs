//! Route catalog: pending entries and the upload pass.
//!
//! The catalog is an append-only, in-memory list of routes. Nothing is
//! converted at append time; the upload pass rebuilds every document fresh by
//! running both walkers over the reflected payloads and hands the results to
//! the store. Upload is deadline-aware and retries transient store failures
//! with bounded exponential backoff; permanent failures abort the pass.
//!
//! The catalog does no internal locking. It is meant to be configured once
//! and driven from a single control flow; concurrent callers must wrap
//! `add_route`/`upload` in their own mutual exclusion.

use crate::registry::TypeRegistry;
use crate::schema::{WalkContext, describe_value, example_value};
use crate::store::{RouteStore, StoreError};
use anyhow::{Context, Result, bail};
use std::thread;
use std::time::{Duration, Instant};

pub mod model;

pub use model::{DocumentId, Route, RouteDocument, RouteKey};

#[derive(Clone, Debug)]
/// Knobs for the upload pass.
///
/// `max_attempts` counts the initial try; the backoff doubles after each
/// transient failure. A `deadline` in the past aborts before the first
/// upsert.
pub struct UploadOptions {
    pub deadline: Option<Instant>,
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for UploadOptions {
    fn default() -> Self {
        UploadOptions {
            deadline: None,
            max_attempts: 3,
            initial_backoff: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Default)]
/// Append-only list of routes awaiting upload.
pub struct RouteCatalog {
    registry: TypeRegistry,
    routes: Vec<Route>,
}

impl RouteCatalog {
    pub fn new(registry: TypeRegistry) -> Self {
        RouteCatalog {
            registry,
            routes: Vec::new(),
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Append a route. No identity check happens here; duplicates are
    /// permitted in memory and resolve at upload time through the store's
    /// upsert semantics.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the persisted document for one route.
    ///
    /// Descriptors are rebuilt fresh on every call; nothing is cached. The
    /// response contributes both a schema tree and an example tree, the
    /// request only a schema tree.
    pub fn document_for(&self, route: &Route) -> RouteDocument {
        RouteDocument {
            id: None,
            description: route.description.clone(),
            path: route.path.clone(),
            method: route.method.clone(),
            is_query: route.is_query,
            service: route.service.clone(),
            request: route
                .request
                .as_ref()
                .map(|value| describe_value(value, WalkContext::default(), &self.registry)),
            response: route
                .response
                .as_ref()
                .map(|value| describe_value(value, WalkContext::default(), &self.registry)),
            response_json: route.response.as_ref().map(example_value),
        }
    }

    /// Convert and upsert every catalog entry, in append order.
    ///
    /// Returns the store identities in the same order. The pass is
    /// all-or-nothing from the caller's perspective: the first permanent
    /// failure (or exhausted retries, or elapsed deadline) aborts with an
    /// error and no per-route partial result is reported.
    pub fn upload(
        &self,
        store: &mut dyn RouteStore,
        options: &UploadOptions,
    ) -> Result<Vec<DocumentId>> {
        let mut ids = Vec::with_capacity(self.routes.len());
        for route in &self.routes {
            let key = route.key();
            let document = self.document_for(route);
            let id = upsert_with_retry(store, &key, &document, options)
                .with_context(|| format!("upserting route {key}"))?;
            tracing::debug!(route = %key, id = %id, "route document stored");
            ids.push(id);
        }
        Ok(ids)
    }
}

fn upsert_with_retry(
    store: &mut dyn RouteStore,
    key: &RouteKey,
    document: &RouteDocument,
    options: &UploadOptions,
) -> Result<DocumentId> {
    let max_attempts = options.max_attempts.max(1);
    let mut backoff = options.initial_backoff;
    let mut attempt = 1;

    loop {
        check_deadline(options.deadline, key)?;

        match store.upsert(key, document) {
            Ok(id) => return Ok(id),
            Err(err) if err.is_transient() && attempt < max_attempts => {
                tracing::warn!(
                    route = %key,
                    attempt,
                    error = %err,
                    "transient store failure, retrying after backoff"
                );
                sleep_within_deadline(backoff, options.deadline);
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            Err(err) => return Err(classify(err, attempt)),
        }
    }
}

fn check_deadline(deadline: Option<Instant>, key: &RouteKey) -> Result<()> {
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            bail!("upload deadline elapsed before upserting {key}");
        }
    }
    Ok(())
}

/// Sleep for the backoff, but never past the deadline.
fn sleep_within_deadline(backoff: Duration, deadline: Option<Instant>) {
    let pause = match deadline {
        Some(deadline) => backoff.min(deadline.saturating_duration_since(Instant::now())),
        None => backoff,
    };
    if !pause.is_zero() {
        thread::sleep(pause);
    }
}

fn classify(err: StoreError, attempts: u32) -> anyhow::Error {
    if err.is_transient() {
        anyhow::Error::new(err).context(format!("store still unavailable after {attempts} attempts"))
    } else {
        anyhow::Error::new(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Describe, FieldShape, ObjectShape, QualifiedName, Reflected};
    use crate::schema::{Descriptor, NestedKind};
    use crate::store::MemoryStore;

    fn catalog_with_model_namespace() -> RouteCatalog {
        let mut registry = TypeRegistry::new();
        registry.register(["model"]);
        RouteCatalog::new(registry)
    }

    fn sample_route() -> Route {
        let request = Reflected::Object(
            ObjectShape::new("model.CreateOrder").with_field(
                FieldShape::new("sku", String::reflect_zero())
                    .required()
                    .described("stock keeping unit"),
            ),
        );
        let response = Reflected::Object(
            ObjectShape::new("model.Order")
                .with_field(FieldShape::new("id", i64::reflect_zero()).required())
                .with_field(FieldShape::new("sku", String::reflect_zero())),
        );
        Route {
            description: "create an order".to_string(),
            path: "/orders".to_string(),
            method: "POST".to_string(),
            is_query: false,
            service: "orders".to_string(),
            request: Some(request),
            response: Some(response),
        }
    }

    /// Store that fails transiently a fixed number of times before
    /// delegating to an inner memory store.
    struct FlakyStore {
        inner: MemoryStore,
        failures_left: u32,
        attempts: u32,
    }

    impl FlakyStore {
        fn new(failures: u32) -> Self {
            FlakyStore {
                inner: MemoryStore::new(),
                failures_left: failures,
                attempts: 0,
            }
        }
    }

    impl RouteStore for FlakyStore {
        fn upsert(
            &mut self,
            key: &RouteKey,
            document: &RouteDocument,
        ) -> Result<DocumentId, StoreError> {
            self.attempts += 1;
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(StoreError::Unavailable("connection reset".to_string()));
            }
            self.inner.upsert(key, document)
        }

        fn fetch_all(&self) -> Result<Vec<RouteDocument>, StoreError> {
            self.inner.fetch_all()
        }
    }

    /// Store that always rejects upserts.
    struct RejectingStore;

    impl RouteStore for RejectingStore {
        fn upsert(
            &mut self,
            _key: &RouteKey,
            _document: &RouteDocument,
        ) -> Result<DocumentId, StoreError> {
            Err(StoreError::Rejected("schema mismatch".to_string()))
        }

        fn fetch_all(&self) -> Result<Vec<RouteDocument>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn fast_options() -> UploadOptions {
        UploadOptions {
            deadline: None,
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn catalog_exposes_the_registry_it_walks_with() {
        let catalog = catalog_with_model_namespace();
        assert!(catalog.registry().is_owned(&QualifiedName::from("model.Order")));
        assert!(!catalog.registry().is_owned(&QualifiedName::from("time.Time")));
    }

    #[test]
    fn add_route_appends_without_identity_checks() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());
        catalog.add_route(sample_route());
        assert_eq!(catalog.len(), 2, "duplicates are permitted in memory");
    }

    #[test]
    fn document_for_attaches_schemas_and_example() {
        let catalog = catalog_with_model_namespace();
        let document = catalog.document_for(&sample_route());

        let request = document.request.expect("request schema present");
        assert_eq!(request.kind(), Some(NestedKind::Object));

        let response = document.response.expect("response schema present");
        let Descriptor::Nested(nested) = response else {
            panic!("owned response must be nested");
        };
        assert_eq!(nested.nested.len(), 2);

        let example = document.response_json.expect("response example present");
        assert_eq!(example, serde_json::json!({"id": "i64", "sku": "string"}));
    }

    #[test]
    fn routes_without_payloads_produce_bare_documents() {
        let catalog = catalog_with_model_namespace();
        let mut route = sample_route();
        route.request = None;
        route.response = None;

        let document = catalog.document_for(&route);
        assert!(document.request.is_none());
        assert!(document.response.is_none());
        assert!(document.response_json.is_none());
    }

    #[test]
    fn upload_converts_and_stores_every_route() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());
        let mut store = MemoryStore::new();

        let ids = catalog
            .upload(&mut store, &UploadOptions::default())
            .expect("upload succeeds");
        assert_eq!(ids.len(), 1);

        let stored = store
            .get(&sample_route().key())
            .expect("document persisted");
        assert!(stored.request.is_some());
        assert!(stored.response_json.is_some());
    }

    #[test]
    fn transient_failures_are_retried_until_success() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());
        let mut store = FlakyStore::new(2);

        catalog
            .upload(&mut store, &fast_options())
            .expect("upload succeeds after retries");
        assert_eq!(store.attempts, 3);
        assert_eq!(store.inner.len(), 1);
    }

    #[test]
    fn retries_are_bounded_by_max_attempts() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());
        let mut store = FlakyStore::new(u32::MAX);

        let err = catalog
            .upload(&mut store, &fast_options())
            .expect_err("exhausted retries must fail");
        assert_eq!(store.attempts, 3);
        assert!(err.to_string().contains("upserting route"));
    }

    #[test]
    fn permanent_failures_abort_without_retrying() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());

        let err = catalog
            .upload(&mut RejectingStore, &fast_options())
            .expect_err("rejection must abort");
        let chain = format!("{err:#}");
        assert!(chain.contains("schema mismatch"), "got: {chain}");
    }

    #[test]
    fn elapsed_deadline_aborts_before_any_attempt() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());
        let mut store = FlakyStore::new(0);

        let options = UploadOptions {
            deadline: Some(Instant::now() - Duration::from_millis(1)),
            ..fast_options()
        };
        let err = catalog
            .upload(&mut store, &options)
            .expect_err("elapsed deadline must abort");
        assert_eq!(store.attempts, 0);
        assert!(format!("{err:#}").contains("deadline elapsed"));
    }

    #[test]
    fn upload_rebuilds_documents_fresh_each_pass() {
        let mut catalog = catalog_with_model_namespace();
        catalog.add_route(sample_route());
        let mut store = MemoryStore::new();

        let first = catalog
            .upload(&mut store, &UploadOptions::default())
            .expect("first upload");
        let second = catalog
            .upload(&mut store, &UploadOptions::default())
            .expect("second upload");

        assert_eq!(first, second, "identity must be stable across uploads");
        assert_eq!(store.len(), 1);
    }
}
