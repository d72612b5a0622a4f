/*!
Service resolution.

`DirectResolver` answers lookups from the catalog and hands everything it
does not claim to the host framework. It keeps no state of its own.
*/

use std::fmt;
use std::sync::Arc;

use crate::core::registry::catalog::AlgorithmCatalog;
use crate::core::registry::kind::ServiceKind;
use crate::core::registry::service::{HostLookup, Service};

/// How a resolver answers lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStrategy {
    /// Every lookup goes to the catalog and the host
    Direct,
    /// Answers are memoized, misses included
    Cached,
}

impl ResolutionStrategy {
    /// Get the strategy name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStrategy::Direct => "direct",
            ResolutionStrategy::Cached => "cached",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy for answering `(kind, algorithm)` lookups
pub trait ResolveService: Send + Sync {
    /// Resolve a service, `None` when nobody provides it
    fn resolve(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>>;

    /// How this resolver answers lookups
    fn strategy(&self) -> ResolutionStrategy;
}

/// Uncached resolver over the catalog and the host framework
pub struct DirectResolver {
    catalog: Arc<AlgorithmCatalog>,
    host: Arc<dyn HostLookup>,
}

impl DirectResolver {
    /// Create a resolver
    pub fn new(catalog: Arc<AlgorithmCatalog>, host: Arc<dyn HostLookup>) -> Self {
        Self { catalog, host }
    }

    /// Look up a service
    ///
    /// Aliases are normalized through the catalog first. Unclaimed pairs go
    /// to the host exactly as they were asked.
    pub fn lookup(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        if let Ok(service_kind) = kind.parse::<ServiceKind>() {
            if let Some(service) = self.catalog.service(service_kind, algorithm) {
                return Some(Arc::new(service));
            }
        }
        self.host.lookup(kind, algorithm)
    }

    /// The catalog this resolver reads
    pub fn catalog(&self) -> &AlgorithmCatalog {
        &self.catalog
    }
}

impl ResolveService for DirectResolver {
    fn resolve(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        self.lookup(kind, algorithm)
    }

    fn strategy(&self) -> ResolutionStrategy {
        ResolutionStrategy::Direct
    }
}

impl<T: ResolveService + ?Sized> ResolveService for Arc<T> {
    fn resolve(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        (**self).resolve(kind, algorithm)
    }

    fn strategy(&self) -> ResolutionStrategy {
        (**self).strategy()
    }
}
