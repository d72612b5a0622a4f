/*!
Memoizing resolution cache.

Results are stored per `(kind, algorithm)` as asked, misses included, and
never evicted: the key space is bounded by the algorithm namespace.

Computation is not single-flight. Two threads missing the same key may
both run the resolver; the first result stored wins and both callers get
it back.
*/

use std::sync::Arc;

use dashmap::DashMap;

use crate::core::error::{Error, Result};
use crate::core::registry::config::Capabilities;
use crate::core::registry::resolver::{DirectResolver, ResolutionStrategy, ResolveService};
use crate::core::registry::service::Service;

/// Cache key: the lookup exactly as the host asked it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    pub kind: String,
    pub algorithm: String,
}

impl ResolutionKey {
    pub fn new(kind: &str, algorithm: &str) -> Self {
        Self {
            kind: kind.to_string(),
            algorithm: algorithm.to_string(),
        }
    }
}

/// Resolver that memoizes every answer, including "not found"
pub struct ResolutionCache {
    resolver: Arc<DirectResolver>,
    entries: DashMap<ResolutionKey, Option<Arc<Service>>>,
}

impl ResolutionCache {
    /// Build a cache over a resolver
    ///
    /// Refused with `CapabilityUnavailable` when the environment does not
    /// allow a shared mutable cache.
    pub fn new(resolver: Arc<DirectResolver>, capabilities: &Capabilities) -> Result<Self> {
        if !capabilities.allow_shared_mutable_cache {
            return Err(Error::CapabilityUnavailable("shared mutable cache"));
        }
        Ok(Self {
            resolver,
            entries: DashMap::new(),
        })
    }

    /// Cached lookup
    pub fn get(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        let key = ResolutionKey::new(kind, algorithm);
        if let Some(cached) = self.entries.get(&key) {
            return cached.value().clone();
        }

        // Resolve without holding a shard lock; the host may be slow
        let computed = self.resolver.lookup(kind, algorithm);
        self.entries.entry(key).or_insert(computed).value().clone()
    }

    /// Whether a result (possibly a miss) is cached for the lookup
    pub fn contains(&self, kind: &str, algorithm: &str) -> bool {
        self.entries.contains_key(&ResolutionKey::new(kind, algorithm))
    }

    /// Number of cached lookups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResolveService for ResolutionCache {
    fn resolve(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        self.get(kind, algorithm)
    }

    fn strategy(&self) -> ResolutionStrategy {
        ResolutionStrategy::Cached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::catalog::AlgorithmCatalog;
    use crate::core::registry::service::HostLookup;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHost {
        calls: AtomicUsize,
    }

    impl HostLookup for CountingHost {
        fn lookup(&self, _kind: &str, _algorithm: &str) -> Option<Arc<Service>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    fn cache(capabilities: &Capabilities) -> (Result<ResolutionCache>, Arc<CountingHost>) {
        let mut catalog = AlgorithmCatalog::default();
        catalog.register_signature("COMPOSITESIG", "impl::CompositeSignature").unwrap();

        let host = Arc::new(CountingHost::default());
        let resolver = Arc::new(DirectResolver::new(Arc::new(catalog), host.clone()));
        (ResolutionCache::new(resolver, capabilities), host)
    }

    #[test]
    fn test_refused_without_capability() {
        let (result, _) = cache(&Capabilities::deterministic());
        assert!(matches!(result, Err(Error::CapabilityUnavailable(_))));
    }

    #[test]
    fn test_hits_return_stored_service() {
        let (cache, _) = cache(&Capabilities::standard());
        let cache = cache.unwrap();
        assert!(cache.is_empty());

        let first = cache.get("Signature", "COMPOSITESIG").unwrap();
        let second = cache.get("Signature", "COMPOSITESIG").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_misses_are_cached() {
        let (cache, host) = cache(&Capabilities::standard());
        let cache = cache.unwrap();

        for _ in 0..5 {
            assert!(cache.get("Signature", "Unknown").is_none());
        }
        assert_eq!(host.calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains("Signature", "Unknown"));
        assert_eq!(cache.strategy(), ResolutionStrategy::Cached);
    }

    #[test]
    fn test_keys_are_raw_lookups() {
        let (cache, _) = cache(&Capabilities::standard());
        let cache = cache.unwrap();

        let upper = cache.get("Signature", "COMPOSITESIG").unwrap();
        let lower = cache.get("Signature", "compositesig").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(cache.len(), 2);
    }
}
