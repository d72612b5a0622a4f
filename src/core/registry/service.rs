/*!
Service descriptors and the host framework boundary.

A `Service` describes one implementation of a cryptographic operation.
Services belonging to other providers are owned by the host framework and
only ever handed out behind an `Arc`.
*/

use std::collections::HashMap;
use std::sync::Arc;

/// A concrete implementation of a cryptographic operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Name of the provider offering the service
    pub provider: String,
    /// Host type name, e.g. `Signature`
    pub kind: String,
    /// Canonical algorithm name
    pub algorithm: String,
    /// Implementation identifier
    pub implementation: String,
    /// Friendly and OID aliases of the algorithm
    pub aliases: Vec<String>,
}

impl Service {
    /// Create a service descriptor without aliases
    pub fn new(provider: &str, kind: &str, algorithm: &str, implementation: &str) -> Self {
        Self {
            provider: provider.to_string(),
            kind: kind.to_string(),
            algorithm: algorithm.to_string(),
            implementation: implementation.to_string(),
            aliases: Vec::new(),
        }
    }

    /// Attach aliases to the descriptor
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// The host framework's own service lookup
///
/// Anything the provider does not claim is delegated here unchanged.
pub trait HostLookup: Send + Sync {
    /// Look up a service across the host's installed providers
    fn lookup(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>>;
}

/// Host with nothing installed
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyHost;

impl HostLookup for EmptyHost {
    fn lookup(&self, _kind: &str, _algorithm: &str) -> Option<Arc<Service>> {
        None
    }
}

/// In-memory host service table
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    services: HashMap<(String, String), Arc<Service>>,
}

impl StaticHost {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a service under its kind and algorithm name
    pub fn install(&mut self, service: Service) -> Arc<Service> {
        let service = Arc::new(service);
        self.services.insert(
            (service.kind.clone(), service.algorithm.clone()),
            Arc::clone(&service),
        );
        service
    }

    /// Number of installed services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl HostLookup for StaticHost {
    fn lookup(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        self.services
            .get(&(kind.to_string(), algorithm.to_string()))
            .cloned()
    }
}

impl<T: HostLookup + ?Sized> HostLookup for Arc<T> {
    fn lookup(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        (**self).lookup(kind, algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_host_lookup() {
        let mut host = StaticHost::new();
        let installed = host.install(Service::new("SUN", "Signature", "SHA256withDSA", "sun.DSA"));

        let found = host.lookup("Signature", "SHA256withDSA").unwrap();
        assert!(Arc::ptr_eq(&found, &installed));
        assert!(host.lookup("Signature", "SHA1withDSA").is_none());
        assert!(host.lookup("KeyFactory", "SHA256withDSA").is_none());
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_empty_host() {
        assert!(EmptyHost.lookup("Signature", "anything").is_none());
    }

    #[test]
    fn test_service_aliases() {
        let service = Service::new("Composite", "Signature", "COMPOSITESIG", "impl")
            .with_aliases(["CompositeSignature", "2.25.1"]);
        assert_eq!(service.aliases, vec!["CompositeSignature", "2.25.1"]);
    }
}
