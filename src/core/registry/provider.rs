/*!
The composite security provider.

`SecurityProvider` is the object a host integration constructs once and
shares. It owns the catalog, the capability decisions and the resolver
selected for this environment. Nothing about it is global.
*/

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::core::constants::{PROVIDER_INFO, PROVIDER_NAME, PROVIDER_VERSION};
use crate::core::error::Result;
use crate::core::registry::catalog::AlgorithmCatalog;
use crate::core::registry::config::{Capabilities, ExecutionMode};
use crate::core::registry::gate::ExecutionModeGate;
use crate::core::registry::properties::ProviderKey;
use crate::core::registry::resolver::{ResolutionStrategy, ResolveService};
use crate::core::registry::service::{EmptyHost, HostLookup, Service};

/// Security provider contributing the composite algorithms
pub struct SecurityProvider {
    name: String,
    version: f64,
    info: String,
    gate: ExecutionModeGate,
    catalog: Arc<AlgorithmCatalog>,
    resolver: Box<dyn ResolveService>,
    properties: OnceCell<BTreeMap<String, String>>,
}

impl SecurityProvider {
    /// Build the provider for a host with the given capabilities
    pub fn new(host: Arc<dyn HostLookup>, capabilities: Capabilities) -> Result<Self> {
        SecurityProviderBuilder::new()
            .host(host)
            .capabilities(capabilities)
            .build()
    }

    /// Start building a provider
    pub fn builder() -> SecurityProviderBuilder {
        SecurityProviderBuilder::new()
    }

    /// Look up a service in place of the host's default lookup
    pub fn get_service(&self, kind: &str, algorithm: &str) -> Option<Arc<Service>> {
        self.resolver.resolve(kind, algorithm)
    }

    /// Provider name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provider version
    pub fn version(&self) -> f64 {
        self.version
    }

    /// Provider description
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Capabilities the provider was built with
    pub fn capabilities(&self) -> Capabilities {
        self.gate.capabilities()
    }

    /// Execution mode the provider runs in
    pub fn mode(&self) -> ExecutionMode {
        self.gate.mode()
    }

    /// Whether lookups are memoized
    pub fn is_caching(&self) -> bool {
        self.resolver.strategy() == ResolutionStrategy::Cached
    }

    /// The provider's algorithm catalog
    pub fn catalog(&self) -> &AlgorithmCatalog {
        &self.catalog
    }

    /// The provider's entries in the host property protocol
    pub fn properties(&self) -> &BTreeMap<String, String> {
        self.properties.get_or_init(|| self.catalog.properties())
    }
}

impl fmt::Debug for SecurityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityProvider")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("capabilities", &self.gate.capabilities())
            .field("services", &self.catalog.len())
            .field("resolver", &self.resolver.strategy())
            .finish()
    }
}

/// Builder for `SecurityProvider`
pub struct SecurityProviderBuilder {
    name: String,
    version: f64,
    info: String,
    host: Arc<dyn HostLookup>,
    capabilities: Capabilities,
    catalog: Option<AlgorithmCatalog>,
}

impl Default for SecurityProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityProviderBuilder {
    /// Builder with the default provider metadata, an empty host and
    /// default capabilities
    pub fn new() -> Self {
        Self {
            name: PROVIDER_NAME.to_string(),
            version: PROVIDER_VERSION,
            info: PROVIDER_INFO.to_string(),
            host: Arc::new(EmptyHost),
            capabilities: Capabilities::default(),
            catalog: None,
        }
    }

    /// Set the provider name
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the provider version
    pub fn version(mut self, version: f64) -> Self {
        self.version = version;
        self
    }

    /// Set the provider description
    pub fn info(mut self, info: &str) -> Self {
        self.info = info.to_string();
        self
    }

    /// Set the host framework lookups are delegated to
    pub fn host(mut self, host: Arc<dyn HostLookup>) -> Self {
        self.host = host;
        self
    }

    /// Set the capabilities granted by the environment
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Start from a pre-filled catalog
    ///
    /// The built-in registrations are added on top; they must not conflict
    /// with what the catalog already holds. Key factory and secure random
    /// entries are dropped when the capabilities do not permit them.
    pub fn catalog(mut self, catalog: AlgorithmCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Run the registrations and select the resolver
    pub fn build(self) -> Result<SecurityProvider> {
        let gate = ExecutionModeGate::new(self.capabilities);

        let mut catalog = match self.catalog {
            Some(catalog) => adopt(catalog, &self.name, &self.capabilities)?,
            None => AlgorithmCatalog::new(&self.name),
        };
        gate.register(&mut catalog)?;
        let catalog = Arc::new(catalog);

        let resolver = gate.select_resolver(Arc::clone(&catalog), self.host);
        log::info!(
            "{} provider {} ready: {:?} mode, {} services, {} resolution",
            self.name,
            self.version,
            gate.mode(),
            catalog.len(),
            resolver.strategy()
        );

        Ok(SecurityProvider {
            name: self.name,
            version: self.version,
            info: self.info,
            gate,
            catalog,
            resolver,
            properties: OnceCell::new(),
        })
    }
}

// Rebuilds a supplied catalog under the provider's name, without the
// non-deterministic entries the environment does not permit
fn adopt(catalog: AlgorithmCatalog, provider: &str, capabilities: &Capabilities) -> Result<AlgorithmCatalog> {
    let restricted = !capabilities.allow_non_deterministic_registration
        && catalog.services().iter().any(|entry| entry.kind.is_non_deterministic());

    if catalog.provider() == provider && !restricted {
        return Ok(catalog);
    }
    if restricted {
        log::warn!("Dropping non-deterministic entries from the supplied catalog");
    }

    let properties = catalog.properties().into_iter().filter(|(key, _)| {
        !restricted
            || key
                .parse::<ProviderKey>()
                .map_or(true, |key| !key.kind().is_non_deterministic())
    });
    AlgorithmCatalog::from_properties(provider, properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{algorithms, aliases, oids};
    use crate::core::error::Error;
    use crate::core::registry::kind::ServiceKind;

    #[test]
    fn test_default_provider() {
        let provider = SecurityProvider::builder()
            .capabilities(Capabilities::standard())
            .build()
            .unwrap();

        assert_eq!(provider.name(), PROVIDER_NAME);
        assert_eq!(provider.version(), PROVIDER_VERSION);
        assert_eq!(provider.info(), PROVIDER_INFO);
        assert!(provider.is_caching());
        assert_eq!(provider.mode(), ExecutionMode::Standard);
    }

    #[test]
    fn test_composite_signature_names_agree() {
        let provider = SecurityProvider::new(Arc::new(EmptyHost), Capabilities::standard()).unwrap();

        let canonical = provider.get_service("Signature", algorithms::COMPOSITE_SIGNATURE).unwrap();
        let friendly = provider.get_service("Signature", aliases::COMPOSITE_SIGNATURE).unwrap();
        let oid = provider.get_service("Signature", oids::COMPOSITE_SIGNATURE).unwrap();

        assert_eq!(canonical, friendly);
        assert_eq!(canonical, oid);
        assert_eq!(canonical.provider, PROVIDER_NAME);
    }

    #[test]
    fn test_properties_are_computed_once() {
        let provider = SecurityProvider::new(Arc::new(EmptyHost), Capabilities::standard()).unwrap();
        let first = provider.properties() as *const _;
        let second = provider.properties() as *const _;
        assert_eq!(first, second);
        assert_eq!(
            provider.properties()["KeyFactory.COMPOSITE"],
            "composite_provider::CompositeKeyFactory"
        );
    }

    #[test]
    fn test_conflicting_catalog_aborts_build() {
        let mut catalog = AlgorithmCatalog::default();
        catalog.register_signature("OTHERSIG", "impl::Other").unwrap();
        catalog
            .register_alias(ServiceKind::Signature, aliases::COMPOSITE_SIGNATURE, "OTHERSIG")
            .unwrap();

        let result = SecurityProvider::builder().catalog(catalog).build();
        assert!(matches!(result, Err(Error::ConfigurationConflict { .. })));
    }

    #[test]
    fn test_custom_name_carries_into_services() {
        let mut catalog = AlgorithmCatalog::default();
        catalog.register_signature("EXTRASIG", "impl::Extra").unwrap();

        let provider = SecurityProvider::builder()
            .name("Custom")
            .catalog(catalog)
            .build()
            .unwrap();

        let extra = provider.get_service("Signature", "EXTRASIG").unwrap();
        assert_eq!(extra.provider, "Custom");
        assert_eq!(provider.catalog().provider(), "Custom");
    }

    #[test]
    fn test_supplied_catalog_respects_deterministic_mode() {
        let mut catalog = AlgorithmCatalog::default();
        catalog.register_signature("EXTRASIG", "impl::Extra").unwrap();
        catalog.register_key_factory("EXTRAKEY", "impl::ExtraKey").unwrap();
        catalog
            .register_alias(ServiceKind::KeyFactory, "ExtraKey", "EXTRAKEY")
            .unwrap();

        let provider = SecurityProvider::builder()
            .capabilities(Capabilities::deterministic())
            .catalog(catalog)
            .build()
            .unwrap();

        assert!(provider.get_service("Signature", "EXTRASIG").is_some());
        assert!(provider.get_service("KeyFactory", "EXTRAKEY").is_none());
        assert!(provider.get_service("KeyFactory", "ExtraKey").is_none());
    }
}
