/*!
Execution mode gate.

Runs once while the provider is being built. It decides which
registrations happen and which resolver serves lookups, and the decision
is fixed for the lifetime of the provider.
*/

use std::sync::Arc;

use crate::core::constants::{aliases, algorithms, implementations, oids};
use crate::core::error::Result;
use crate::core::registry::cache::ResolutionCache;
use crate::core::registry::catalog::AlgorithmCatalog;
use crate::core::registry::config::{Capabilities, ExecutionMode};
use crate::core::registry::kind::ServiceKind;
use crate::core::registry::resolver::{DirectResolver, ResolveService};
use crate::core::registry::service::HostLookup;

/// Capability decisions for one provider instance
#[derive(Debug, Clone, Copy)]
pub struct ExecutionModeGate {
    capabilities: Capabilities,
}

impl ExecutionModeGate {
    /// Create a gate over the capabilities granted by the host
    pub fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// Capabilities the gate decides with
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Execution mode implied by the capabilities
    pub fn mode(&self) -> ExecutionMode {
        self.capabilities.mode()
    }

    /// Register the provider's algorithms
    ///
    /// Key factory and secure random entries are only registered when the
    /// environment permits non-deterministic services.
    pub fn register(&self, catalog: &mut AlgorithmCatalog) -> Result<()> {
        register_deterministic(catalog)?;

        if self.capabilities.allow_non_deterministic_registration {
            register_non_deterministic(catalog)?;
        } else {
            log::debug!("Skipping non-deterministic registrations");
        }
        Ok(())
    }

    /// Choose the resolver that serves lookups
    ///
    /// Tries the caching resolver first. A refusal from the environment
    /// falls back to the uncached resolver and is not reported as an error.
    pub fn select_resolver(
        &self,
        catalog: Arc<AlgorithmCatalog>,
        host: Arc<dyn HostLookup>,
    ) -> Box<dyn ResolveService> {
        let direct = Arc::new(DirectResolver::new(catalog, host));

        match ResolutionCache::new(Arc::clone(&direct), &self.capabilities) {
            Ok(cache) => Box::new(cache),
            Err(err) => {
                log::debug!("Falling back to uncached resolution: {}", err);
                Box::new(direct)
            }
        }
    }
}

fn register_deterministic(catalog: &mut AlgorithmCatalog) -> Result<()> {
    catalog.register_signature(algorithms::COMPOSITE_SIGNATURE, implementations::COMPOSITE_SIGNATURE)?;
    catalog.register_alias(
        ServiceKind::Signature,
        aliases::COMPOSITE_SIGNATURE,
        algorithms::COMPOSITE_SIGNATURE,
    )?;
    catalog.register_oid_alias(
        ServiceKind::Signature,
        oids::COMPOSITE_SIGNATURE,
        algorithms::COMPOSITE_SIGNATURE,
    )
}

// Key generation and randomness are not available in deterministic mode
fn register_non_deterministic(catalog: &mut AlgorithmCatalog) -> Result<()> {
    catalog.register_key_factory(algorithms::COMPOSITE_KEY, implementations::COMPOSITE_KEY_FACTORY)?;
    catalog.register_alias(ServiceKind::KeyFactory, aliases::COMPOSITE_KEY, algorithms::COMPOSITE_KEY)?;
    catalog.register_oid_alias(ServiceKind::KeyFactory, oids::COMPOSITE_KEY, algorithms::COMPOSITE_KEY)?;

    catalog.register_secure_random(
        algorithms::PLATFORM_SECURE_RANDOM,
        implementations::PLATFORM_SECURE_RANDOM,
    )
}
