/*!
# Composite Provider

A security provider that contributes the composite signature and composite
key algorithms to a host cryptography framework, and answers the host's
service lookups through a memoizing resolver.

## Overview

- An algorithm catalog of canonical names, friendly aliases and OIDs
- Rendering to and from the host's string property protocol
- An execution mode gate for restricted, deterministic environments, where
  key generation and randomness services are not registered and lookups
  are not cached
- A lock-free resolution cache that also remembers misses
- Transparent delegation to the host for everything the provider does not
  claim

## Example

```
use std::sync::Arc;
use composite_provider::{Capabilities, EmptyHost, SecurityProvider};

let provider = SecurityProvider::new(Arc::new(EmptyHost), Capabilities::standard())?;
let service = provider.get_service("Signature", "CompositeSignature").unwrap();
assert_eq!(service.algorithm, "COMPOSITESIG");
# Ok::<(), composite_provider::Error>(())
```
*/

// Core provider components
pub mod core;

// Serialization support (optional)
#[cfg(feature = "serde-support")]
pub mod serde;

// Re-export commonly used types for convenience
pub use self::core::error::{Error, Result};
pub use self::core::constants::{PROVIDER_NAME, PROVIDER_VERSION, PROVIDER_INFO, algorithms, aliases, oids};

// Re-export the registry
pub use self::core::registry::{
    AlgorithmCatalog, AliasEntry, AliasForm, Capabilities, DirectResolver, EmptyHost,
    ExecutionMode, ExecutionModeGate, HostLookup, ProviderKey, ResolutionCache, ResolutionKey,
    ResolutionStrategy, ResolveService, SecurityProvider, SecurityProviderBuilder, Service,
    ServiceEntry, ServiceKind, StaticHost,
};
