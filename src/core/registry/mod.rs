/*!
Algorithm registry and service resolution.

The catalog records what the provider contributes, the gate decides what
the environment allows, and the resolver (cached or not) answers lookups
on behalf of the host framework.
*/

pub mod cache;
pub mod catalog;
pub mod config;
pub mod gate;
pub mod kind;
pub mod properties;
pub mod provider;
pub mod resolver;
pub mod service;

// Re-export registry types
pub use cache::{ResolutionCache, ResolutionKey};
pub use catalog::{AlgorithmCatalog, AliasEntry, AliasForm, ServiceEntry};
pub use config::{Capabilities, ExecutionMode};
pub use gate::ExecutionModeGate;
pub use kind::ServiceKind;
pub use properties::ProviderKey;
pub use provider::{SecurityProvider, SecurityProviderBuilder};
pub use resolver::{DirectResolver, ResolutionStrategy, ResolveService};
pub use service::{EmptyHost, HostLookup, Service, StaticHost};
