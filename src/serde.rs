/*!
Serialization support for the composite provider.

A `ProviderManifest` is a serializable snapshot of a provider: its
metadata, the capabilities it was built with and its property map. It's
only built when the `serde-support` feature is enabled.
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::registry::{AlgorithmCatalog, Capabilities, SecurityProvider, ServiceKind};

/// Serializable version of ServiceKind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerdeServiceKind {
    Signature,
    KeyFactory,
    SecureRandom,
}

impl From<ServiceKind> for SerdeServiceKind {
    fn from(kind: ServiceKind) -> Self {
        match kind {
            ServiceKind::Signature => SerdeServiceKind::Signature,
            ServiceKind::KeyFactory => SerdeServiceKind::KeyFactory,
            ServiceKind::SecureRandom => SerdeServiceKind::SecureRandom,
        }
    }
}

impl From<SerdeServiceKind> for ServiceKind {
    fn from(kind: SerdeServiceKind) -> Self {
        match kind {
            SerdeServiceKind::Signature => ServiceKind::Signature,
            SerdeServiceKind::KeyFactory => ServiceKind::KeyFactory,
            SerdeServiceKind::SecureRandom => ServiceKind::SecureRandom,
        }
    }
}

/// Serializable snapshot of a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderManifest {
    /// Provider name
    pub name: String,
    /// Provider version
    pub version: f64,
    /// Provider description
    pub info: String,
    /// Capabilities the provider was built with
    pub capabilities: Capabilities,
    /// Kinds with at least one registered service
    pub kinds: Vec<SerdeServiceKind>,
    /// Entries in the host property protocol
    pub properties: BTreeMap<String, String>,
}

impl ProviderManifest {
    /// Snapshot a provider
    pub fn from_provider(provider: &SecurityProvider) -> Self {
        let mut kinds: Vec<ServiceKind> = provider
            .catalog()
            .services()
            .iter()
            .map(|entry| entry.kind)
            .collect();
        kinds.sort();
        kinds.dedup();

        Self {
            name: provider.name().to_string(),
            version: provider.version(),
            info: provider.info().to_string(),
            capabilities: provider.capabilities(),
            kinds: kinds.into_iter().map(Into::into).collect(),
            properties: provider.properties().clone(),
        }
    }

    /// Rebuild the catalog described by the manifest
    pub fn to_catalog(&self) -> Result<AlgorithmCatalog> {
        AlgorithmCatalog::from_properties(&self.name, &self.properties)
    }
}
