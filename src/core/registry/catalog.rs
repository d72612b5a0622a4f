/*!
Algorithm catalog.

The fixed table of services the provider contributes, together with the
friendly and OID aliases they are also known by. The catalog is filled
during provider construction and only read afterwards.
*/

use std::collections::{BTreeMap, HashMap};

use crate::config_conflict;
use crate::core::constants::PROVIDER_NAME;
use crate::core::error::{Error, Result};
use crate::core::registry::kind::ServiceKind;
use crate::core::registry::properties::ProviderKey;
use crate::core::registry::service::Service;

const OID_PREFIX: &str = "OID.";

/// A registered service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub kind: ServiceKind,
    pub canonical_name: String,
    pub implementation: String,
}

/// Flavor of an alias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasForm {
    /// Human readable name
    Friendly,
    /// Object identifier, also reachable as `OID.<oid>`
    Oid,
}

/// An alternate name for a registered service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub kind: ServiceKind,
    pub alias_name: String,
    pub canonical_name: String,
    pub form: AliasForm,
}

// Names match ASCII case-insensitively, like the host framework does
type NameKey = (ServiceKind, String);

fn name_key(kind: ServiceKind, name: &str) -> NameKey {
    (kind, name.to_ascii_uppercase())
}

/// Registry of the provider's algorithms and aliases
#[derive(Debug, Clone)]
pub struct AlgorithmCatalog {
    provider: String,
    services: Vec<ServiceEntry>,
    service_index: HashMap<NameKey, usize>,
    aliases: Vec<AliasEntry>,
    alias_index: HashMap<NameKey, usize>,
}

impl Default for AlgorithmCatalog {
    fn default() -> Self {
        Self::new(PROVIDER_NAME)
    }
}

impl AlgorithmCatalog {
    /// Create an empty catalog for the named provider
    pub fn new(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            services: Vec::new(),
            service_index: HashMap::new(),
            aliases: Vec::new(),
            alias_index: HashMap::new(),
        }
    }

    /// Build a catalog from the host's provider property protocol
    ///
    /// Service keys are registered before aliases, so the map can come in
    /// any order.
    pub fn from_properties<I, K, V>(provider: &str, properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut services = Vec::new();
        let mut oid_aliases = Vec::new();
        let mut aliases = Vec::new();

        for (key, value) in properties {
            let value = value.as_ref().to_string();
            match key.as_ref().parse::<ProviderKey>()? {
                ProviderKey::Service { kind, algorithm } => services.push((kind, algorithm, value)),
                ProviderKey::OidAlias { kind, oid } => oid_aliases.push((kind, oid, value)),
                ProviderKey::Alias { kind, alias } => aliases.push((kind, alias, value)),
            }
        }

        let mut catalog = Self::new(provider);
        for (kind, algorithm, implementation) in services {
            catalog.register(kind, &algorithm, &implementation)?;
        }
        // OID keys first: their plain `Alg.Alias.<Kind>.<oid>` twins then
        // land on an identical mapping and are accepted as repeats.
        for (kind, oid, target) in oid_aliases {
            catalog.register_oid_alias(kind, &oid, &target)?;
        }
        for (kind, alias, target) in aliases {
            catalog.register_alias(kind, &alias, &target)?;
        }
        Ok(catalog)
    }

    /// Name of the provider the catalog belongs to
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Register a signature service under its canonical name
    pub fn register_signature(&mut self, canonical_name: &str, implementation: &str) -> Result<()> {
        self.register(ServiceKind::Signature, canonical_name, implementation)
    }

    /// Register a key factory service under its canonical name
    pub fn register_key_factory(&mut self, canonical_name: &str, implementation: &str) -> Result<()> {
        self.register(ServiceKind::KeyFactory, canonical_name, implementation)
    }

    /// Register a secure random service under its canonical name
    pub fn register_secure_random(&mut self, canonical_name: &str, implementation: &str) -> Result<()> {
        self.register(ServiceKind::SecureRandom, canonical_name, implementation)
    }

    /// Register a service of any kind
    ///
    /// Repeating an identical registration is accepted. A different
    /// implementation for a registered name is a conflict.
    pub fn register(&mut self, kind: ServiceKind, canonical_name: &str, implementation: &str) -> Result<()> {
        let key = name_key(kind, canonical_name);

        if let Some(&index) = self.service_index.get(&key) {
            let existing = &self.services[index];
            if existing.implementation == implementation {
                return Ok(());
            }
            return config_conflict!(kind, canonical_name, existing.implementation, implementation);
        }
        if let Some(&index) = self.alias_index.get(&key) {
            let alias = &self.aliases[index];
            return config_conflict!(kind, canonical_name, alias.canonical_name, implementation);
        }

        log::debug!("Registering {}.{} -> {}", kind, canonical_name, implementation);
        self.service_index.insert(key, self.services.len());
        self.services.push(ServiceEntry {
            kind,
            canonical_name: canonical_name.to_string(),
            implementation: implementation.to_string(),
        });
        Ok(())
    }

    /// Register a friendly alias for a canonical name
    ///
    /// Names starting with `OID.` are refused with `ReservedAliasName`.
    pub fn register_alias(&mut self, kind: ServiceKind, alias_name: &str, canonical_name: &str) -> Result<()> {
        self.register_alias_form(kind, alias_name, canonical_name, AliasForm::Friendly)
    }

    /// Register an OID alias for a canonical name
    ///
    /// The OID resolves both bare and with the `OID.` prefix.
    pub fn register_oid_alias(&mut self, kind: ServiceKind, oid: &str, canonical_name: &str) -> Result<()> {
        self.register_alias_form(kind, oid, canonical_name, AliasForm::Oid)
    }

    fn register_alias_form(
        &mut self,
        kind: ServiceKind,
        alias_name: &str,
        canonical_name: &str,
        form: AliasForm,
    ) -> Result<()> {
        if strip_oid_prefix(alias_name).is_some() {
            return Err(Error::ReservedAliasName {
                kind,
                alias: alias_name.to_string(),
            });
        }

        let target = match self.service_index.get(&name_key(kind, canonical_name)) {
            Some(&index) => self.services[index].canonical_name.clone(),
            None => {
                return Err(Error::UnknownAliasTarget {
                    kind,
                    alias: alias_name.to_string(),
                    target: canonical_name.to_string(),
                });
            }
        };

        let key = name_key(kind, alias_name);
        if let Some(&index) = self.service_index.get(&key) {
            let shadowed = &self.services[index].canonical_name;
            if shadowed == &target {
                return Ok(());
            }
            return config_conflict!(kind, alias_name, shadowed, target);
        }
        if let Some(&index) = self.alias_index.get(&key) {
            let existing = &mut self.aliases[index];
            if existing.canonical_name != target {
                return config_conflict!(kind, alias_name, existing.canonical_name, target);
            }
            // An OID registration upgrades a friendly alias of the same name
            if form == AliasForm::Oid && existing.form == AliasForm::Friendly {
                log::debug!("Upgrading alias {}.{} to OID form", kind, alias_name);
                existing.form = AliasForm::Oid;
            }
            return Ok(());
        }

        log::debug!("Registering {:?} alias {}.{} -> {}", form, kind, alias_name, target);
        self.alias_index.insert(key, self.aliases.len());
        self.aliases.push(AliasEntry {
            kind,
            alias_name: alias_name.to_string(),
            canonical_name: target,
            form,
        });
        Ok(())
    }

    /// Find the service entry an algorithm name refers to
    ///
    /// Accepts the canonical name, a friendly alias, an OID or `OID.<oid>`.
    pub fn entry(&self, kind: ServiceKind, algorithm: &str) -> Option<&ServiceEntry> {
        let key = name_key(kind, algorithm);
        if let Some(&index) = self.service_index.get(&key) {
            return Some(&self.services[index]);
        }

        let alias = match self.alias_index.get(&key) {
            Some(&index) => &self.aliases[index],
            None => {
                let oid = strip_oid_prefix(algorithm)?;
                let &index = self.alias_index.get(&name_key(kind, oid))?;
                let alias = &self.aliases[index];
                if alias.form != AliasForm::Oid {
                    return None;
                }
                alias
            }
        };

        self.service_index
            .get(&name_key(kind, &alias.canonical_name))
            .map(|&index| &self.services[index])
    }

    /// Normalize an algorithm name to its canonical name
    pub fn canonicalize(&self, kind: ServiceKind, algorithm: &str) -> Option<&str> {
        self.entry(kind, algorithm).map(|entry| entry.canonical_name.as_str())
    }

    /// Whether the catalog claims an algorithm name
    pub fn contains(&self, kind: ServiceKind, algorithm: &str) -> bool {
        self.entry(kind, algorithm).is_some()
    }

    /// Build the service descriptor for an algorithm name
    pub fn service(&self, kind: ServiceKind, algorithm: &str) -> Option<Service> {
        let entry = self.entry(kind, algorithm)?;
        let aliases = self.aliases_of(kind, &entry.canonical_name);
        Some(
            Service::new(&self.provider, kind.as_str(), &entry.canonical_name, &entry.implementation)
                .with_aliases(aliases),
        )
    }

    /// Aliases of a canonical name, in registration order
    pub fn aliases_of(&self, kind: ServiceKind, canonical_name: &str) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|alias| alias.kind == kind && alias.canonical_name.eq_ignore_ascii_case(canonical_name))
            .map(|alias| alias.alias_name.as_str())
            .collect()
    }

    /// Registered services, in registration order
    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }

    /// Registered aliases, in registration order
    pub fn aliases(&self) -> &[AliasEntry] {
        &self.aliases
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether no services are registered
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Render the catalog in the host's provider property protocol
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();

        for entry in &self.services {
            let key = ProviderKey::Service {
                kind: entry.kind,
                algorithm: entry.canonical_name.clone(),
            };
            properties.insert(key.to_string(), entry.implementation.clone());
        }

        for alias in &self.aliases {
            let key = ProviderKey::Alias {
                kind: alias.kind,
                alias: alias.alias_name.clone(),
            };
            properties.insert(key.to_string(), alias.canonical_name.clone());

            if alias.form == AliasForm::Oid {
                let key = ProviderKey::OidAlias {
                    kind: alias.kind,
                    oid: alias.alias_name.clone(),
                };
                properties.insert(key.to_string(), alias.canonical_name.clone());
            }
        }

        properties
    }
}

fn strip_oid_prefix(algorithm: &str) -> Option<&str> {
    let prefix = algorithm.get(..OID_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(OID_PREFIX) {
        Some(&algorithm[OID_PREFIX.len()..])
    } else {
        None
    }
}
