/*!
Provider property keys.

The host framework describes a provider as a flat string map:

- `Signature.COMPOSITESIG` → implementation identifier
- `Alg.Alias.Signature.CompositeSignature` → canonical name
- `Alg.Alias.Signature.OID.2.25.1` → canonical name

This module parses and formats those keys.
*/

use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};
use crate::core::registry::kind::ServiceKind;

const ALIAS_PREFIX: &str = "Alg.Alias.";
const OID_PREFIX: &str = "OID.";

/// A single key of the provider property map
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKey {
    /// `<Kind>.<algorithm>`
    Service { kind: ServiceKind, algorithm: String },
    /// `Alg.Alias.<Kind>.<alias>`
    Alias { kind: ServiceKind, alias: String },
    /// `Alg.Alias.<Kind>.OID.<oid>`
    OidAlias { kind: ServiceKind, oid: String },
}

impl ProviderKey {
    /// Kind the key belongs to
    pub fn kind(&self) -> ServiceKind {
        match self {
            ProviderKey::Service { kind, .. }
            | ProviderKey::Alias { kind, .. }
            | ProviderKey::OidAlias { kind, .. } => *kind,
        }
    }

    /// Whether the key is any flavor of alias
    pub fn is_alias(&self) -> bool {
        !matches!(self, ProviderKey::Service { .. })
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKey::Service { kind, algorithm } => write!(f, "{}.{}", kind, algorithm),
            ProviderKey::Alias { kind, alias } => write!(f, "{}{}.{}", ALIAS_PREFIX, kind, alias),
            ProviderKey::OidAlias { kind, oid } => {
                write!(f, "{}{}.{}{}", ALIAS_PREFIX, kind, OID_PREFIX, oid)
            }
        }
    }
}

impl FromStr for ProviderKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidProviderKey(s.to_string());

        let (is_alias, rest) = match s.strip_prefix(ALIAS_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (kind, name) = rest.split_once('.').ok_or_else(invalid)?;
        let kind: ServiceKind = kind.parse()?;
        if name.is_empty() {
            return Err(invalid());
        }

        if !is_alias {
            return Ok(ProviderKey::Service {
                kind,
                algorithm: name.to_string(),
            });
        }

        match name.strip_prefix(OID_PREFIX) {
            Some("") => Err(invalid()),
            Some(oid) => Ok(ProviderKey::OidAlias {
                kind,
                oid: oid.to_string(),
            }),
            None => Ok(ProviderKey::Alias {
                kind,
                alias: name.to_string(),
            }),
        }
    }
}
