/*!
Error handling for the composite provider.

Only construction can fail. Lookups never return errors: an unknown
algorithm is an ordinary `None`, and a refused capability is recovered
by the execution mode gate before it reaches a caller.
*/

use thiserror::Error;

use crate::core::registry::kind::ServiceKind;

/// Result type for the composite provider
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the composite provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A name was registered twice with different targets
    #[error("Conflicting {kind} registration for {name}: {existing} vs {requested}")]
    ConfigurationConflict {
        kind: ServiceKind,
        name: String,
        existing: String,
        requested: String,
    },

    /// An alias points at a canonical name with no registered service
    #[error("Alias {alias} targets unregistered {kind} algorithm {target}")]
    UnknownAliasTarget {
        kind: ServiceKind,
        alias: String,
        target: String,
    },

    /// An alias name carrying the `OID.` prefix, which is reserved for
    /// prefixed OID lookups
    #[error("Alias {alias} for {kind} must not start with OID.")]
    ReservedAliasName { kind: ServiceKind, alias: String },

    /// The execution environment does not permit the requested capability
    #[error("Capability not available in this execution mode: {0}")]
    CapabilityUnavailable(&'static str),

    /// A property key that does not follow the provider key protocol
    #[error("Invalid provider key: {0}")]
    InvalidProviderKey(String),

    /// A service kind string outside the supported set
    #[error("Unknown service kind: {0}")]
    UnknownServiceKind(String),
}

/// Create a configuration conflict error
#[macro_export]
macro_rules! config_conflict {
    ($kind:expr, $name:expr, $existing:expr, $requested:expr) => {
        Err($crate::core::error::Error::ConfigurationConflict {
            kind: $kind,
            name: $name.to_string(),
            existing: $existing.to_string(),
            requested: $requested.to_string(),
        })
    };
}
