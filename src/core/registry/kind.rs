/*!
Service kinds contributed by the provider.

The host framework names service types with plain strings. Internally the
provider only ever contributes a closed set of them.
*/

use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};

/// Kinds of service the provider can register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceKind {
    /// Signature engines
    Signature,
    /// Key factories (key construction and decoding)
    KeyFactory,
    /// Secure random number generators
    SecureRandom,
}

impl ServiceKind {
    /// All kinds, in registration order
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Signature,
        ServiceKind::KeyFactory,
        ServiceKind::SecureRandom,
    ];

    /// Get the host framework's type name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Signature => "Signature",
            ServiceKind::KeyFactory => "KeyFactory",
            ServiceKind::SecureRandom => "SecureRandom",
        }
    }

    /// Whether registering this kind needs the non-deterministic capability
    pub fn is_non_deterministic(&self) -> bool {
        match self {
            ServiceKind::Signature => false,
            ServiceKind::KeyFactory | ServiceKind::SecureRandom => true,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownServiceKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.as_str().parse::<ServiceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "Cipher".parse::<ServiceKind>(),
            Err(Error::UnknownServiceKind("Cipher".to_string()))
        );
        // The host protocol's type names are case sensitive
        assert!("signature".parse::<ServiceKind>().is_err());
    }

    #[test]
    fn test_non_deterministic_kinds() {
        assert!(!ServiceKind::Signature.is_non_deterministic());
        assert!(ServiceKind::KeyFactory.is_non_deterministic());
        assert!(ServiceKind::SecureRandom.is_non_deterministic());
    }
}
