/*!
Execution capability configuration.

Hosts that run the provider in a restricted, deterministic environment
must not register key generation or randomness services, and may not be
able to share a mutable cache between threads. `Capabilities` records
what the environment allows.
*/

use crate::core::constants::env;

/// Execution mode implied by a set of capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Everything permitted
    Standard,
    /// Nothing non-deterministic or shared permitted
    Deterministic,
    /// Some capabilities individually disabled
    Mixed,
}

/// Capabilities the host environment grants the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    /// Whether key factory and secure random services may be registered
    pub allow_non_deterministic_registration: bool,

    /// Whether a concurrent resolution cache may be constructed
    pub allow_shared_mutable_cache: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        if cfg!(feature = "deterministic") {
            Self::deterministic()
        } else {
            Self::standard()
        }
    }
}

impl Capabilities {
    /// Capabilities of an unrestricted environment
    pub fn standard() -> Self {
        Self {
            allow_non_deterministic_registration: true,
            allow_shared_mutable_cache: true,
        }
    }

    /// Capabilities of the restricted deterministic environment
    pub fn deterministic() -> Self {
        Self {
            allow_non_deterministic_registration: false,
            allow_shared_mutable_cache: false,
        }
    }

    /// Set the non-deterministic registration flag
    pub fn with_non_deterministic_registration(mut self, allow: bool) -> Self {
        self.allow_non_deterministic_registration = allow;
        self
    }

    /// Set the shared cache flag
    pub fn with_shared_mutable_cache(mut self, allow: bool) -> Self {
        self.allow_shared_mutable_cache = allow;
        self
    }

    /// Mode these capabilities amount to
    pub fn mode(&self) -> ExecutionMode {
        match (
            self.allow_non_deterministic_registration,
            self.allow_shared_mutable_cache,
        ) {
            (true, true) => ExecutionMode::Standard,
            (false, false) => ExecutionMode::Deterministic,
            _ => ExecutionMode::Mixed,
        }
    }

    /// Default capabilities with environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut capabilities = Self::default();

        if let Some(val) = lookup(env::MODE) {
            match val.trim().to_ascii_lowercase().as_str() {
                "standard" => capabilities = Self::standard(),
                "deterministic" => capabilities = Self::deterministic(),
                _ => log::warn!("Ignoring {}={:?}: expected standard or deterministic", env::MODE, val),
            }
        }

        if let Some(val) = lookup(env::NON_DETERMINISTIC) {
            match parse_flag(&val) {
                Some(allow) => capabilities.allow_non_deterministic_registration = allow,
                None => log::warn!("Ignoring {}={:?}: not a boolean", env::NON_DETERMINISTIC, val),
            }
        }

        if let Some(val) = lookup(env::SHARED_CACHE) {
            match parse_flag(&val) {
                Some(allow) => capabilities.allow_shared_mutable_cache = allow,
                None => log::warn!("Ignoring {}={:?}: not a boolean", env::SHARED_CACHE, val),
            }
        }

        capabilities
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_presets() {
        assert_eq!(Capabilities::standard().mode(), ExecutionMode::Standard);
        assert_eq!(Capabilities::deterministic().mode(), ExecutionMode::Deterministic);
        assert_eq!(
            Capabilities::standard().with_shared_mutable_cache(false).mode(),
            ExecutionMode::Mixed
        );
    }

    #[test]
    fn test_default_follows_feature() {
        let expected = if cfg!(feature = "deterministic") {
            Capabilities::deterministic()
        } else {
            Capabilities::standard()
        };
        assert_eq!(Capabilities::default(), expected);
    }

    #[test]
    fn test_mode_override() {
        let caps = Capabilities::from_lookup(lookup_from(&[(env::MODE, "Deterministic")]));
        assert_eq!(caps, Capabilities::deterministic());
    }

    #[test]
    fn test_flag_overrides_apply_after_mode() {
        let caps = Capabilities::from_lookup(lookup_from(&[
            (env::MODE, "deterministic"),
            (env::SHARED_CACHE, "on"),
        ]));
        assert!(!caps.allow_non_deterministic_registration);
        assert!(caps.allow_shared_mutable_cache);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let caps = Capabilities::from_lookup(lookup_from(&[
            (env::MODE, "sandboxed"),
            (env::NON_DETERMINISTIC, "maybe"),
        ]));
        assert_eq!(caps, Capabilities::default());
    }
}
