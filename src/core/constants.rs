/*!
Constants for the composite provider.

Provider metadata, the canonical algorithm names it contributes and the
object identifiers those algorithms are also known by.
*/

/// Name the provider registers under
pub const PROVIDER_NAME: &str = "Composite";

/// Provider version advertised to the host framework
pub const PROVIDER_VERSION: f64 = 0.1;

/// Human readable provider description
pub const PROVIDER_INFO: &str = "Composite security provider wrapper";

/// Canonical algorithm names
pub mod algorithms {
    /// Composite signature algorithm
    pub const COMPOSITE_SIGNATURE: &str = "COMPOSITESIG";

    /// Composite key algorithm, served by the key factory
    pub const COMPOSITE_KEY: &str = "COMPOSITE";

    /// Platform secure random algorithm
    pub const PLATFORM_SECURE_RANDOM: &str = "PlatformPRNG";
}

/// Friendly aliases for the canonical names
pub mod aliases {
    /// Friendly name of the composite signature algorithm
    pub const COMPOSITE_SIGNATURE: &str = "CompositeSignature";

    /// Friendly name of the composite key algorithm
    pub const COMPOSITE_KEY: &str = "CompositeKey";
}

/// Object identifiers.
///
/// Both sit under the UUID arc `2.25`.
pub mod oids {
    /// OID of the composite key algorithm
    pub const COMPOSITE_KEY: &str = "2.25.30086077608615255153862931087626791002";

    /// OID of the composite signature algorithm
    pub const COMPOSITE_SIGNATURE: &str = "2.25.30086077608615255153862931087626791003";
}

/// Implementation identifiers handed to the host framework
pub mod implementations {
    pub const COMPOSITE_SIGNATURE: &str = "composite_provider::CompositeSignature";
    pub const COMPOSITE_KEY_FACTORY: &str = "composite_provider::CompositeKeyFactory";
    pub const PLATFORM_SECURE_RANDOM: &str = "composite_provider::PlatformSecureRandom";
}

/// Environment variables read by `Capabilities::from_env`
pub mod env {
    /// `standard` or `deterministic`
    pub const MODE: &str = "COMPOSITE_PROVIDER_MODE";

    /// Overrides the non-deterministic registration flag
    pub const NON_DETERMINISTIC: &str = "COMPOSITE_PROVIDER_NON_DETERMINISTIC";

    /// Overrides the shared cache flag
    pub const SHARED_CACHE: &str = "COMPOSITE_PROVIDER_SHARED_CACHE";
}
