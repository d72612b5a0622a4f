//! Core components for the composite provider.
//!
//! This module contains the algorithm registry, the service resolution
//! strategies, provider constants and error handling.

// Algorithm registry and resolution
pub mod registry;

// Provider constants
pub mod constants;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{Error, Result};
pub use self::constants::{PROVIDER_NAME, PROVIDER_VERSION, PROVIDER_INFO};
