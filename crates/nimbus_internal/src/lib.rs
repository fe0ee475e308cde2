//! # Nimbus Internal Library
//!
//! Re-exports the core Nimbus crates for convenience.

/// Layer 1: Deferred outputs and resource identity.
pub use nimbus_output;

/// Layer 2: Resource references and stand-in resources.
pub use nimbus_resource;

/// Tracing subscriber configuration.
#[cfg(feature = "tracing")]
pub use nimbus_tracing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use nimbus_output::prelude::*;
    pub use nimbus_resource::prelude::*;
}
