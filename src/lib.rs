//! Deferred values for infrastructure-as-code programs in Rust.
//!
//! Resource properties are not known until the orchestration engine has
//! produced them. Nimbus represents them as [`Output`](prelude::Output)s that
//! carry knowability, secrecy and the set of resources they came from, and
//! keeps that metadata correct through every transformation.
//!
//! ```
//! use nimbus::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let provider = DependencyProviderResource::new("urn:a::b::pulumi:providers:aws::prov::12345").unwrap();
//! let token = Output::secret("t0k3n".to_string());
//!
//! let header = apply((provider.id().clone(), token), |(id, token)| format!("{id}:{token}"));
//! let data = header.resolve().await.unwrap();
//!
//! assert!(data.is_secret());
//! assert!(data.dependencies().contains(provider.resource()));
//! # });
//! ```

pub use nimbus_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use nimbus_internal::prelude::*;
}
