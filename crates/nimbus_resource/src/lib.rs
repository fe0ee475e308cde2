//! Resource references and stand-in resources for Nimbus (Layer 2).
//!
//! - [`parse_reference`] / [`package_name`] - Decompose a provider reference
//! - [`ResourceReference`] - Owned, parsed reference
//! - [`CustomResource`] / [`ProviderResource`] - Common resource shape
//! - [`DependencyProviderResource`] - Provider known only by its reference
//! - [`StackReference`] - Typed access to another stack's exports
//!
//! # Example
//!
//! ```
//! use nimbus_output::OutputTuple;
//! use nimbus_resource::{CustomResource, DependencyProviderResource};
//!
//! # futures::executor::block_on(async {
//! let provider = DependencyProviderResource::new(
//!     "urn:pulumi:dev::network::pulumi:providers:aws::east::0f3c",
//! ).unwrap();
//!
//! let label = (provider.urn().clone(), provider.id().clone())
//!     .apply(|(urn, id)| format!("{id} ({} chars of urn)", urn.len()));
//!
//! let data = label.resolve().await.unwrap();
//! assert!(data.dependencies().contains(provider.resource()));
//! # });
//! ```

mod error;
mod provider;
mod reference;
mod resource;
mod stack_reference;

pub use error::{ReferenceError, StackReferenceError};
pub use provider::{DependencyProviderResource, PROVIDER_TYPE_PREFIX};
pub use reference::{
    REFERENCE_DELIMITER, ResourceReference, TYPE_HIERARCHY_DELIMITER, package_name,
    parse_reference,
};
pub use resource::{CustomResource, ProviderResource};
pub use stack_reference::{STACK_REFERENCE_TYPE, StackOutputs, StackReference};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::{
        CustomResource, DependencyProviderResource, ProviderResource, ReferenceError,
        ResourceReference, StackReference, package_name, parse_reference,
    };
}
