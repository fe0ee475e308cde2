//! Resource traits.
//!
//! These traits give resource objects a common shape so that code holding a
//! provider or resource does not need to know how it was obtained.

use nimbus_output::{Output, OutputTuple, Resource};

use crate::reference::REFERENCE_DELIMITER;

/// A resource managed by a provider, identified by a URN and an ID.
///
/// The [`Resource`] handle returned by [`resource`](Self::resource) is the
/// identity that appears in the dependency sets of the URN and ID outputs.
pub trait CustomResource: Send + Sync {
    /// Returns the identity handle of this resource.
    fn resource(&self) -> &Resource;

    /// Returns the resource's URN.
    fn urn(&self) -> &Output<String>;

    /// Returns the provider-assigned ID.
    fn id(&self) -> &Output<String>;
}

/// A provider resource.
pub trait ProviderResource: CustomResource {
    /// Returns the package this provider serves, e.g. `aws`.
    ///
    /// Empty if the package could not be determined.
    fn package(&self) -> &str;

    /// Returns the reference string (`<urn>::<id>`) for this provider.
    ///
    /// Unknown while either the URN or the ID is unknown.
    fn reference(&self) -> Output<String> {
        (self.urn().clone(), self.id().clone())
            .apply(|(urn, id)| format!("{urn}{REFERENCE_DELIMITER}{id}"))
    }
}
