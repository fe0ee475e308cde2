//! Stand-in provider resources.

use nimbus_output::{DependencySet, Output, Resource};

use crate::error::ReferenceError;
use crate::reference::{package_name, parse_reference};
use crate::resource::{CustomResource, ProviderResource};

/// Prefix of every provider type token.
pub const PROVIDER_TYPE_PREFIX: &str = "pulumi:providers:";

/// A provider known only by its reference string.
///
/// `DependencyProviderResource` stands in for a provider when no full provider
/// object is available. Its only properties are its URN and ID, both already
/// known, not secret, and depending on the stand-in itself.
///
/// # Example
///
/// ```
/// use nimbus_resource::{CustomResource, DependencyProviderResource, ProviderResource};
///
/// # futures::executor::block_on(async {
/// let provider = DependencyProviderResource::new("urn:a::b::pulumi:providers:aws::prov::12345").unwrap();
/// assert_eq!(provider.package(), "aws");
///
/// let id = provider.id().resolve().await.unwrap();
/// assert_eq!(id.value().map(String::as_str), Some("12345"));
/// assert!(id.dependencies().contains(provider.resource()));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct DependencyProviderResource {
    resource: Resource,
    package: String,
    urn: Output<String>,
    id: Output<String>,
}

impl DependencyProviderResource {
    /// Creates a stand-in from a provider reference.
    ///
    /// A reference whose type does not name a package still produces a
    /// stand-in, with an empty package name.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MalformedReference`] if the reference has no
    /// `::` separating the URN from the ID.
    pub fn new(reference: &str) -> Result<Self, ReferenceError> {
        let package = package_name(reference).unwrap_or_default();
        let (urn, id) = parse_reference(reference)?;

        if package.is_empty() {
            tracing::warn!(reference, "provider reference does not name a package");
        }

        let resource = Resource::new(format!("{PROVIDER_TYPE_PREFIX}{package}"), "");
        let dependencies = DependencySet::single(resource.clone());

        tracing::debug!(package, urn, id, "created dependency provider resource");

        Ok(Self {
            urn: Output::create(urn.to_owned(), true, false, dependencies.clone()),
            id: Output::create(id.to_owned(), true, false, dependencies),
            package: package.to_owned(),
            resource,
        })
    }
}

impl CustomResource for DependencyProviderResource {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn urn(&self) -> &Output<String> {
        &self.urn
    }

    fn id(&self) -> &Output<String> {
        &self.id
    }
}

impl ProviderResource for DependencyProviderResource {
    fn package(&self) -> &str {
        &self.package
    }
}
