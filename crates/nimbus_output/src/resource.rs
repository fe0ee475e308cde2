//! Resource identity handles.
//!
//! A [`Resource`] is the client-side token for a remote object. It carries no
//! state of its own: outputs use it purely as a provenance marker inside a
//! [`DependencySet`](crate::DependencySet).

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

/// Unique identifier for a resource handle.
///
/// Resource IDs are generated using nanoid, so handles created independently
/// never collide and no registry is needed to hand them out.
///
/// Internally uses `Arc<str>` for cheap cloning (reference count bump only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(Arc<str>);

impl ResourceId {
    /// Creates a new resource ID with a unique nanoid.
    #[must_use]
    pub fn new() -> Self {
        Self(nanoid::nanoid!().into())
    }

    /// Creates a resource ID from a specific string value.
    ///
    /// Two handles built from the same ID compare equal, which is how a
    /// transport layer maps engine objects back onto existing handles.
    #[must_use]
    pub fn from_string(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "res_{}", self.0)
    }
}

/// Opaque identity of a remote resource.
///
/// Equality and hashing consider only the [`ResourceId`]: two handles are equal
/// iff they denote the same remote object. The type token and name are kept
/// for diagnostics. There is deliberately no `Ord` implementation; handles are
/// only ever collected into sets.
///
/// # Example
///
/// ```
/// use nimbus_output::Resource;
///
/// let bucket = Resource::new("aws:s3/bucket:Bucket", "logs");
/// let same = bucket.clone();
/// let other = Resource::new("aws:s3/bucket:Bucket", "logs");
///
/// assert_eq!(bucket, same);
/// assert_ne!(bucket, other);
/// ```
#[derive(Clone)]
pub struct Resource {
    id: ResourceId,
    type_token: Arc<str>,
    name: Arc<str>,
}

impl Resource {
    /// Creates a handle for a new resource with a fresh identity.
    #[must_use]
    pub fn new(type_token: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self::with_id(ResourceId::new(), type_token, name)
    }

    /// Creates a handle with an explicit identity.
    #[must_use]
    pub fn with_id(
        id: ResourceId,
        type_token: impl Into<Arc<str>>,
        name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id,
            type_token: type_token.into(),
            name: name.into(),
        }
    }

    /// Returns the identity of this handle.
    #[must_use]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Returns the resource type token, e.g. `pulumi:providers:aws`.
    #[must_use]
    pub fn type_token(&self) -> &str {
        &self.type_token
    }

    /// Returns the logical resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("id", &self.id.as_str())
            .field("type", &&*self.type_token)
            .field("name", &&*self.name)
            .finish()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} ({})", self.type_token, self.name, self.id)
    }
}
