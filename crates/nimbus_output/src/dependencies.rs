//! Immutable dependency sets.

use core::fmt;
use hashbrown::HashSet;
use std::sync::Arc;

use crate::resource::Resource;

/// The set of resources that contributed to a value.
///
/// A `DependencySet` is immutable once built. Cloning is a reference count
/// bump; [`union`](Self::union) produces a new set and leaves both inputs
/// untouched, so a set published inside an [`OutputData`](crate::OutputData)
/// can be shared freely between readers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    resources: Arc<HashSet<Resource>>,
}

impl DependencySet {
    /// Creates an empty dependency set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing exactly one resource.
    #[must_use]
    pub fn single(resource: Resource) -> Self {
        let mut resources = HashSet::with_capacity(1);
        resources.insert(resource);
        Self {
            resources: Arc::new(resources),
        }
    }

    /// Returns the union of `self` and `other`.
    ///
    /// When one side is empty or both sides share storage, the other side is
    /// returned without copying.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() || Arc::ptr_eq(&self.resources, &other.resources) {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let mut resources = (*self.resources).clone();
        resources.extend(other.resources.iter().cloned());
        Self {
            resources: Arc::new(resources),
        }
    }

    /// Returns a new set with `resource` added.
    #[must_use]
    pub fn with(&self, resource: Resource) -> Self {
        self.union(&Self::single(resource))
    }

    /// Returns `true` if the set contains `resource`.
    #[must_use]
    pub fn contains(&self, resource: &Resource) -> bool {
        self.resources.contains(resource)
    }

    /// Returns the number of resources in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no resource contributed to the value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterates over the resources in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }
}

impl FromIterator<Resource> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            resources: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl From<Resource> for DependencySet {
    fn from(resource: Resource) -> Self {
        Self::single(resource)
    }
}

impl fmt::Debug for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.resources.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> Resource {
        Resource::new("test:index:Thing", name)
    }

    #[test]
    fn union_of_disjoint_sets() {
        let a = resource("a");
        let b = resource("b");
        let left = DependencySet::single(a.clone());
        let right = DependencySet::single(b.clone());

        let merged = left.union(&right);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&a));
        assert!(merged.contains(&b));
    }

    #[test]
    fn union_of_overlapping_sets() {
        let a = resource("a");
        let b = resource("b");
        let c = resource("c");
        let left: DependencySet = [a.clone(), b.clone()].into_iter().collect();
        let right: DependencySet = [b.clone(), c.clone()].into_iter().collect();

        let merged = left.union(&right);
        let expected: DependencySet = [a, b, c].into_iter().collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn union_leaves_inputs_untouched() {
        let left = DependencySet::single(resource("a"));
        let right = DependencySet::single(resource("b"));

        let _ = left.union(&right);
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn union_with_empty_shares_storage() {
        let set = DependencySet::single(resource("a"));
        let merged = set.union(&DependencySet::new());
        assert!(Arc::ptr_eq(&set.resources, &merged.resources));

        let merged = DependencySet::new().union(&set);
        assert!(Arc::ptr_eq(&set.resources, &merged.resources));
    }

    #[test]
    fn with_adds_one_resource() {
        let a = resource("a");
        let set = DependencySet::new().with(a.clone()).with(a.clone());
        assert_eq!(set.len(), 1);
        assert!(set.contains(&a));
    }
}
