//! Resolved output state and the rules for merging it.

use core::fmt;

use crate::dependencies::DependencySet;
use crate::resource::Resource;

/// Immutable snapshot of a resolved output.
///
/// `OutputData` pairs a value with three pieces of metadata:
///
/// - **Knowability**: an unknown value has not been determined by the engine
///   yet (typically during a preview). Unknown data holds no value at all, so
///   [`value`](Self::value) returns `None` and nothing downstream can read it.
/// - **Secrecy**: a secret value is never written to logs. The `Debug`
///   implementation prints `[secret]` in its place.
/// - **Dependencies**: every resource that contributed to the value.
///
/// # Example
///
/// ```
/// use nimbus_output::{DependencySet, OutputData};
///
/// let data = OutputData::known(5).into_secret();
/// assert!(data.is_known());
/// assert!(data.is_secret());
/// assert_eq!(data.value(), Some(&5));
/// assert_eq!(format!("{data:?}").contains('5'), false);
///
/// let unknown = OutputData::<i32>::create(5, false, false, DependencySet::new());
/// assert_eq!(unknown.value(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct OutputData<T> {
    value: Option<T>,
    is_secret: bool,
    dependencies: DependencySet,
}

impl<T> OutputData<T> {
    /// Creates resolved state from explicit parts.
    ///
    /// When `is_known` is `false` the value is discarded.
    #[must_use]
    pub fn create(value: T, is_known: bool, is_secret: bool, dependencies: DependencySet) -> Self {
        Self {
            value: is_known.then_some(value),
            is_secret,
            dependencies,
        }
    }

    /// Creates resolved state from an optional value, `None` meaning unknown.
    #[must_use]
    pub fn from_parts(value: Option<T>, is_secret: bool, dependencies: DependencySet) -> Self {
        Self {
            value,
            is_secret,
            dependencies,
        }
    }

    /// Creates known, non-secret state with no dependencies.
    #[must_use]
    pub fn known(value: T) -> Self {
        Self::from_parts(Some(value), false, DependencySet::new())
    }

    /// Creates unknown state.
    #[must_use]
    pub fn unknown(is_secret: bool, dependencies: DependencySet) -> Self {
        Self::from_parts(None, is_secret, dependencies)
    }

    /// Returns the value, or `None` if it is not known.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the state and returns the value, or `None` if unknown.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Returns `true` if the engine has determined the value.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if the value must not be shown in cleartext.
    #[must_use]
    pub fn is_secret(&self) -> bool {
        self.is_secret
    }

    /// Returns the resources that contributed to the value.
    #[must_use]
    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Marks the state as secret.
    #[must_use]
    pub fn into_secret(mut self) -> Self {
        self.is_secret = true;
        self
    }

    /// Adds `dependencies` to the provenance of this state.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: &DependencySet) -> Self {
        self.dependencies = self.dependencies.union(dependencies);
        self
    }

    /// Adds a single resource to the provenance of this state.
    #[must_use]
    pub fn with_dependency(self, resource: Resource) -> Self {
        self.with_dependencies(&DependencySet::single(resource))
    }

    /// Returns unknown state of another type carrying the same metadata.
    #[must_use]
    pub fn to_unknown<U>(&self) -> OutputData<U> {
        OutputData::unknown(self.is_secret, self.dependencies.clone())
    }

    /// Replaces the value, keeping secrecy and dependencies.
    #[must_use]
    pub fn with_value<U>(&self, value: U) -> OutputData<U> {
        OutputData::from_parts(Some(value), self.is_secret, self.dependencies.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for OutputData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("OutputData");
        match (&self.value, self.is_secret) {
            (None, _) => s.field("value", &format_args!("[unknown]")),
            (Some(_), true) => s.field("value", &format_args!("[secret]")),
            (Some(value), false) => s.field("value", value),
        };
        s.field("is_secret", &self.is_secret)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Knowability rule: the result is known only if every input is known.
pub fn merge_known(inputs: impl IntoIterator<Item = bool>) -> bool {
    inputs.into_iter().all(|known| known)
}

/// Secrecy rule: the result is secret if any input is secret.
pub fn merge_secret(inputs: impl IntoIterator<Item = bool>) -> bool {
    inputs.into_iter().any(|secret| secret)
}

/// Provenance rule: the result depends on the union of all input dependencies.
pub fn merge_dependencies<'a>(inputs: impl IntoIterator<Item = &'a DependencySet>) -> DependencySet {
    inputs
        .into_iter()
        .fold(DependencySet::new(), |acc, deps| acc.union(deps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn create_discards_unknown_value() {
        let data = OutputData::create("value", false, true, DependencySet::new());
        assert!(!data.is_known());
        assert!(data.is_secret());
        assert_eq!(data.value(), None);
    }

    #[test]
    fn debug_redacts_secrets() {
        let data = OutputData::known("hunter2").into_secret();
        let rendered = format!("{data:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[secret]"));
    }

    #[test]
    fn debug_marks_unknown() {
        let data = OutputData::<i32>::unknown(false, DependencySet::new());
        assert!(format!("{data:?}").contains("[unknown]"));
    }

    #[test]
    fn debug_shows_plain_values() {
        let data = OutputData::known(42);
        assert!(format!("{data:?}").contains("42"));
    }

    #[test]
    fn to_unknown_keeps_metadata() {
        let resource = Resource::new("test:index:Thing", "a");
        let data = OutputData::known(1).into_secret().with_dependency(resource.clone());
        let unknown: OutputData<String> = data.to_unknown();
        assert!(!unknown.is_known());
        assert!(unknown.is_secret());
        assert!(unknown.dependencies().contains(&resource));
    }

    #[test]
    fn empty_merges() {
        assert!(merge_known(Vec::new()));
        assert!(!merge_secret(Vec::new()));
        assert!(merge_dependencies(Vec::new()).is_empty());
    }

    #[test]
    fn single_flag_flips_merge() {
        assert!(!merge_known([true, false, true]));
        assert!(merge_secret([false, true, false]));
    }

    fn resources(n: usize) -> Vec<Resource> {
        (0..n)
            .map(|i| Resource::new("test:index:Thing", format!("r{i}")))
            .collect()
    }

    proptest! {
        #[test]
        fn flag_merges_are_order_independent(flags in proptest::collection::vec(any::<bool>(), 0..16)) {
            let mut reversed = flags.clone();
            reversed.reverse();
            prop_assert_eq!(merge_known(flags.clone()), merge_known(reversed.clone()));
            prop_assert_eq!(merge_secret(flags.clone()), merge_secret(reversed));
            prop_assert_eq!(merge_known(flags.clone()), !flags.contains(&false));
            prop_assert_eq!(merge_secret(flags.clone()), flags.contains(&true));
        }

        #[test]
        fn dependency_union_is_exact(
            picks in proptest::collection::vec(proptest::collection::vec(0usize..8, 0..8), 0..6)
        ) {
            let pool = resources(8);
            let sets: Vec<DependencySet> = picks
                .iter()
                .map(|ids| ids.iter().map(|&i| pool[i].clone()).collect())
                .collect();

            let merged = merge_dependencies(&sets);

            for (i, resource) in pool.iter().enumerate() {
                let expected = picks.iter().any(|ids| ids.contains(&i));
                prop_assert_eq!(merged.contains(resource), expected);
            }

            let mut reversed = sets.clone();
            reversed.reverse();
            prop_assert_eq!(merge_dependencies(&reversed), merged);
        }
    }
}
