//! Error types for resource references.

/// Error parsing a resource reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// The reference has no `::` separating the URN from the ID.
    #[error("expected \"::\" in provider reference '{reference}'")]
    MalformedReference {
        /// The offending reference string.
        reference: String,
    },

    /// The URN has fewer than three `::`-delimited segments.
    #[error("urn '{urn}' has no qualified type segment")]
    MissingQualifiedType {
        /// The offending URN.
        urn: String,
    },
}

/// Error reading a typed value out of a stack reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackReferenceError {
    /// The stack output exists but has the wrong JSON type.
    #[error("stack output '{name}': failed to convert {found} to {expected}")]
    Conversion {
        /// The name of the stack output.
        name: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The JSON type that was found.
        found: &'static str,
    },
}
