//! Resource reference parsing.
//!
//! A reference is the string form a provider is passed around in:
//!
//! ```text
//! urn:pulumi:dev::network::pulumi:providers:aws::default::04da6b54
//! └───────────────────── urn ─────────────────────────────┘  └ id ┘
//! ```
//!
//! The URN is itself `::`-delimited, so only the *last* `::` separates it from
//! the ID. The URN's third segment is the qualified type, which may be prefixed
//! by a parent hierarchy (`parent$child`). For providers the innermost type is
//! `pulumi:providers:<package>`.

use core::fmt;
use core::str::FromStr;

use crate::error::ReferenceError;

/// Separator between URN segments, and between the URN and the ID.
pub const REFERENCE_DELIMITER: &str = "::";

/// Separator between parent and child types in a qualified type.
pub const TYPE_HIERARCHY_DELIMITER: char = '$';

/// Splits a reference into its URN and ID.
///
/// # Errors
///
/// Returns [`ReferenceError::MalformedReference`] if `reference` contains no
/// `::`.
///
/// # Example
///
/// ```
/// use nimbus_resource::parse_reference;
///
/// let (urn, id) = parse_reference("urn:a::b::pulumi:providers:aws::prov::12345").unwrap();
/// assert_eq!(urn, "urn:a::b::pulumi:providers:aws::prov");
/// assert_eq!(id, "12345");
/// ```
pub fn parse_reference(reference: &str) -> Result<(&str, &str), ReferenceError> {
    reference
        .rsplit_once(REFERENCE_DELIMITER)
        .ok_or_else(|| ReferenceError::MalformedReference {
            reference: reference.to_owned(),
        })
}

/// Extracts the provider package name from a reference.
///
/// Returns an empty string when the innermost type has fewer than three
/// `:`-delimited parts.
///
/// # Errors
///
/// - [`ReferenceError::MalformedReference`] if the reference does not parse
/// - [`ReferenceError::MissingQualifiedType`] if the URN has fewer than three
///   segments
///
/// # Example
///
/// ```
/// use nimbus_resource::package_name;
///
/// let package = package_name("urn:a::b::pulumi:providers:aws::prov::12345").unwrap();
/// assert_eq!(package, "aws");
/// ```
pub fn package_name(reference: &str) -> Result<&str, ReferenceError> {
    let (urn, _) = parse_reference(reference)?;
    urn_package(urn)
}

fn urn_qualified_type(urn: &str) -> Result<&str, ReferenceError> {
    urn.split(REFERENCE_DELIMITER)
        .nth(2)
        .ok_or_else(|| ReferenceError::MissingQualifiedType {
            urn: urn.to_owned(),
        })
}

fn leaf_type(qualified_type: &str) -> &str {
    qualified_type
        .rsplit_once(TYPE_HIERARCHY_DELIMITER)
        .map_or(qualified_type, |(_, leaf)| leaf)
}

fn urn_package(urn: &str) -> Result<&str, ReferenceError> {
    let qualified_type = urn_qualified_type(urn)?;
    // `pulumi:providers:<package>`
    Ok(leaf_type(qualified_type).split(':').nth(2).unwrap_or(""))
}

/// An owned, parsed resource reference.
///
/// `Display` writes the reference back out, so parsing and printing round-trip.
///
/// # Example
///
/// ```
/// use nimbus_resource::ResourceReference;
///
/// let reference: ResourceReference = "urn:pulumi:dev::app::my:index:Parent$pulumi:providers:gcp::p::7"
///     .parse()
///     .unwrap();
///
/// assert_eq!(reference.id(), "7");
/// assert_eq!(reference.leaf_type().unwrap(), "pulumi:providers:gcp");
/// assert_eq!(reference.package().unwrap(), "gcp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceReference {
    urn: String,
    id: String,
}

impl ResourceReference {
    /// Parses a reference string.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MalformedReference`] if `reference` contains
    /// no `::`.
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        let (urn, id) = parse_reference(reference)?;
        Ok(Self {
            urn: urn.to_owned(),
            id: id.to_owned(),
        })
    }

    /// Returns the URN portion of the reference.
    #[must_use]
    pub fn urn(&self) -> &str {
        &self.urn
    }

    /// Returns the ID portion of the reference.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the full qualified type, including any parent hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MissingQualifiedType`] if the URN has fewer
    /// than three segments.
    pub fn qualified_type(&self) -> Result<&str, ReferenceError> {
        urn_qualified_type(&self.urn)
    }

    /// Returns the innermost type of the qualified type.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MissingQualifiedType`] if the URN has fewer
    /// than three segments.
    pub fn leaf_type(&self) -> Result<&str, ReferenceError> {
        self.qualified_type().map(leaf_type)
    }

    /// Returns the provider package name, empty if the type does not name one.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MissingQualifiedType`] if the URN has fewer
    /// than three segments.
    pub fn package(&self) -> Result<&str, ReferenceError> {
        urn_package(&self.urn)
    }
}

impl FromStr for ResourceReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{REFERENCE_DELIMITER}{}", self.urn, self.id)
    }
}
