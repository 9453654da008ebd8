//! Field identifiers and namespaces
//!
//! Nested form modules reuse local field names, so every rule entry resolves
//! its local id through the [`Scope`] it was added in. The same resolution is
//! applied when values are looked up and when results are reported.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between namespace segments and the local id.
pub const NAMESPACE_SEPARATOR: char = '-';

// ============================================================================
// FIELD ID
// ============================================================================

/// A fully-qualified field identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Creates a field id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// The namespace a field id is resolved against.
///
/// The root scope leaves ids untouched; nested scopes prefix them with their
/// segments joined by [`NAMESPACE_SEPARATOR`].
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::Scope;
///
/// let address = Scope::root().nested("billing").nested("address");
/// assert_eq!(address.qualify("zip").as_str(), "billing-address-zip");
/// assert_eq!(Scope::root().qualify("zip").as_str(), "zip");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    /// The root namespace.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A namespace one level below this one.
    #[must_use]
    pub fn nested(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Resolves a local id into a fully-qualified one.
    #[must_use]
    pub fn qualify(&self, local: &str) -> FieldId {
        if self.segments.is_empty() {
            return FieldId::from(local);
        }
        let mut id = String::with_capacity(
            self.segments.iter().map(|s| s.len() + 1).sum::<usize>() + local.len(),
        );
        for segment in &self.segments {
            id.push_str(segment);
            id.push(NAMESPACE_SEPARATOR);
        }
        id.push_str(local);
        FieldId(id)
    }

    /// Returns true for the root namespace.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The namespace segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.segments.join(&NAMESPACE_SEPARATOR.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_qualify_is_identity() {
        assert_eq!(Scope::root().qualify("email"), FieldId::from("email"));
        assert!(Scope::root().is_root());
    }

    #[test]
    fn test_nested_qualify() {
        let scope = Scope::root().nested("outer").nested("inner");
        assert_eq!(scope.qualify("x").as_str(), "outer-inner-x");
        assert_eq!(scope.to_string(), "outer-inner");
        assert_eq!(scope.segments().len(), 2);
    }

    #[test]
    fn test_same_local_id_differs_across_scopes() {
        let a = Scope::root().nested("a").qualify("name");
        let b = Scope::root().nested("b").qualify("name");
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_id_serializes_as_string() {
        let json = serde_json::to_string(&FieldId::from("age")).unwrap();
        assert_eq!(json, "\"age\"");
    }
}
