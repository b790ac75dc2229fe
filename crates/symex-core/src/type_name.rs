//! Type identities for substitution
//!
//! Provides [`TypeName`], the dotted identity under which a standard type or its
//! model is known to the engine.

use crate::error::TypeNameError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Fully qualified type identity
///
/// Segments are joined with `.`; nested types keep their `$` marker inside the
/// last segment.
///
/// # Examples
/// - `["java", "util", "Collection"]` → `java.util.Collection`
/// - `["java", "util", "Map$Entry"]` → `java.util.Map$Entry`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName(Vec<String>);

impl TypeName {
    /// Create from segments without validation
    ///
    /// Intended for names known at compile time; parse untrusted input with
    /// [`str::parse`].
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Get name segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Unqualified name (last segment)
    #[inline]
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// Package part, `None` for types in the default package
    #[must_use]
    pub fn package(&self) -> Option<Self> {
        if self.0.len() < 2 {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Check whether this type lives under `package` (at any depth)
    #[inline]
    #[must_use]
    pub fn is_in_package(&self, package: &Self) -> bool {
        package.0.len() < self.0.len() && self.0[..package.0.len()] == package.0[..]
    }

    /// Append a segment, returning new name
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    fn validate_segment(segment: &str, whole: &str) -> Result<(), TypeNameError> {
        if segment.is_empty() {
            Err(TypeNameError::EmptySegment(whole.to_string()))
        } else if segment
            .contains(|c: char| !c.is_alphanumeric() && c != '_' && c != '$')
        {
            Err(TypeNameError::InvalidSegment(segment.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for TypeName {
    type Err = TypeNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TypeNameError::Empty);
        }

        let segments = s
            .split('.')
            .map(|seg| Self::validate_segment(seg, s).map(|()| seg.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(segments))
    }
}

impl TryFrom<String> for TypeName {
    type Error = TypeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> TypeName {
        s.parse().unwrap()
    }

    #[test]
    fn new_matches_parse() {
        assert_eq!(
            TypeName::new(["java", "util", "ArrayList"]),
            name("java.util.ArrayList")
        );
    }

    #[test]
    fn parse_and_segments() {
        let ty = name("java.util.Collection");
        assert_eq!(ty.segments(), &["java", "util", "Collection"]);
        assert_eq!(ty.simple_name(), "Collection");
    }

    #[test]
    fn nested_type_marker_allowed() {
        let ty = name("java.util.Map$Entry");
        assert_eq!(ty.simple_name(), "Map$Entry");
    }

    #[test]
    fn package_of_qualified_type() {
        let ty = name("java.util.ArrayList");
        assert_eq!(ty.package(), Some(name("java.util")));
        assert!(name("Foo").package().is_none());
    }

    #[test]
    fn package_membership() {
        let ty = name("java.util.concurrent.ConcurrentHashMap");
        assert!(ty.is_in_package(&name("java.util")));
        assert!(!ty.is_in_package(&name("java.io")));
        assert!(!name("java.util").is_in_package(&name("java.util")));
    }

    #[test]
    fn child_appends_segment() {
        assert_eq!(name("java.util").child("List"), name("java.util.List"));
    }

    #[test]
    fn display_round_trips_text() {
        assert_eq!(name("a.b.C").to_string(), "a.b.C");
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!("".parse::<TypeName>(), Err(TypeNameError::Empty)));
    }

    #[test]
    fn empty_segment_rejected() {
        assert!(matches!(
            "java..List".parse::<TypeName>(),
            Err(TypeNameError::EmptySegment(_))
        ));
    }

    #[test]
    fn invalid_chars_rejected() {
        assert!(matches!(
            "java.util.List<E>".parse::<TypeName>(),
            Err(TypeNameError::InvalidSegment(_))
        ));
    }

    #[test]
    fn serde_uses_dotted_string() {
        let json = serde_json::to_string(&name("java.util.HashSet")).unwrap();
        assert_eq!(json, "\"java.util.HashSet\"");
        let back: TypeName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name("java.util.HashSet"));
        assert!(serde_json::from_str::<TypeName>("\"bad..name\"").is_err());
    }
}
