//! OWL 2 entity kinds.
//!
//! Entities themselves are plain [`Reference`](oxobo::Reference)s; the kind only matters in declarations.

use std::fmt;

/// The kind of a declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Class(C)
    Class,
    /// ObjectProperty(P)
    ObjectProperty,
    /// DataProperty(P)
    DataProperty,
    /// AnnotationProperty(P)
    AnnotationProperty,
    /// NamedIndividual(a)
    NamedIndividual,
    /// Datatype(D)
    Datatype,
}

impl EntityKind {
    /// The functional-syntax keyword, e.g. `ObjectProperty`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::ObjectProperty => "ObjectProperty",
            Self::DataProperty => "DataProperty",
            Self::AnnotationProperty => "AnnotationProperty",
            Self::NamedIndividual => "NamedIndividual",
            Self::Datatype => "Datatype",
        }
    }

    #[inline]
    pub const fn is_property(self) -> bool {
        matches!(
            self,
            Self::ObjectProperty | Self::DataProperty | Self::AnnotationProperty
        )
    }
}

impl fmt::Display for EntityKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!("NamedIndividual", EntityKind::NamedIndividual.to_string());
        assert!(EntityKind::AnnotationProperty.is_property());
        assert!(!EntityKind::Class.is_property());
    }
}
