//! OWL 2 class expressions and object property expressions.

use oxobo::Reference;

/// An OWL 2 class expression.
///
/// Class expressions describe sets of individuals through various constructors.
/// Every non-atomic expression becomes its own blank node structure when rendered to RDF.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class (atomic class)
    Class(Reference),

    /// ObjectIntersectionOf(C1, ..., Cn) - intersection of classes
    ObjectIntersectionOf(Vec<ClassExpression>),

    /// ObjectUnionOf(C1, ..., Cn) - union of classes
    ObjectUnionOf(Vec<ClassExpression>),

    /// ObjectComplementOf(C) - complement of a class
    ObjectComplementOf(Box<ClassExpression>),

    /// ObjectOneOf(a1, ..., an) - enumeration of individuals
    ObjectOneOf(Vec<Reference>),

    /// ObjectSomeValuesFrom(P, C) - existential restriction
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectAllValuesFrom(P, C) - universal restriction
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// ObjectHasValue(P, a) - has-value restriction
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Reference,
    },
}

impl ClassExpression {
    /// Creates a named class expression.
    #[inline]
    pub fn class(class: impl Into<Reference>) -> Self {
        Self::Class(class.into())
    }

    #[inline]
    pub fn intersection(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(classes.into_iter().collect())
    }

    #[inline]
    pub fn union(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::ObjectUnionOf(classes.into_iter().collect())
    }

    #[inline]
    pub fn complement(class: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(class))
    }

    /// Creates an existential restriction, the usual encoding of an OBO relationship.
    pub fn some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: impl Into<ClassExpression>,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler.into()),
        }
    }

    pub fn all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: impl Into<ClassExpression>,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler.into()),
        }
    }

    /// Returns `true` if this is a named class.
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    /// Returns the named class if this is a named class.
    #[inline]
    pub fn as_class(&self) -> Option<&Reference> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Appends every reference mentioned by this expression.
    pub fn collect_references<'a>(&'a self, references: &mut Vec<&'a Reference>) {
        match self {
            Self::Class(class) => references.push(class),
            Self::ObjectIntersectionOf(classes) | Self::ObjectUnionOf(classes) => {
                for class in classes {
                    class.collect_references(references);
                }
            }
            Self::ObjectComplementOf(class) => class.collect_references(references),
            Self::ObjectOneOf(individuals) => references.extend(individuals),
            Self::ObjectSomeValuesFrom { property, filler }
            | Self::ObjectAllValuesFrom { property, filler } => {
                references.push(property.property());
                filler.collect_references(references);
            }
            Self::ObjectHasValue {
                property,
                individual,
            } => {
                references.push(property.property());
                references.push(individual);
            }
        }
    }
}

impl From<Reference> for ClassExpression {
    #[inline]
    fn from(class: Reference) -> Self {
        Self::Class(class)
    }
}

/// An OWL 2 object property expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    /// A named object property
    ObjectProperty(Reference),

    /// ObjectInverseOf(P) - inverse of a property
    ObjectInverseOf(Reference),
}

impl ObjectPropertyExpression {
    /// Returns the underlying named property.
    #[inline]
    pub fn property(&self) -> &Reference {
        match self {
            Self::ObjectProperty(property) | Self::ObjectInverseOf(property) => property,
        }
    }

    #[inline]
    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::ObjectInverseOf(_))
    }

    /// Returns the inverse of this property expression.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::ObjectProperty(property) => Self::ObjectInverseOf(property),
            Self::ObjectInverseOf(property) => Self::ObjectProperty(property),
        }
    }
}

impl From<Reference> for ObjectPropertyExpression {
    #[inline]
    fn from(property: Reference) -> Self {
        Self::ObjectProperty(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(id: &str) -> Reference {
        Reference::new_unchecked("GO", id)
    }

    #[test]
    fn test_constructors() {
        let part_of = Reference::new_unchecked("BFO", "0000050");
        let restriction = ClassExpression::some_values_from(part_of.clone(), go("0000001"));
        assert!(!restriction.is_named());
        assert_eq!(Some(&go("0000002")), ClassExpression::class(go("0000002")).as_class());

        let intersection = ClassExpression::intersection([go("0000002").into(), restriction]);
        let mut references = Vec::new();
        intersection.collect_references(&mut references);
        assert_eq!(vec![&go("0000002"), &part_of, &go("0000001")], references);
    }

    #[test]
    fn test_inverse() {
        let property = ObjectPropertyExpression::from(Reference::new_unchecked("RO", "0002211"));
        let inverse = property.clone().inverse();
        assert!(inverse.is_inverse());
        assert_eq!(property, inverse.inverse());
    }
}
