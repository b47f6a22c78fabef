//! OWL 2 axiom types.
//!
//! Axioms are the basic statements in an OWL 2 ontology. An [`AnnotatedAxiom`] pairs one with
//! the axiom annotations (provenance, synonym types...) rendered as nested `Annotation(...)`.

use crate::entity::EntityKind;
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use oxobo::{Annotation, Reference, Value};

/// An OWL 2 axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// Declaration(Kind(e))
    Declaration(EntityKind, Reference),

    // === Class Axioms ===

    /// SubClassOf(sub, super) - sub is a subclass of super
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },

    /// EquivalentClasses(C1, C2, ...) - all classes are equivalent
    EquivalentClasses(Vec<ClassExpression>),

    /// DisjointClasses(C1, C2, ...) - classes have no common instances
    DisjointClasses(Vec<ClassExpression>),

    // === Object Property Axioms ===

    /// SubObjectPropertyOf(sub, super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },

    /// SubObjectPropertyOf(ObjectPropertyChain(P1...Pn), P) - property chain axiom
    SubPropertyChainOf {
        property_chain: Vec<ObjectPropertyExpression>,
        super_property: ObjectPropertyExpression,
    },

    /// EquivalentObjectProperties(P1, P2, ...)
    EquivalentObjectProperties(Vec<ObjectPropertyExpression>),

    /// DisjointObjectProperties(P1, P2, ...)
    DisjointObjectProperties(Vec<ObjectPropertyExpression>),

    /// InverseObjectProperties(P1, P2)
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),

    /// ObjectPropertyDomain(P, C) - domain of P is C
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },

    /// ObjectPropertyRange(P, C) - range of P is C
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },

    /// FunctionalObjectProperty(P)
    FunctionalObjectProperty(ObjectPropertyExpression),

    /// InverseFunctionalObjectProperty(P)
    InverseFunctionalObjectProperty(ObjectPropertyExpression),

    /// ReflexiveObjectProperty(P)
    ReflexiveObjectProperty(ObjectPropertyExpression),

    /// SymmetricObjectProperty(P)
    SymmetricObjectProperty(ObjectPropertyExpression),

    /// AsymmetricObjectProperty(P)
    AsymmetricObjectProperty(ObjectPropertyExpression),

    /// TransitiveObjectProperty(P)
    TransitiveObjectProperty(ObjectPropertyExpression),

    // === Assertions ===

    /// ClassAssertion(C, a) - a is an instance of C
    ClassAssertion {
        class: ClassExpression,
        individual: Reference,
    },

    /// ObjectPropertyAssertion(P, a, b) - (a, b) is in P
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Reference,
        target: Reference,
    },

    // === Annotation Axioms ===

    /// AnnotationAssertion(P, s, v)
    AnnotationAssertion {
        property: Reference,
        subject: Reference,
        value: Value,
    },

    /// SubAnnotationPropertyOf(sub, super)
    SubAnnotationPropertyOf {
        sub_property: Reference,
        super_property: Reference,
    },

    /// AnnotationPropertyDomain(P, U)
    AnnotationPropertyDomain { property: Reference, domain: Reference },

    /// AnnotationPropertyRange(P, U)
    AnnotationPropertyRange { property: Reference, range: Reference },
}

impl Axiom {
    pub fn declaration(kind: EntityKind, entity: impl Into<Reference>) -> Self {
        Self::Declaration(kind, entity.into())
    }

    /// Creates a SubClassOf axiom.
    pub fn subclass_of(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self::SubClassOf {
            sub_class: sub.into(),
            super_class: sup.into(),
        }
    }

    /// Creates a ClassAssertion axiom.
    pub fn class_assertion(
        class: impl Into<ClassExpression>,
        individual: impl Into<Reference>,
    ) -> Self {
        Self::ClassAssertion {
            class: class.into(),
            individual: individual.into(),
        }
    }

    /// Creates an EquivalentClasses axiom.
    pub fn equivalent_classes(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::EquivalentClasses(classes.into_iter().collect())
    }

    /// Creates a DisjointClasses axiom.
    pub fn disjoint_classes(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::DisjointClasses(classes.into_iter().collect())
    }

    /// Creates an AnnotationAssertion axiom.
    pub fn annotation_assertion(
        property: impl Into<Reference>,
        subject: impl Into<Reference>,
        value: impl Into<Value>,
    ) -> Self {
        Self::AnnotationAssertion {
            property: property.into(),
            subject: subject.into(),
            value: value.into(),
        }
    }

    /// Attaches axiom annotations.
    pub fn annotated(self, annotations: impl IntoIterator<Item = Annotation>) -> AnnotatedAxiom {
        AnnotatedAxiom {
            axiom: self,
            annotations: annotations.into_iter().collect(),
        }
    }

    /// The functional-syntax constructor name, e.g. `SubClassOf`.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Declaration(..) => "Declaration",
            Self::SubClassOf { .. } => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::SubObjectPropertyOf { .. } | Self::SubPropertyChainOf { .. } => {
                "SubObjectPropertyOf"
            }
            Self::EquivalentObjectProperties(_) => "EquivalentObjectProperties",
            Self::DisjointObjectProperties(_) => "DisjointObjectProperties",
            Self::InverseObjectProperties(..) => "InverseObjectProperties",
            Self::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Self::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Self::FunctionalObjectProperty(_) => "FunctionalObjectProperty",
            Self::InverseFunctionalObjectProperty(_) => "InverseFunctionalObjectProperty",
            Self::ReflexiveObjectProperty(_) => "ReflexiveObjectProperty",
            Self::SymmetricObjectProperty(_) => "SymmetricObjectProperty",
            Self::AsymmetricObjectProperty(_) => "AsymmetricObjectProperty",
            Self::TransitiveObjectProperty(_) => "TransitiveObjectProperty",
            Self::ClassAssertion { .. } => "ClassAssertion",
            Self::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Self::AnnotationAssertion { .. } => "AnnotationAssertion",
            Self::SubAnnotationPropertyOf { .. } => "SubAnnotationPropertyOf",
            Self::AnnotationPropertyDomain { .. } => "AnnotationPropertyDomain",
            Self::AnnotationPropertyRange { .. } => "AnnotationPropertyRange",
        }
    }

    /// Appends every reference mentioned by this axiom, literal datatypes included.
    pub fn collect_references<'a>(&'a self, references: &mut Vec<&'a Reference>) {
        match self {
            Self::Declaration(_, entity) => references.push(entity),
            Self::SubClassOf {
                sub_class,
                super_class,
            } => {
                sub_class.collect_references(references);
                super_class.collect_references(references);
            }
            Self::EquivalentClasses(classes) | Self::DisjointClasses(classes) => {
                for class in classes {
                    class.collect_references(references);
                }
            }
            Self::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                references.push(sub_property.property());
                references.push(super_property.property());
            }
            Self::SubPropertyChainOf {
                property_chain,
                super_property,
            } => {
                for property in property_chain {
                    references.push(property.property());
                }
                references.push(super_property.property());
            }
            Self::EquivalentObjectProperties(properties)
            | Self::DisjointObjectProperties(properties) => {
                for property in properties {
                    references.push(property.property());
                }
            }
            Self::InverseObjectProperties(first, second) => {
                references.push(first.property());
                references.push(second.property());
            }
            Self::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Self::ObjectPropertyRange {
                property,
                range: class,
            } => {
                references.push(property.property());
                class.collect_references(references);
            }
            Self::FunctionalObjectProperty(property)
            | Self::InverseFunctionalObjectProperty(property)
            | Self::ReflexiveObjectProperty(property)
            | Self::SymmetricObjectProperty(property)
            | Self::AsymmetricObjectProperty(property)
            | Self::TransitiveObjectProperty(property) => references.push(property.property()),
            Self::ClassAssertion { class, individual } => {
                class.collect_references(references);
                references.push(individual);
            }
            Self::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                references.push(property.property());
                references.push(source);
                references.push(target);
            }
            Self::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                references.push(property);
                references.push(subject);
                value_references(value, references);
            }
            Self::SubAnnotationPropertyOf {
                sub_property: first,
                super_property: second,
            }
            | Self::AnnotationPropertyDomain {
                property: first,
                domain: second,
            }
            | Self::AnnotationPropertyRange {
                property: first,
                range: second,
            } => {
                references.push(first);
                references.push(second);
            }
        }
    }
}

/// An axiom together with its axiom annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedAxiom {
    pub axiom: Axiom,
    pub annotations: Vec<Annotation>,
}

impl AnnotatedAxiom {
    #[inline]
    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Appends every reference mentioned by the axiom and its annotations.
    pub fn collect_references<'a>(&'a self, references: &mut Vec<&'a Reference>) {
        for annotation in &self.annotations {
            references.push(annotation.predicate());
            value_references(annotation.value(), references);
        }
        self.axiom.collect_references(references);
    }
}

impl From<Axiom> for AnnotatedAxiom {
    #[inline]
    fn from(axiom: Axiom) -> Self {
        Self {
            axiom,
            annotations: Vec::new(),
        }
    }
}

pub(crate) fn value_references<'a>(value: &'a Value, references: &mut Vec<&'a Reference>) {
    match value {
        Value::Reference(reference) => references.push(reference),
        Value::Literal(literal) => references.push(literal.datatype()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxobo::Literal;

    #[test]
    fn test_names() {
        let go = Reference::new_unchecked("GO", "0050069");
        assert_eq!(
            "Declaration",
            Axiom::declaration(EntityKind::Class, go.clone()).name()
        );
        assert_eq!(
            "SubObjectPropertyOf",
            Axiom::SubPropertyChainOf {
                property_chain: Vec::new(),
                super_property: go.into(),
            }
            .name()
        );
    }

    #[test]
    fn test_references_include_annotations_and_datatypes() {
        let axiom = Axiom::annotation_assertion(
            Reference::new_unchecked("rdfs", "label"),
            Reference::new_unchecked("GO", "0050069"),
            Literal::new_simple_literal("lysine dehydrogenase activity"),
        )
        .annotated([Annotation::new(
            Reference::new_unchecked("oboInOwl", "hasDbXref"),
            Reference::new_unchecked("pubmed", "1234"),
        )]);
        let mut references = Vec::new();
        axiom.collect_references(&mut references);
        assert_eq!(
            vec!["oboInOwl", "pubmed", "rdfs", "GO", "xsd"],
            references.iter().map(|r| r.prefix()).collect::<Vec<_>>()
        );
    }
}
