//! OWL 2 functional-syntax document: prefixes, ontology header and axioms.

use crate::axiom::{AnnotatedAxiom, Axiom, value_references};
use crate::entity::EntityKind;
use crate::expression::ClassExpression;
use oxiri::{Iri, IriParseError};
use oxobo::{Annotation, Reference, Value};
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};

/// An OWL 2 ontology document.
///
/// References are kept as CURIEs and expanded with the document prefix map when needed.
///
/// ```
/// use oxobo::Reference;
/// use oxowl::{Axiom, Document, EntityKind};
///
/// let mut document = Document::new("http://purl.obolibrary.org/obo/go.owl")?
///     .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_")?;
/// let term = Reference::new_unchecked("GO", "0050069");
/// document.add_axiom(Axiom::declaration(EntityKind::Class, term.clone()));
/// assert!(document.is_declared(EntityKind::Class, &term));
/// assert_eq!(
///     Some("http://purl.obolibrary.org/obo/GO_0050069".to_owned()),
///     document.expand(&term)
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    iri: String,
    version_iri: Option<String>,
    imports: Vec<String>,
    /// CURIE prefix to URI prefix
    prefixes: BTreeMap<String, String>,
    annotations: Vec<Annotation>,
    axioms: Vec<AnnotatedAxiom>,
    declarations: FxHashSet<(EntityKind, Reference)>,
}

impl Document {
    /// Creates a new empty document for the given ontology IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, IriParseError> {
        Ok(Self {
            iri: Iri::parse(iri.into())?.into_inner(),
            ..Self::default()
        })
    }

    #[inline]
    pub fn iri(&self) -> &str {
        &self.iri
    }

    #[inline]
    pub fn version_iri(&self) -> Option<&str> {
        self.version_iri.as_deref()
    }

    pub fn set_version_iri(&mut self, iri: impl Into<String>) -> Result<(), IriParseError> {
        self.version_iri = Some(Iri::parse(iri.into())?.into_inner());
        Ok(())
    }

    /// Returns the imported ontology IRIs.
    #[inline]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Adds an import declaration.
    pub fn add_import(&mut self, iri: impl Into<String>) -> Result<(), IriParseError> {
        let iri = Iri::parse(iri.into())?.into_inner();
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
        Ok(())
    }

    /// Declares a CURIE prefix.
    #[inline]
    pub fn with_prefix(
        mut self,
        prefix: impl Into<String>,
        uri_prefix: impl Into<String>,
    ) -> Result<Self, IriParseError> {
        self.add_prefix(prefix, uri_prefix)?;
        Ok(self)
    }

    /// Declares a CURIE prefix, replacing any previous expansion.
    pub fn add_prefix(
        &mut self,
        prefix: impl Into<String>,
        uri_prefix: impl Into<String>,
    ) -> Result<(), IriParseError> {
        self.prefixes
            .insert(prefix.into(), Iri::parse(uri_prefix.into())?.into_inner());
        Ok(())
    }

    /// Iterates over the `(prefix, URI prefix)` pairs, sorted case-insensitively by prefix.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut prefixes = self
            .prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
            .collect::<Vec<_>>();
        prefixes.sort_by_cached_key(|(prefix, _)| (prefix.to_lowercase(), *prefix));
        prefixes.into_iter()
    }

    #[inline]
    pub fn uri_prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Expands a reference into a full IRI using the prefix map.
    pub fn expand(&self, reference: &Reference) -> Option<String> {
        let uri_prefix = self.uri_prefix(reference.prefix())?;
        Some(format!("{uri_prefix}{}", reference.identifier()))
    }

    /// Returns the ontology annotations.
    #[inline]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Adds an axiom to the document.
    pub fn add_axiom(&mut self, axiom: impl Into<AnnotatedAxiom>) {
        let axiom = axiom.into();
        if let Axiom::Declaration(kind, entity) = &axiom.axiom {
            self.declarations.insert((*kind, entity.clone()));
        }
        self.axioms.push(axiom);
    }

    pub fn extend_axioms(&mut self, axioms: impl IntoIterator<Item = AnnotatedAxiom>) {
        for axiom in axioms {
            self.add_axiom(axiom);
        }
    }

    /// Returns all axioms in insertion order.
    #[inline]
    pub fn axioms(&self) -> &[AnnotatedAxiom] {
        &self.axioms
    }

    #[inline]
    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Checks if an entity is declared with the given kind.
    pub fn is_declared(&self, kind: EntityKind, entity: &Reference) -> bool {
        self.declarations.contains(&(kind, entity.clone()))
    }

    /// Returns the entities declared with the given kind, sorted.
    pub fn declared(&self, kind: EntityKind) -> BTreeSet<&Reference> {
        self.declarations
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, entity)| entity)
            .collect()
    }

    /// Returns all SubClassOf axioms.
    pub fn subclass_axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms
            .iter()
            .map(|a| &a.axiom)
            .filter(|a| matches!(a, Axiom::SubClassOf { .. }))
    }

    /// Returns direct superclasses of a given class.
    pub fn direct_superclasses_of(&self, class: &Reference) -> Vec<&ClassExpression> {
        self.subclass_axioms()
            .filter_map(|a| match a {
                Axiom::SubClassOf {
                    sub_class: ClassExpression::Class(c),
                    super_class,
                } if c == class => Some(super_class),
                _ => None,
            })
            .collect()
    }

    /// Returns the values of the `AnnotationAssertion`s on `subject` for `property`.
    pub fn annotation_values<'a>(
        &'a self,
        subject: &'a Reference,
        property: &'a Reference,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.axioms.iter().filter_map(move |a| match &a.axiom {
            Axiom::AnnotationAssertion {
                property: p,
                subject: s,
                value,
            } if s == subject && p == property => Some(value),
            _ => None,
        })
    }

    /// Returns the prefixes used by the axioms and annotations that the prefix map does not expand.
    pub fn undeclared_prefixes(&self) -> BTreeSet<&str> {
        let mut references = Vec::new();
        for annotation in &self.annotations {
            references.push(annotation.predicate());
            value_references(annotation.value(), &mut references);
        }
        for axiom in &self.axioms {
            axiom.collect_references(&mut references);
        }
        references
            .into_iter()
            .map(Reference::prefix)
            .filter(|prefix| !self.prefixes.contains_key(*prefix))
            .collect()
    }

    /// Merges another document into this one. Prefixes of `self` win on conflict.
    pub fn merge(&mut self, other: Document) {
        for import in other.imports {
            if !self.imports.contains(&import) {
                self.imports.push(import);
            }
        }
        for (prefix, uri) in other.prefixes {
            self.prefixes.entry(prefix).or_insert(uri);
        }
        self.annotations.extend(other.annotations);
        self.extend_axioms(other.axioms);
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology(<{}>) [{} axioms]", self.iri, self.axioms.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxobo::Literal;

    fn go(id: &str) -> Reference {
        Reference::new_unchecked("GO", id)
    }

    #[test]
    fn test_invalid_iris_are_rejected() {
        assert!(Document::new("not an iri").is_err());
        assert!(
            Document::default()
                .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_ x")
                .is_err()
        );
    }

    #[test]
    fn test_prefixes_are_sorted_case_insensitively() -> Result<(), IriParseError> {
        let document = Document::new("http://example.com/o.owl")?
            .with_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#")?
            .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_")?
            .with_prefix("oboInOwl", "http://www.geneontology.org/formats/oboInOwl#")?;
        assert_eq!(
            vec!["GO", "oboInOwl", "rdfs"],
            document.prefixes().map(|(p, _)| p).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    fn test_queries() -> Result<(), IriParseError> {
        let mut document = Document::new("http://example.com/o.owl")?
            .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_")?;
        let label = Reference::new_unchecked("rdfs", "label");
        document.add_axiom(Axiom::subclass_of(go("0050069"), go("0016491")));
        document.add_axiom(Axiom::annotation_assertion(
            label.clone(),
            go("0050069"),
            Literal::new_simple_literal("lysine dehydrogenase activity"),
        ));
        assert_eq!(
            vec![&ClassExpression::class(go("0016491"))],
            document.direct_superclasses_of(&go("0050069"))
        );
        assert_eq!(1, document.annotation_values(&go("0050069"), &label).count());
        assert_eq!(
            BTreeSet::from(["rdfs", "xsd"]),
            document.undeclared_prefixes()
        );
        Ok(())
    }

    #[test]
    fn test_merge_keeps_existing_prefixes() -> Result<(), IriParseError> {
        let mut document =
            Document::new("http://example.com/a.owl")?.with_prefix("x", "http://example.com/a/")?;
        let other = Document::new("http://example.com/b.owl")?
            .with_prefix("x", "http://example.com/b/")?
            .with_prefix("y", "http://example.com/y/")?;
        document.merge(other);
        assert_eq!(Some("http://example.com/a/"), document.uri_prefix("x"));
        assert_eq!(Some("http://example.com/y/"), document.uri_prefix("y"));
        Ok(())
    }
}
