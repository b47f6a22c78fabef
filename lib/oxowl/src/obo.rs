//! Translation of OBO stanzas into OWL 2 axioms.
//!
//! Terms become classes (or named individuals for `[Instance]` stanzas), relationships become
//! existential restrictions and typedefs become object properties, or annotation properties when
//! they are metadata tags. Attached OBO axioms are carried over as axiom annotations.

use crate::axiom::{AnnotatedAxiom, Axiom};
use crate::document::Document;
use crate::entity::EntityKind;
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use oxiri::IriParseError;
use oxobo::vocab::{dcterms, iao, oboinowl, owl, rdfs};
use oxobo::{
    Annotation, Flag, IntersectionOf, Literal, OboDocument, OboHeader, Reference, ReferenceRef,
    Registry, Stanza, Synonym, Term, TermKind, TypeDef, Value,
};
use rustc_hash::FxHashSet;

const OBO_PURL: &str = "http://purl.obolibrary.org/obo/";

/// Converts OBO documents into functional-syntax [`Document`]s.
///
/// References are rewritten with the registry preferred prefixes (`go:0050069` becomes `GO:0050069`)
/// and the prefix map of the output document is filled from the registry URI prefixes.
///
/// ```
/// use oxobo::{MemoryRegistry, OboParser};
/// use oxowl::{FunctionalSerializer, OboConverter};
///
/// let registry = MemoryRegistry::obo_defaults();
/// let obo = OboParser::new(&registry).parse_str(
///     "ontology: go\n\n[Term]\nid: GO:0050069\nis_a: GO:0016491\nbuiltin: true\n",
/// )?;
/// let document = OboConverter::new(&registry).convert(&obo)?;
/// let output = String::from_utf8(FunctionalSerializer::new().serialize_document(&document, Vec::new())?)?;
/// assert!(output.contains("Prefix(GO:=<http://purl.obolibrary.org/obo/GO_>)\n"));
/// assert!(output.contains("SubClassOf(GO:0050069 GO:0016491)\n"));
/// assert!(output.contains("AnnotationAssertion(oboInOwl:builtin GO:0050069 \"true\"^^xsd:boolean)\n"));
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[must_use]
pub struct OboConverter<'a> {
    registry: &'a (dyn Registry + Sync),
}

impl<'a> OboConverter<'a> {
    pub fn new(registry: &'a (dyn Registry + Sync)) -> Self {
        Self { registry }
    }

    /// Converts a whole document: header axioms first, then typedefs, then terms.
    pub fn convert(&self, obo: &OboDocument) -> Result<Document, IriParseError> {
        let ontology = obo.ontology();
        let mut document = Document::new(format!("{OBO_PURL}{ontology}.owl"))?;
        if let Some(version) = &obo.header.data_version {
            if let Err(error) =
                document.set_version_iri(format!("{OBO_PURL}{ontology}/{version}/{ontology}.owl"))
            {
                tracing::warn!(ontology, version = version.as_str(), "invalid version IRI: {error}");
            }
        }
        for import in &obo.header.imports {
            if document.add_import(import.as_str()).is_err() {
                tracing::debug!(ontology, import = import.as_str(), "skipping an import that is not an IRI");
            }
        }
        for annotation in self.ontology_annotations(&obo.header) {
            document.add_annotation(annotation);
        }
        document.extend_axioms(self.header_axioms(&obo.header));

        let mut typedefs = FxHashSet::default();
        for typedef in &obo.typedefs {
            typedefs.insert(typedef.reference());
            document.extend_axioms(self.typedef_axioms(typedef));
        }
        let mut warned = FxHashSet::default();
        for term in &obo.terms {
            for (predicate, _) in term.relationships() {
                if !typedefs.contains(&predicate) && warned.insert(predicate) {
                    tracing::warn!(ontology, "has no typedef for {predicate}");
                }
            }
            document.extend_axioms(self.term_axioms(term));
        }

        self.declare_prefixes(&mut document, &obo.header);
        Ok(document)
    }

    /// The annotations of the `Ontology(...)` block.
    pub fn ontology_annotations(&self, header: &OboHeader) -> Vec<Annotation> {
        let mut annotations = Vec::new();
        if let Some(name) = &header.name {
            annotations.push(self.annotation(
                dcterms::TITLE,
                Literal::new_simple_literal(name.as_str()).into(),
            ));
        }
        if let Some(version) = &header.data_version {
            annotations.push(self.annotation(
                owl::VERSION_INFO,
                Literal::new_simple_literal(version.as_str()).into(),
            ));
        }
        if let Some(generator) = &header.auto_generated_by {
            annotations.push(self.annotation(
                oboinowl::AUTO_GENERATED_BY,
                Literal::new_simple_literal(generator.as_str()).into(),
            ));
        }
        for root in &header.root_terms {
            annotations.push(self.annotation(iao::HAS_ONTOLOGY_ROOT_TERM, root.clone().into()));
        }
        for property in &header.properties {
            annotations.push(Annotation::new(
                self.reference(property.predicate()),
                self.value(property.value()),
            ));
        }
        annotations
    }

    /// Declares the annotation properties the header relies on: root terms, subsets and synonym types.
    pub fn header_axioms(&self, header: &OboHeader) -> Vec<AnnotatedAxiom> {
        let mut axioms = Vec::new();
        if !header.root_terms.is_empty() {
            let root = self.vocab(iao::HAS_ONTOLOGY_ROOT_TERM);
            axioms.push(Axiom::declaration(EntityKind::AnnotationProperty, root.clone()).into());
            axioms.push(self.label(&root, "has ontology root term"));
        }
        if !header.subsetdefs.is_empty() {
            let subset_property = self.vocab(oboinowl::SUBSET_PROPERTY);
            axioms.push(
                Axiom::declaration(EntityKind::AnnotationProperty, subset_property.clone()).into(),
            );
            for subset in &header.subsetdefs {
                let subset = self.reference(subset);
                axioms.push(
                    Axiom::declaration(EntityKind::AnnotationProperty, subset.clone()).into(),
                );
                if let Some(name) = subset.name() {
                    axioms.push(self.label(&subset, name));
                }
                axioms.push(
                    Axiom::SubAnnotationPropertyOf {
                        sub_property: subset,
                        super_property: subset_property.clone(),
                    }
                    .into(),
                );
            }
        }
        if !header.synonym_typedefs.is_empty() {
            let has_scope = self.vocab(oboinowl::HAS_SCOPE);
            let synonym_type_property = self.vocab(oboinowl::SYNONYM_TYPE_PROPERTY);
            axioms.push(
                Axiom::declaration(EntityKind::AnnotationProperty, has_scope.clone()).into(),
            );
            for typedef in &header.synonym_typedefs {
                let reference = self.reference(typedef.reference());
                axioms.push(
                    Axiom::declaration(EntityKind::AnnotationProperty, reference.clone()).into(),
                );
                if let Some(name) = reference.name() {
                    axioms.push(self.label(&reference, name));
                }
                axioms.push(
                    Axiom::SubAnnotationPropertyOf {
                        sub_property: reference.clone(),
                        super_property: synonym_type_property.clone(),
                    }
                    .into(),
                );
                if let Some(specificity) = typedef.specificity() {
                    axioms.push(
                        Axiom::annotation_assertion(
                            has_scope.clone(),
                            reference,
                            self.vocab(specificity.synonym_predicate()),
                        )
                        .into(),
                    );
                }
            }
        }
        axioms
    }

    /// Translates a `[Term]` or `[Instance]` stanza.
    pub fn term_axioms(&self, term: &Term) -> Vec<AnnotatedAxiom> {
        let stanza = term.stanza();
        let subject = self.reference(stanza.reference());
        let mut axioms = Vec::new();
        match term.kind() {
            TermKind::Class => {
                axioms.push(Axiom::declaration(EntityKind::Class, subject.clone()).into());
                for parent in stanza.parents() {
                    axioms.push(
                        Axiom::subclass_of(subject.clone(), self.reference(parent))
                            .annotated(self.edge_annotations(stanza, rdfs::SUB_CLASS_OF, parent)),
                    );
                }
            }
            TermKind::Instance => {
                axioms.push(Axiom::declaration(EntityKind::NamedIndividual, subject.clone()).into());
                for parent in stanza.parents() {
                    axioms.push(
                        Axiom::class_assertion(self.reference(parent), subject.clone())
                            .annotated(self.edge_annotations(stanza, rdfs::SUB_CLASS_OF, parent)),
                    );
                }
            }
        }
        self.push_annotation_axioms(&mut axioms, stanza, &subject);

        if !stanza.intersection_of().is_empty() {
            let elements = stanza
                .intersection_of()
                .iter()
                .map(|element| match element {
                    IntersectionOf::Class(class) => self.reference(class).into(),
                    IntersectionOf::Restriction { predicate, target } => {
                        ClassExpression::some_values_from(
                            self.reference(predicate),
                            self.reference(target),
                        )
                    }
                })
                .collect::<Vec<_>>();
            axioms.push(
                Axiom::equivalent_classes([
                    subject.clone().into(),
                    ClassExpression::ObjectIntersectionOf(elements),
                ])
                .into(),
            );
        }
        if !stanza.union_of().is_empty() {
            let elements = stanza
                .union_of()
                .iter()
                .map(|element| self.reference(element).into())
                .collect::<Vec<_>>();
            axioms.push(
                Axiom::equivalent_classes([
                    subject.clone().into(),
                    ClassExpression::ObjectUnionOf(elements),
                ])
                .into(),
            );
        }
        for equivalent in stanza.equivalent_to() {
            axioms.push(
                Axiom::equivalent_classes([
                    subject.clone().into(),
                    self.reference(equivalent).into(),
                ])
                .annotated(self.edge_annotations(stanza, owl::EQUIVALENT_CLASS, equivalent)),
            );
        }
        for disjoint in stanza.disjoint_from() {
            axioms.push(
                Axiom::disjoint_classes([subject.clone().into(), self.reference(disjoint).into()])
                    .annotated(self.edge_annotations(stanza, owl::DISJOINT_WITH, disjoint)),
            );
        }
        for (predicate, target) in stanza.relationships() {
            let annotations = self.edge_annotations(stanza, predicate.as_ref(), target);
            let axiom = match term.kind() {
                TermKind::Class => Axiom::subclass_of(
                    subject.clone(),
                    ClassExpression::some_values_from(
                        self.reference(predicate),
                        self.reference(target),
                    ),
                ),
                TermKind::Instance => Axiom::ObjectPropertyAssertion {
                    property: self.reference(predicate).into(),
                    source: subject.clone(),
                    target: self.reference(target),
                },
            };
            axioms.push(axiom.annotated(annotations));
        }
        axioms
    }

    /// Translates a `[Typedef]` stanza.
    pub fn typedef_axioms(&self, typedef: &TypeDef) -> Vec<AnnotatedAxiom> {
        let stanza = typedef.stanza();
        let subject = self.reference(stanza.reference());
        let property = ObjectPropertyExpression::from(subject.clone());
        let is_metadata_tag = stanza.flag(Flag::MetadataTag) == Some(true);
        let mut axioms = Vec::new();
        axioms.push(
            Axiom::declaration(
                if is_metadata_tag {
                    EntityKind::AnnotationProperty
                } else {
                    EntityKind::ObjectProperty
                },
                subject.clone(),
            )
            .into(),
        );
        self.push_annotation_axioms(&mut axioms, stanza, &subject);

        if let Some(domain) = typedef.domain() {
            axioms.push(
                if is_metadata_tag {
                    Axiom::AnnotationPropertyDomain {
                        property: subject.clone(),
                        domain: self.reference(domain),
                    }
                } else {
                    Axiom::ObjectPropertyDomain {
                        property: property.clone(),
                        domain: self.reference(domain).into(),
                    }
                }
                .into(),
            );
        }
        if let Some(range) = typedef.range() {
            axioms.push(
                if is_metadata_tag {
                    Axiom::AnnotationPropertyRange {
                        property: subject.clone(),
                        range: self.reference(range),
                    }
                } else {
                    Axiom::ObjectPropertyRange {
                        property: property.clone(),
                        range: self.reference(range).into(),
                    }
                }
                .into(),
            );
        }
        for chain in typedef.holds_over_chain() {
            axioms.push(self.chain(chain, &property));
        }
        if !is_metadata_tag {
            for (flag, value) in stanza.flags() {
                if !value {
                    continue;
                }
                let property = property.clone();
                axioms.push(
                    match flag {
                        Flag::AntiSymmetric => Axiom::AsymmetricObjectProperty(property),
                        Flag::Reflexive => Axiom::ReflexiveObjectProperty(property),
                        Flag::Symmetric => Axiom::SymmetricObjectProperty(property),
                        Flag::Transitive => Axiom::TransitiveObjectProperty(property),
                        Flag::Functional => Axiom::FunctionalObjectProperty(property),
                        Flag::InverseFunctional => Axiom::InverseFunctionalObjectProperty(property),
                        _ => continue,
                    }
                    .into(),
                );
            }
        }
        for parent in stanza.parents() {
            let axiom = if is_metadata_tag {
                Axiom::SubAnnotationPropertyOf {
                    sub_property: subject.clone(),
                    super_property: self.reference(parent),
                }
            } else {
                Axiom::SubObjectPropertyOf {
                    sub_property: property.clone(),
                    super_property: self.reference(parent).into(),
                }
            };
            axioms.push(axiom.annotated(self.edge_annotations(stanza, rdfs::SUB_CLASS_OF, parent)));
        }
        for equivalent in stanza.equivalent_to() {
            axioms.push(
                Axiom::EquivalentObjectProperties(vec![
                    property.clone(),
                    self.reference(equivalent).into(),
                ])
                .into(),
            );
        }
        for disjoint in stanza.disjoint_from() {
            axioms.push(
                Axiom::DisjointObjectProperties(vec![
                    property.clone(),
                    self.reference(disjoint).into(),
                ])
                .into(),
            );
        }
        if let Some(inverse) = typedef.inverse() {
            axioms.push(
                Axiom::InverseObjectProperties(property.clone(), self.reference(inverse).into())
                    .into(),
            );
        }
        for over in typedef.transitive_over() {
            axioms.push(self.chain(&[stanza.reference().clone(), over.clone()], &property));
        }
        for chain in typedef.equivalent_to_chain() {
            axioms.push(self.chain(chain, &property));
        }
        axioms
    }

    /// The annotation assertions shared by terms and typedefs.
    fn push_annotation_axioms(
        &self,
        axioms: &mut Vec<AnnotatedAxiom>,
        stanza: &Stanza,
        subject: &Reference,
    ) {
        if let Some(name) = stanza.name() {
            axioms.push(self.label(subject, name));
        }
        if let Some(namespace) = stanza.namespace() {
            axioms.push(
                Axiom::annotation_assertion(
                    self.vocab(oboinowl::HAS_OBO_NAMESPACE),
                    subject.clone(),
                    Literal::new_simple_literal(namespace),
                )
                .into(),
            );
        }
        for (flag, value) in stanza.flags() {
            if let Some(predicate) = flag_predicate(flag) {
                axioms.push(
                    Axiom::annotation_assertion(
                        self.vocab(predicate),
                        subject.clone(),
                        Literal::from(value),
                    )
                    .into(),
                );
            }
        }
        for alt in stanza.alt_ids() {
            axioms.push(
                Axiom::annotation_assertion(
                    self.vocab(iao::TERM_REPLACED_BY),
                    self.reference(alt),
                    subject.clone(),
                )
                .into(),
            );
        }
        if let Some(definition) = stanza.definition() {
            let has_dbxref = self.vocab(oboinowl::HAS_DBXREF);
            axioms.push(
                Axiom::annotation_assertion(
                    self.vocab(iao::DEFINITION),
                    subject.clone(),
                    Literal::new_simple_literal(definition),
                )
                .annotated(
                    stanza
                        .definition_provenance()
                        .iter()
                        .map(|provenance| Annotation::new(has_dbxref.clone(), self.value(provenance))),
                ),
            );
        }
        for subset in stanza.subsets() {
            axioms.push(
                Axiom::annotation_assertion(
                    self.vocab(oboinowl::IN_SUBSET),
                    subject.clone(),
                    self.reference(subset),
                )
                .into(),
            );
        }
        for synonym in stanza.synonyms() {
            axioms.push(self.synonym(subject, synonym));
        }
        for xref in stanza.xrefs() {
            axioms.push(
                Axiom::annotation_assertion(
                    self.vocab(oboinowl::HAS_DBXREF),
                    subject.clone(),
                    self.reference(xref),
                )
                .annotated(self.edge_annotations(stanza, oboinowl::HAS_DBXREF, xref)),
            );
        }
        for provenance in stanza.provenance() {
            axioms.push(
                Axiom::annotation_assertion(
                    self.vocab(oboinowl::HAS_DBXREF),
                    subject.clone(),
                    self.reference(provenance),
                )
                .annotated(self.edge_annotations(stanza, oboinowl::HAS_DBXREF, provenance)),
            );
        }
        for (predicate, value) in stanza.properties() {
            let annotations = stanza
                .axioms(predicate, value)
                .iter()
                .map(|annotation| self.converted_annotation(annotation))
                .collect::<Vec<_>>();
            axioms.push(
                Axiom::annotation_assertion(
                    self.reference(predicate),
                    subject.clone(),
                    self.value(value),
                )
                .annotated(annotations),
            );
        }
    }

    fn synonym(&self, subject: &Reference, synonym: &Synonym) -> AnnotatedAxiom {
        let predicate = synonym
            .specificity()
            .map_or(oboinowl::HAS_RELATED_SYNONYM, |specificity| {
                specificity.synonym_predicate()
            });
        let has_dbxref = self.vocab(oboinowl::HAS_DBXREF);
        let mut annotations = synonym
            .annotations()
            .iter()
            .map(|annotation| self.converted_annotation(annotation))
            .collect::<Vec<_>>();
        annotations.extend(
            synonym
                .provenance()
                .iter()
                .map(|provenance| Annotation::new(has_dbxref.clone(), self.value(provenance))),
        );
        if let Some(synonym_type) = synonym.synonym_type() {
            annotations.push(Annotation::new(
                self.vocab(oboinowl::HAS_SYNONYM_TYPE),
                self.reference(synonym_type),
            ));
        }
        Axiom::annotation_assertion(
            self.vocab(predicate),
            subject.clone(),
            Literal::new_simple_literal(synonym.name()),
        )
        .annotated(annotations)
    }

    fn chain(&self, chain: &[Reference], super_property: &ObjectPropertyExpression) -> AnnotatedAxiom {
        Axiom::SubPropertyChainOf {
            property_chain: chain
                .iter()
                .map(|link| self.reference(link).into())
                .collect(),
            super_property: super_property.clone(),
        }
        .into()
    }

    fn label(&self, subject: &Reference, name: &str) -> AnnotatedAxiom {
        Axiom::annotation_assertion(
            self.vocab(rdfs::LABEL),
            subject.clone(),
            Literal::new_simple_literal(name),
        )
        .into()
    }

    fn edge_annotations(
        &self,
        stanza: &Stanza,
        predicate: impl Into<Reference>,
        target: &Reference,
    ) -> Vec<Annotation> {
        stanza
            .axioms(&predicate.into(), &target.clone().into())
            .iter()
            .map(|annotation| self.converted_annotation(annotation))
            .collect()
    }

    fn converted_annotation(&self, annotation: &Annotation) -> Annotation {
        Annotation::new(
            self.reference(annotation.predicate()),
            self.value(annotation.value()),
        )
    }

    fn annotation(&self, predicate: ReferenceRef<'_>, value: Value) -> Annotation {
        Annotation::new(self.vocab(predicate), self.value(&value))
    }

    fn vocab(&self, reference: ReferenceRef<'_>) -> Reference {
        self.reference(&reference.into_owned())
    }

    /// Rewrites a reference with the preferred prefix of its namespace.
    fn reference(&self, reference: &Reference) -> Reference {
        let prefix = self
            .registry
            .preferred_prefix(reference.prefix())
            .unwrap_or(reference.prefix());
        let converted = Reference::new_unchecked(prefix, reference.identifier());
        match reference.name() {
            Some(name) => converted.with_name(name),
            None => converted,
        }
    }

    fn value(&self, value: &Value) -> Value {
        match value {
            Value::Reference(reference) => self.reference(reference).into(),
            Value::Literal(literal) => match literal.language() {
                Some(language) => {
                    Literal::new_language_tagged_literal(literal.value(), language).into()
                }
                None => {
                    Literal::new_typed_literal(literal.value(), self.reference(literal.datatype()))
                        .into()
                }
            },
        }
    }

    /// Fills the prefix map with every prefix the document uses.
    fn declare_prefixes(&self, document: &mut Document, header: &OboHeader) {
        let used = document
            .undeclared_prefixes()
            .into_iter()
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();
        for prefix in used {
            let uri_prefix = self
                .registry
                .normalize_prefix(&prefix)
                .and_then(|normalized| {
                    self.registry
                        .uri_prefix(normalized)
                        .or_else(|| header.idspaces.get(normalized).map(String::as_str))
                })
                .or_else(|| header.idspaces.get(&prefix).map(String::as_str));
            let Some(uri_prefix) = uri_prefix else {
                tracing::debug!(ontology = header.ontology.as_str(), prefix = prefix.as_str(), "no URI prefix to declare");
                continue;
            };
            if let Err(error) = document.add_prefix(prefix.as_str(), uri_prefix) {
                tracing::warn!(ontology = header.ontology.as_str(), prefix = prefix.as_str(), "invalid URI prefix: {error}");
            }
        }
    }
}

/// The annotation property recording a boolean stanza flag, if it is not an OWL characteristic.
pub fn flag_predicate(flag: Flag) -> Option<ReferenceRef<'static>> {
    match flag {
        Flag::Anonymous => Some(oboinowl::IS_ANONYMOUS),
        Flag::Builtin => Some(oboinowl::BUILTIN),
        Flag::Obsolete => Some(owl::DEPRECATED),
        Flag::MetadataTag => Some(oboinowl::IS_METADATA_TAG),
        Flag::ClassLevel => Some(oboinowl::IS_CLASS_LEVEL),
        Flag::Cyclic => Some(oboinowl::IS_CYCLIC),
        Flag::AntiSymmetric
        | Flag::Symmetric
        | Flag::Reflexive
        | Flag::Transitive
        | Flag::Functional
        | Flag::InverseFunctional => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxobo::{MemoryRegistry, Specificity};

    fn go(id: &str) -> Reference {
        Reference::new_unchecked("go", id)
    }

    fn rendered(axioms: &[AnnotatedAxiom]) -> Vec<String> {
        axioms.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_term() {
        let registry = MemoryRegistry::obo_defaults();
        let mut term = Term::new(go("0050069").with_name("lysine dehydrogenase activity"));
        term.append_parent(go("0016491"))
            .append_relationship(Reference::new_unchecked("bfo", "0000050"), go("0000001"))
            .append_synonym(
                Synonym::new("LDH")
                    .with_specificity(Specificity::Exact)
                    .with_provenance(Reference::new_unchecked("pubmed", "1234")),
            )
            .set_flag(Flag::Builtin, false);
        let axioms = rendered(&OboConverter::new(&registry).term_axioms(&term));
        assert_eq!(
            vec![
                "Declaration(Class(GO:0050069))",
                "SubClassOf(GO:0050069 GO:0016491)",
                "AnnotationAssertion(rdfs:label GO:0050069 \"lysine dehydrogenase activity\")",
                "AnnotationAssertion(oboInOwl:builtin GO:0050069 \"false\"^^xsd:boolean)",
                "AnnotationAssertion(Annotation(oboInOwl:hasDbXref pubmed:1234) oboInOwl:hasExactSynonym GO:0050069 \"LDH\")",
                "SubClassOf(GO:0050069 ObjectSomeValuesFrom(BFO:0000050 GO:0000001))",
            ],
            axioms
        );
    }

    #[test]
    fn test_instance() {
        let registry = MemoryRegistry::obo_defaults();
        let mut term = Term::new_instance(go("0050069"));
        term.append_parent(go("0016491"))
            .append_relationship(Reference::new_unchecked("ro", "0002211"), go("0000001"));
        assert_eq!(
            vec![
                "Declaration(NamedIndividual(GO:0050069))",
                "ClassAssertion(GO:0016491 GO:0050069)",
                "ObjectPropertyAssertion(RO:0002211 GO:0050069 GO:0000001)",
            ],
            rendered(&OboConverter::new(&registry).term_axioms(&term))
        );
    }

    #[test]
    fn test_logical_definitions() {
        let registry = MemoryRegistry::obo_defaults();
        let part_of = Reference::new_unchecked("bfo", "0000050");
        let mut term = Term::new(go("0050069"));
        term.append_intersection_of(go("0016491"))
            .append_intersection_of((part_of, go("0000001")))
            .append_disjoint_from(go("0000002"));
        assert_eq!(
            vec![
                "Declaration(Class(GO:0050069))",
                "EquivalentClasses(GO:0050069 ObjectIntersectionOf(GO:0016491 ObjectSomeValuesFrom(BFO:0000050 GO:0000001)))",
                "DisjointClasses(GO:0050069 GO:0000002)",
            ],
            rendered(&OboConverter::new(&registry).term_axioms(&term))
        );
    }

    #[test]
    fn test_typedef() {
        let registry = MemoryRegistry::obo_defaults();
        let part_of = Reference::new_unchecked("bfo", "0000050");
        let mut typedef = TypeDef::new(part_of.clone().with_name("part of"));
        typedef
            .set_flag(Flag::Transitive, true)
            .set_flag(Flag::Symmetric, false);
        typedef
            .set_inverse(Reference::new_unchecked("bfo", "0000051"))
            .append_transitive_over(Reference::new_unchecked("ro", "0002131"));
        assert_eq!(
            vec![
                "Declaration(ObjectProperty(BFO:0000050))",
                "AnnotationAssertion(rdfs:label BFO:0000050 \"part of\")",
                "TransitiveObjectProperty(BFO:0000050)",
                "InverseObjectProperties(BFO:0000050 BFO:0000051)",
                "SubObjectPropertyOf(ObjectPropertyChain(BFO:0000050 RO:0002131) BFO:0000050)",
            ],
            rendered(&OboConverter::new(&registry).typedef_axioms(&typedef))
        );
    }

    #[test]
    fn test_metadata_tag() {
        let registry = MemoryRegistry::obo_defaults();
        let mut typedef = TypeDef::new(Reference::default_for("go", "editor_note"));
        typedef.set_flag(Flag::MetadataTag, true);
        typedef.set_domain(go("0000001"));
        let axioms = rendered(&OboConverter::new(&registry).typedef_axioms(&typedef));
        assert_eq!(
            vec![
                "Declaration(AnnotationProperty(obo:go#editor_note))",
                "AnnotationAssertion(oboInOwl:is_metadata_tag obo:go#editor_note \"true\"^^xsd:boolean)",
                "AnnotationPropertyDomain(obo:go#editor_note GO:0000001)",
            ],
            axioms
        );
    }

    #[test]
    fn test_flag_predicates() {
        for flag in Flag::ALL {
            assert_eq!(
                flag_predicate(flag).is_none(),
                flag.is_typedef_only() && !matches!(flag, Flag::MetadataTag | Flag::ClassLevel | Flag::Cyclic),
                "{flag:?}"
            );
        }
    }
}
