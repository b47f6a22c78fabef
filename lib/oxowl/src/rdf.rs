//! Rendering of a [`Document`] as an RDF graph following the OWL 2 RDF mapping.
//!
//! The resulting [`Graph`] can be written with any oxrdf compatible serializer.

use crate::axiom::{AnnotatedAxiom, Axiom};
use crate::document::Document;
use crate::entity::EntityKind;
use crate::error::OwlError;
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use oxobo::vocab::xsd as obo_xsd;
use oxobo::{Annotation, Reference, Value};
use oxrdf::vocab::{owl, rdf, rdfs};
use oxrdf::{
    BlankNode, Graph, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode, Term, Triple,
};

const OWL_AXIOM: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Axiom");
const OWL_ANNOTATED_SOURCE: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#annotatedSource");
const OWL_ANNOTATED_PROPERTY: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#annotatedProperty");
const OWL_ANNOTATED_TARGET: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#annotatedTarget");

/// Renders a document as an RDF graph.
///
/// References are expanded with the document prefix map. Blank nodes are allocated
/// deterministically so rendering the same document twice gives the same graph.
///
/// ```
/// use oxobo::Reference;
/// use oxowl::{Axiom, Document, document_to_graph};
/// use oxrdf::vocab::rdfs;
/// use oxrdf::{NamedNode, Triple};
///
/// let mut document = Document::new("http://purl.obolibrary.org/obo/go.owl")?
///     .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_")?;
/// document.add_axiom(Axiom::subclass_of(
///     Reference::new_unchecked("GO", "0050069"),
///     Reference::new_unchecked("GO", "0016491"),
/// ));
/// let graph = document_to_graph(&document)?;
/// assert!(graph.contains(&Triple::new(
///     NamedNode::new("http://purl.obolibrary.org/obo/GO_0050069")?,
///     rdfs::SUB_CLASS_OF,
///     NamedNode::new("http://purl.obolibrary.org/obo/GO_0016491")?,
/// )));
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn document_to_graph(document: &Document) -> Result<Graph, OwlError> {
    GraphSerializer::new(document).serialize()
}

/// What the annotations of an axiom attach to.
enum Anchor {
    /// Triples that get reified with an `owl:Axiom` node.
    Triples(Vec<Triple>),
    /// A node that directly carries the annotations (e.g. `owl:AllDisjointClasses`).
    Node(BlankNode),
}

struct GraphSerializer<'a> {
    document: &'a Document,
    graph: Graph,
    blank_node_counter: u64,
}

impl<'a> GraphSerializer<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            graph: Graph::new(),
            blank_node_counter: 0,
        }
    }

    fn serialize(mut self) -> Result<Graph, OwlError> {
        let ontology = NamedNode::new(self.document.iri())?;
        self.insert(ontology.clone(), rdf::TYPE, owl::ONTOLOGY);
        if let Some(version_iri) = self.document.version_iri() {
            self.insert(ontology.clone(), owl::VERSION_IRI, NamedNode::new(version_iri)?);
        }
        for import in self.document.imports() {
            self.insert(ontology.clone(), owl::IMPORTS, NamedNode::new(import.as_str())?);
        }
        for annotation in self.document.annotations() {
            self.annotation(ontology.clone().into(), annotation)?;
        }
        for axiom in self.document.axioms() {
            self.annotated_axiom(axiom)?;
        }
        Ok(self.graph)
    }

    fn annotated_axiom(&mut self, axiom: &AnnotatedAxiom) -> Result<(), OwlError> {
        let anchor = self.axiom(&axiom.axiom)?;
        if !axiom.is_annotated() {
            return Ok(());
        }
        match anchor {
            Anchor::Node(node) => {
                for annotation in &axiom.annotations {
                    self.annotation(node.clone().into(), annotation)?;
                }
            }
            Anchor::Triples(triples) => {
                for triple in triples {
                    let node = self.fresh_blank_node();
                    self.insert(node.clone(), rdf::TYPE, OWL_AXIOM);
                    self.insert(node.clone(), OWL_ANNOTATED_SOURCE, triple.subject);
                    self.insert(node.clone(), OWL_ANNOTATED_PROPERTY, triple.predicate);
                    self.insert(node.clone(), OWL_ANNOTATED_TARGET, triple.object);
                    for annotation in &axiom.annotations {
                        self.annotation(node.clone().into(), annotation)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn axiom(&mut self, axiom: &Axiom) -> Result<Anchor, OwlError> {
        let triples = match axiom {
            Axiom::Declaration(kind, entity) => {
                let kind = match kind {
                    EntityKind::Class => owl::CLASS,
                    EntityKind::ObjectProperty => owl::OBJECT_PROPERTY,
                    EntityKind::DataProperty => owl::DATATYPE_PROPERTY,
                    EntityKind::AnnotationProperty => owl::ANNOTATION_PROPERTY,
                    EntityKind::NamedIndividual => owl::NAMED_INDIVIDUAL,
                    EntityKind::Datatype => rdfs::DATATYPE,
                };
                vec![Triple::new(self.named_node(entity)?, rdf::TYPE, kind)]
            }
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => vec![Triple::new(
                self.class_expression(sub_class)?,
                rdfs::SUB_CLASS_OF,
                self.class_expression(super_class)?,
            )],
            Axiom::EquivalentClasses(classes) => {
                let nodes = classes
                    .iter()
                    .map(|class| self.class_expression(class))
                    .collect::<Result<Vec<_>, _>>()?;
                pairs_with_first(nodes, owl::EQUIVALENT_CLASS)
            }
            Axiom::DisjointClasses(classes) => {
                let nodes = classes
                    .iter()
                    .map(|class| self.class_expression(class))
                    .collect::<Result<Vec<_>, _>>()?;
                if nodes.len() == 2 {
                    pairs_with_first(nodes, owl::DISJOINT_WITH)
                } else {
                    return Ok(Anchor::Node(self.all_disjoint(owl::ALL_DISJOINT_CLASSES, nodes)));
                }
            }
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => vec![Triple::new(
                self.property(sub_property)?,
                rdfs::SUB_PROPERTY_OF,
                self.property(super_property)?,
            )],
            Axiom::SubPropertyChainOf {
                property_chain,
                super_property,
            } => {
                let links = property_chain
                    .iter()
                    .map(|link| self.property(link))
                    .collect::<Result<Vec<_>, _>>()?;
                let super_property = self.property(super_property)?;
                let list = self.create_rdf_list(links);
                vec![Triple::new(super_property, owl::PROPERTY_CHAIN_AXIOM, list)]
            }
            Axiom::EquivalentObjectProperties(properties) => {
                let nodes = properties
                    .iter()
                    .map(|property| self.property(property))
                    .collect::<Result<Vec<_>, _>>()?;
                pairs_with_first(nodes, owl::EQUIVALENT_PROPERTY)
            }
            Axiom::DisjointObjectProperties(properties) => {
                let nodes = properties
                    .iter()
                    .map(|property| self.property(property))
                    .collect::<Result<Vec<_>, _>>()?;
                if nodes.len() == 2 {
                    pairs_with_first(nodes, owl::PROPERTY_DISJOINT_WITH)
                } else {
                    return Ok(Anchor::Node(
                        self.all_disjoint(owl::ALL_DISJOINT_PROPERTIES, nodes),
                    ));
                }
            }
            Axiom::InverseObjectProperties(first, second) => vec![Triple::new(
                self.property(first)?,
                owl::INVERSE_OF,
                self.property(second)?,
            )],
            Axiom::ObjectPropertyDomain { property, domain } => vec![Triple::new(
                self.property(property)?,
                rdfs::DOMAIN,
                self.class_expression(domain)?,
            )],
            Axiom::ObjectPropertyRange { property, range } => vec![Triple::new(
                self.property(property)?,
                rdfs::RANGE,
                self.class_expression(range)?,
            )],
            Axiom::FunctionalObjectProperty(property) => {
                vec![Triple::new(self.property(property)?, rdf::TYPE, owl::FUNCTIONAL_PROPERTY)]
            }
            Axiom::InverseFunctionalObjectProperty(property) => vec![Triple::new(
                self.property(property)?,
                rdf::TYPE,
                owl::INVERSE_FUNCTIONAL_PROPERTY,
            )],
            Axiom::ReflexiveObjectProperty(property) => {
                vec![Triple::new(self.property(property)?, rdf::TYPE, owl::REFLEXIVE_PROPERTY)]
            }
            Axiom::SymmetricObjectProperty(property) => {
                vec![Triple::new(self.property(property)?, rdf::TYPE, owl::SYMMETRIC_PROPERTY)]
            }
            Axiom::AsymmetricObjectProperty(property) => {
                vec![Triple::new(self.property(property)?, rdf::TYPE, owl::ASYMMETRIC_PROPERTY)]
            }
            Axiom::TransitiveObjectProperty(property) => {
                vec![Triple::new(self.property(property)?, rdf::TYPE, owl::TRANSITIVE_PROPERTY)]
            }
            Axiom::ClassAssertion { class, individual } => vec![Triple::new(
                self.named_node(individual)?,
                rdf::TYPE,
                self.class_expression(class)?,
            )],
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                let (source, target) = if property.is_inverse() {
                    (target, source)
                } else {
                    (source, target)
                };
                vec![Triple::new(
                    self.named_node(source)?,
                    self.named_node(property.property())?,
                    self.named_node(target)?,
                )]
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => vec![Triple::new(
                self.named_node(subject)?,
                self.named_node(property)?,
                self.value(value)?,
            )],
            Axiom::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => vec![Triple::new(
                self.named_node(sub_property)?,
                rdfs::SUB_PROPERTY_OF,
                self.named_node(super_property)?,
            )],
            Axiom::AnnotationPropertyDomain { property, domain } => vec![Triple::new(
                self.named_node(property)?,
                rdfs::DOMAIN,
                self.named_node(domain)?,
            )],
            Axiom::AnnotationPropertyRange { property, range } => vec![Triple::new(
                self.named_node(property)?,
                rdfs::RANGE,
                self.named_node(range)?,
            )],
        };
        for triple in &triples {
            self.graph.insert(triple);
        }
        Ok(Anchor::Triples(triples))
    }

    fn class_expression(&mut self, class: &ClassExpression) -> Result<NamedOrBlankNode, OwlError> {
        Ok(match class {
            ClassExpression::Class(class) => self.named_node(class)?.into(),
            ClassExpression::ObjectIntersectionOf(classes) => {
                self.class_list(owl::INTERSECTION_OF, classes)?
            }
            ClassExpression::ObjectUnionOf(classes) => self.class_list(owl::UNION_OF, classes)?,
            ClassExpression::ObjectComplementOf(class) => {
                let complement = self.class_expression(class)?;
                let node = self.fresh_blank_node();
                self.insert(node.clone(), rdf::TYPE, owl::CLASS);
                self.insert(node.clone(), owl::COMPLEMENT_OF, complement);
                node.into()
            }
            ClassExpression::ObjectOneOf(individuals) => {
                let individuals = individuals
                    .iter()
                    .map(|individual| Ok(self.named_node(individual)?.into()))
                    .collect::<Result<Vec<NamedOrBlankNode>, OwlError>>()?;
                let list = self.create_rdf_list(individuals);
                let node = self.fresh_blank_node();
                self.insert(node.clone(), rdf::TYPE, owl::CLASS);
                self.insert(node.clone(), owl::ONE_OF, list);
                node.into()
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                let filler = self.class_expression(filler)?;
                self.restriction(property, owl::SOME_VALUES_FROM, filler)?
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                let filler = self.class_expression(filler)?;
                self.restriction(property, owl::ALL_VALUES_FROM, filler)?
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => {
                let individual = self.named_node(individual)?;
                self.restriction(property, owl::HAS_VALUE, individual.into())?
            }
        })
    }

    fn class_list(
        &mut self,
        predicate: NamedNodeRef<'_>,
        classes: &[ClassExpression],
    ) -> Result<NamedOrBlankNode, OwlError> {
        let members = classes
            .iter()
            .map(|class| self.class_expression(class))
            .collect::<Result<Vec<_>, _>>()?;
        let list = self.create_rdf_list(members);
        let node = self.fresh_blank_node();
        self.insert(node.clone(), rdf::TYPE, owl::CLASS);
        self.insert(node.clone(), predicate, list);
        Ok(node.into())
    }

    fn restriction(
        &mut self,
        property: &ObjectPropertyExpression,
        predicate: NamedNodeRef<'_>,
        filler: NamedOrBlankNode,
    ) -> Result<NamedOrBlankNode, OwlError> {
        let property = self.property(property)?;
        let node = self.fresh_blank_node();
        self.insert(node.clone(), rdf::TYPE, owl::RESTRICTION);
        self.insert(node.clone(), owl::ON_PROPERTY, property);
        self.insert(node.clone(), predicate, filler);
        Ok(node.into())
    }

    fn property(
        &mut self,
        property: &ObjectPropertyExpression,
    ) -> Result<NamedOrBlankNode, OwlError> {
        let named = self.named_node(property.property())?;
        if !property.is_inverse() {
            return Ok(named.into());
        }
        let node = self.fresh_blank_node();
        self.insert(node.clone(), owl::INVERSE_OF, named);
        Ok(node.into())
    }

    fn all_disjoint(&mut self, kind: NamedNodeRef<'_>, members: Vec<NamedOrBlankNode>) -> BlankNode {
        let list = self.create_rdf_list(members);
        let node = self.fresh_blank_node();
        self.insert(node.clone(), rdf::TYPE, kind);
        self.insert(node.clone(), owl::MEMBERS, list);
        node
    }

    fn annotation(
        &mut self,
        subject: NamedOrBlankNode,
        annotation: &Annotation,
    ) -> Result<(), OwlError> {
        let predicate = self.named_node(annotation.predicate())?;
        let value = self.value(annotation.value())?;
        self.insert(subject, predicate, value);
        Ok(())
    }

    fn value(&self, value: &Value) -> Result<Term, OwlError> {
        Ok(match value {
            Value::Reference(reference) => self.named_node(reference)?.into(),
            Value::Literal(literal) => {
                if let Some(language) = literal.language() {
                    Literal::new_language_tagged_literal(literal.value(), language)?.into()
                } else if *literal.datatype() == obo_xsd::STRING {
                    Literal::new_simple_literal(literal.value()).into()
                } else {
                    Literal::new_typed_literal(literal.value(), self.named_node(literal.datatype())?)
                        .into()
                }
            }
        })
    }

    fn named_node(&self, reference: &Reference) -> Result<NamedNode, OwlError> {
        let iri = self
            .document
            .expand(reference)
            .ok_or_else(|| OwlError::UnknownPrefix(reference.prefix().to_owned()))?;
        Ok(NamedNode::new(iri)?)
    }

    /// Builds an `rdf:List` from back to front.
    fn create_rdf_list(&mut self, items: Vec<NamedOrBlankNode>) -> Term {
        let mut current = Term::from(rdf::NIL);
        for item in items.into_iter().rev() {
            let cell = self.fresh_blank_node();
            self.insert(cell.clone(), rdf::FIRST, item);
            self.insert(cell.clone(), rdf::REST, current);
            current = cell.into();
        }
        current
    }

    fn insert(
        &mut self,
        subject: impl Into<NamedOrBlankNode>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
    ) {
        self.graph
            .insert(&Triple::new(subject.into(), predicate, object));
    }

    fn fresh_blank_node(&mut self) -> BlankNode {
        self.blank_node_counter += 1;
        BlankNode::new_unchecked(format!("b{}", self.blank_node_counter))
    }
}

/// Relates the first node to each of the others.
fn pairs_with_first(nodes: Vec<NamedOrBlankNode>, predicate: NamedNodeRef<'_>) -> Vec<Triple> {
    let mut nodes = nodes.into_iter();
    let Some(first) = nodes.next() else {
        return Vec::new();
    };
    nodes
        .map(|other| Triple::new(first.clone(), predicate, other))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxiri::IriParseError;
    use oxobo::Literal as OboLiteral;

    const GO: &str = "http://purl.obolibrary.org/obo/GO_";
    const BFO: &str = "http://purl.obolibrary.org/obo/BFO_";

    fn go(id: &str) -> Reference {
        Reference::new_unchecked("GO", id)
    }

    fn node(iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    fn document() -> Result<Document, IriParseError> {
        Document::new("http://purl.obolibrary.org/obo/go.owl")?
            .with_prefix("GO", GO)?
            .with_prefix("BFO", BFO)?
            .with_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#")?
            .with_prefix("xsd", "http://www.w3.org/2001/XMLSchema#")?
            .with_prefix("oboInOwl", "http://www.geneontology.org/formats/oboInOwl#")
    }

    #[test]
    fn test_header() -> Result<(), Box<dyn std::error::Error>> {
        let mut document = document()?;
        document.set_version_iri("http://purl.obolibrary.org/obo/go/2024-01-01/go.owl")?;
        let graph = document_to_graph(&document)?;
        let ontology = node("http://purl.obolibrary.org/obo/go.owl");
        assert!(graph.contains(&Triple::new(ontology.clone(), rdf::TYPE, owl::ONTOLOGY)));
        assert!(graph.contains(&Triple::new(
            ontology,
            owl::VERSION_IRI,
            node("http://purl.obolibrary.org/obo/go/2024-01-01/go.owl"),
        )));
        assert_eq!(2, graph.len());
        Ok(())
    }

    #[test]
    fn test_restriction() -> Result<(), Box<dyn std::error::Error>> {
        let mut document = document()?;
        document.add_axiom(Axiom::subclass_of(
            go("0050069"),
            ClassExpression::some_values_from(
                Reference::new_unchecked("BFO", "0000050"),
                go("0000001"),
            ),
        ));
        let graph = document_to_graph(&document)?;
        let restriction = BlankNode::new_unchecked("b1");
        assert!(graph.contains(&Triple::new(
            node(&format!("{GO}0050069")),
            rdfs::SUB_CLASS_OF,
            restriction.clone(),
        )));
        assert!(graph.contains(&Triple::new(restriction.clone(), rdf::TYPE, owl::RESTRICTION)));
        assert!(graph.contains(&Triple::new(
            restriction.clone(),
            owl::ON_PROPERTY,
            node(&format!("{BFO}0000050")),
        )));
        assert!(graph.contains(&Triple::new(
            restriction,
            owl::SOME_VALUES_FROM,
            node(&format!("{GO}0000001")),
        )));
        Ok(())
    }

    #[test]
    fn test_annotated_axioms_are_reified() -> Result<(), Box<dyn std::error::Error>> {
        let mut document = document()?;
        let has_dbxref = Reference::new_unchecked("oboInOwl", "hasDbXref");
        document.add_axiom(
            Axiom::subclass_of(go("0050069"), go("0016491")).annotated([Annotation::new(
                has_dbxref,
                OboLiteral::new_simple_literal("GOC:curators"),
            )]),
        );
        let graph = document_to_graph(&document)?;
        let axiom = BlankNode::new_unchecked("b1");
        assert!(graph.contains(&Triple::new(axiom.clone(), rdf::TYPE, OWL_AXIOM)));
        assert!(graph.contains(&Triple::new(
            axiom.clone(),
            OWL_ANNOTATED_SOURCE,
            node(&format!("{GO}0050069")),
        )));
        assert!(graph.contains(&Triple::new(
            axiom.clone(),
            OWL_ANNOTATED_PROPERTY,
            rdfs::SUB_CLASS_OF,
        )));
        assert!(graph.contains(&Triple::new(
            axiom.clone(),
            OWL_ANNOTATED_TARGET,
            node(&format!("{GO}0016491")),
        )));
        assert!(graph.contains(&Triple::new(
            axiom,
            node("http://www.geneontology.org/formats/oboInOwl#hasDbXref"),
            Literal::new_simple_literal("GOC:curators"),
        )));
        Ok(())
    }

    #[test]
    fn test_literals() -> Result<(), Box<dyn std::error::Error>> {
        let mut document = document()?;
        let label = Reference::new_unchecked("rdfs", "label");
        document.add_axiom(Axiom::annotation_assertion(
            label.clone(),
            go("0050069"),
            OboLiteral::new_language_tagged_literal("lysine dehydrogenase activity", "en"),
        ));
        document.add_axiom(Axiom::annotation_assertion(
            Reference::new_unchecked("oboInOwl", "builtin"),
            go("0050069"),
            OboLiteral::from(true),
        ));
        let graph = document_to_graph(&document)?;
        assert!(graph.contains(&Triple::new(
            node(&format!("{GO}0050069")),
            rdfs::LABEL,
            Literal::new_language_tagged_literal("lysine dehydrogenase activity", "en")?,
        )));
        assert!(graph.contains(&Triple::new(
            node(&format!("{GO}0050069")),
            node("http://www.geneontology.org/formats/oboInOwl#builtin"),
            Literal::new_typed_literal("true", oxrdf::vocab::xsd::BOOLEAN),
        )));
        Ok(())
    }

    #[test]
    fn test_disjoint_classes() -> Result<(), Box<dyn std::error::Error>> {
        let mut document = document()?;
        document.add_axiom(Axiom::disjoint_classes([
            go("0000001").into(),
            go("0000002").into(),
        ]));
        document.add_axiom(Axiom::disjoint_classes([
            go("0000003").into(),
            go("0000004").into(),
            go("0000005").into(),
        ]));
        let graph = document_to_graph(&document)?;
        assert!(graph.contains(&Triple::new(
            node(&format!("{GO}0000001")),
            owl::DISJOINT_WITH,
            node(&format!("{GO}0000002")),
        )));
        let all_disjoint = BlankNode::new_unchecked("b4");
        assert!(graph.contains(&Triple::new(
            all_disjoint.clone(),
            rdf::TYPE,
            owl::ALL_DISJOINT_CLASSES,
        )));
        assert!(graph.contains(&Triple::new(
            all_disjoint,
            owl::MEMBERS,
            BlankNode::new_unchecked("b3"),
        )));
        assert!(graph.contains(&Triple::new(
            BlankNode::new_unchecked("b1"),
            rdf::REST,
            rdf::NIL,
        )));
        Ok(())
    }

    #[test]
    fn test_unknown_prefix() -> Result<(), IriParseError> {
        let mut document = document()?;
        document.add_axiom(Axiom::declaration(
            EntityKind::Class,
            Reference::new_unchecked("CHEBI", "1"),
        ));
        assert!(matches!(
            document_to_graph(&document),
            Err(OwlError::UnknownPrefix(prefix)) if prefix == "CHEBI"
        ));
        Ok(())
    }
}
