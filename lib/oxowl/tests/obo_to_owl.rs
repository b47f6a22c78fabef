use oxobo::{MemoryRegistry, OboParser, Reference};
use oxowl::{Document, EntityKind, FunctionalSerializer, OboConverter, document_to_graph};
use oxrdf::vocab::rdfs;
use oxrdf::{NamedNode, Triple};
use std::error::Error;

const HEADER: &str = "format-version: 1.4\ndata-version: 2024-01-17\nontology: go\nsynonymtypedef: OMO:0003000 \"abbreviation\" EXACT\n\n";

fn convert(stanzas: &str) -> Result<Document, Box<dyn Error>> {
    let registry = MemoryRegistry::obo_defaults();
    let obo = OboParser::new(&registry).parse_str(&format!("{HEADER}{stanzas}"))?;
    Ok(OboConverter::new(&registry).convert(&obo)?)
}

fn functional(document: &Document) -> Result<String, Box<dyn Error>> {
    Ok(String::from_utf8(
        FunctionalSerializer::new().serialize_document(document, Vec::new())?,
    )?)
}

fn lines(document: &Document) -> Result<Vec<String>, Box<dyn Error>> {
    Ok(functional(document)?.lines().map(ToOwned::to_owned).collect())
}

#[test]
fn test_header() -> Result<(), Box<dyn Error>> {
    let document = convert("")?;
    assert_eq!("http://purl.obolibrary.org/obo/go.owl", document.iri());
    assert_eq!(
        Some("http://purl.obolibrary.org/obo/go/2024-01-17/go.owl"),
        document.version_iri()
    );
    let lines = lines(&document)?;
    assert!(lines.contains(&"Ontology(<http://purl.obolibrary.org/obo/go.owl> <http://purl.obolibrary.org/obo/go/2024-01-17/go.owl>".to_owned()));
    assert!(lines.contains(&"Annotation(owl:versionInfo \"2024-01-17\")".to_owned()));
    assert!(lines.contains(&"Declaration(AnnotationProperty(OMO:0003000))".to_owned()));
    assert!(lines.contains(
        &"SubAnnotationPropertyOf(OMO:0003000 oboInOwl:SynonymTypeProperty)".to_owned()
    ));
    assert!(lines.contains(
        &"AnnotationAssertion(oboInOwl:hasScope OMO:0003000 oboInOwl:hasExactSynonym)".to_owned()
    ));
    assert!(lines.contains(&"Prefix(OMO:=<http://purl.obolibrary.org/obo/OMO_>)".to_owned()));
    assert_eq!(Some(&")".to_owned()), lines.last());
    Ok(())
}

#[test]
fn test_booleans_are_typed() -> Result<(), Box<dyn Error>> {
    let document = convert("[Term]\nid: GO:0050069\nis_obsolete: true\nbuiltin: false\n")?;
    let lines = lines(&document)?;
    assert!(lines.contains(
        &"AnnotationAssertion(owl:deprecated GO:0050069 \"true\"^^xsd:boolean)".to_owned()
    ));
    assert!(lines.contains(
        &"AnnotationAssertion(oboInOwl:builtin GO:0050069 \"false\"^^xsd:boolean)".to_owned()
    ));
    assert!(lines.contains(&"Prefix(xsd:=<http://www.w3.org/2001/XMLSchema#>)".to_owned()));
    Ok(())
}

#[test]
fn test_definition_and_synonyms() -> Result<(), Box<dyn Error>> {
    let document = convert(
        "[Term]\nid: GO:0050069\nname: lysine dehydrogenase activity\ndef: \"Catalysis.\" [PMID:1]\nsynonym: \"LDH\" EXACT OMO:0003000 [PMID:1234]\n",
    )?;
    let lines = lines(&document)?;
    assert!(lines.contains(&"Declaration(Class(GO:0050069))".to_owned()));
    assert!(lines.contains(
        &"AnnotationAssertion(rdfs:label GO:0050069 \"lysine dehydrogenase activity\")".to_owned()
    ));
    assert!(lines.contains(
        &"AnnotationAssertion(Annotation(oboInOwl:hasDbXref pubmed:1) IAO:0000115 GO:0050069 \"Catalysis.\")".to_owned()
    ));
    assert!(lines.contains(
        &"AnnotationAssertion(Annotation(oboInOwl:hasDbXref pubmed:1234) Annotation(oboInOwl:hasSynonymType OMO:0003000) oboInOwl:hasExactSynonym GO:0050069 \"LDH\")".to_owned()
    ));
    Ok(())
}

#[test]
fn test_relationships_and_typedefs() -> Result<(), Box<dyn Error>> {
    let document = convert(
        "[Term]\nid: GO:0050069\nis_a: GO:0016491\nrelationship: BFO:0000050 GO:0000001\n\n[Typedef]\nid: BFO:0000050\nname: part of\nis_transitive: true\ninverse_of: BFO:0000051\n",
    )?;
    let lines = lines(&document)?;
    let position = |line: &str| lines.iter().position(|l| l == line);
    let typedef = position("Declaration(ObjectProperty(BFO:0000050))").ok_or("no typedef")?;
    let term = position("Declaration(Class(GO:0050069))").ok_or("no term")?;
    assert!(typedef < term);
    assert!(position("TransitiveObjectProperty(BFO:0000050)").is_some());
    assert!(position("InverseObjectProperties(BFO:0000050 BFO:0000051)").is_some());
    assert!(position("SubClassOf(GO:0050069 GO:0016491)").is_some());
    assert!(
        position("SubClassOf(GO:0050069 ObjectSomeValuesFrom(BFO:0000050 GO:0000001))").is_some()
    );

    let go = |id: &str| Reference::new_unchecked("GO", id);
    assert!(document.is_declared(EntityKind::Class, &go("0050069")));
    assert_eq!(2, document.direct_superclasses_of(&go("0050069")).len());
    Ok(())
}

#[test]
fn test_instances() -> Result<(), Box<dyn Error>> {
    let document =
        convert("[Instance]\nid: GO:0050069\ninstance_of: GO:0016491\n")?;
    let lines = lines(&document)?;
    assert!(lines.contains(&"Declaration(NamedIndividual(GO:0050069))".to_owned()));
    assert!(lines.contains(&"ClassAssertion(GO:0016491 GO:0050069)".to_owned()));
    Ok(())
}

#[test]
fn test_every_prefix_is_declared() -> Result<(), Box<dyn Error>> {
    let document = convert(
        "[Term]\nid: GO:0050069\nname: lysine dehydrogenase activity\nxref: EC:1.4.1.15\nrelationship: BFO:0000050 GO:0000001\n",
    )?;
    assert!(document.undeclared_prefixes().is_empty());

    let graph = document_to_graph(&document)?;
    assert!(graph.contains(&Triple::new(
        NamedNode::new("http://purl.obolibrary.org/obo/GO_0050069")?,
        rdfs::LABEL,
        oxrdf::Literal::new_simple_literal("lysine dehydrogenase activity"),
    )));
    assert!(graph.contains(&Triple::new(
        NamedNode::new("http://purl.obolibrary.org/obo/GO_0050069")?,
        NamedNode::new("http://www.geneontology.org/formats/oboInOwl#hasDbXref")?,
        NamedNode::new("https://www.enzyme-database.org/query.php?ec=1.4.1.15")?,
    )));
    Ok(())
}
