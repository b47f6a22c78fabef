use oxobo::{
    Flag, MemoryRegistry, OboDocument, OboHeader, OboParser, OboSerializer, Reference,
    Specificity, Synonym, Term, TypeDef, Value,
};
use std::collections::BTreeSet;
use std::error::Error;

fn go(id: &str) -> Reference {
    Reference::new_unchecked("go", id)
}

fn part_of() -> Reference {
    Reference::default_for("go", "part_of")
}

fn document() -> OboDocument {
    let mut header = OboHeader::new("go");
    header.name = Some("Gene Ontology".to_owned());
    header.data_version = Some("2024-01-17".to_owned());
    header.root_terms.push(go("0008150"));
    let mut document = OboDocument::new(header);

    let mut typedef = TypeDef::new(part_of().with_name("part of"));
    typedef
        .set_flag(Flag::Transitive, true)
        .set_flag(Flag::MetadataTag, false);
    typedef.append_xref(Reference::new_unchecked("bfo", "0000050"));
    document.typedefs.push(typedef);

    let mut term = Term::new(go("0050069").with_name("lysine dehydrogenase activity"));
    term.set_definition(
        "Catalysis of the reaction: L-lysine + NAD+ = 1,2-didehydropiperidine-6-carboxylate.",
        [Value::from(Reference::new_unchecked("pubmed", "1234"))],
    )
    .append_synonym(
        Synonym::new("L-lysine:NAD+ oxidoreductase").with_specificity(Specificity::Exact),
    )
    .append_synonym(Synonym::new("lysine dehydrogenase"))
    .append_xref(Reference::new_unchecked("ec", "1.4.1.15"))
    .append_xref(Reference::new_unchecked("mesh", "D1"))
    .append_parent(go("0016491"))
    .append_relationship(part_of(), go("0000002"))
    .append_alt(go("0000006"))
    .set_namespace("molecular_function");
    document.terms.push(term);

    let mut obsolete = Term::new(go("0000001").with_name("obsolete thing"));
    obsolete
        .set_obsolete(true)
        .append_replaced_by(go("0050069"))
        .append_consider(go("0016491"));
    document.terms.push(obsolete);
    document
}

fn round_trip(document: &OboDocument) -> Result<OboDocument, Box<dyn Error>> {
    let registry = MemoryRegistry::obo_defaults();
    let output = OboSerializer::new()
        .with_registry(&registry)
        .serialize_document(document, Vec::new())?;
    Ok(OboParser::new(&registry).strict().parse_slice(&output)?)
}

fn set<T: Ord + Clone>(values: &[T]) -> BTreeSet<T> {
    values.iter().cloned().collect()
}

#[test]
fn test_header_round_trip() -> Result<(), Box<dyn Error>> {
    let document = document();
    let parsed = round_trip(&document)?;
    assert_eq!("go", parsed.ontology());
    assert_eq!(Some("Gene Ontology"), parsed.header.name.as_deref());
    assert_eq!(Some("2024-01-17"), parsed.header.data_version.as_deref());
    assert_eq!(vec![go("0008150")], parsed.header.root_terms);
    Ok(())
}

#[test]
fn test_terms_round_trip() -> Result<(), Box<dyn Error>> {
    let document = document();
    let parsed = round_trip(&document)?;
    assert_eq!(document.terms.len(), parsed.terms.len());
    for expected in &document.terms {
        let actual = parsed
            .term(expected.reference())
            .ok_or_else(|| format!("{} is missing", expected.reference()))?;
        assert_eq!(expected.name(), actual.name());
        assert_eq!(expected.namespace(), actual.namespace());
        assert_eq!(expected.definition(), actual.definition());
        assert_eq!(
            expected.definition_provenance(),
            actual.definition_provenance()
        );
        assert_eq!(expected.is_obsolete(), actual.is_obsolete());
        assert_eq!(set(expected.parents()), set(actual.parents()));
        assert_eq!(set(expected.xrefs()), set(actual.xrefs()));
        assert_eq!(set(expected.alt_ids()), set(actual.alt_ids()));
        assert_eq!(
            expected.get_relationships(part_of()),
            actual.get_relationships(part_of())
        );
        let synonyms = |term: &Term| {
            term.synonyms()
                .iter()
                .map(|synonym| (synonym.name().to_owned(), synonym.specificity()))
                .collect::<BTreeSet<_>>()
        };
        assert_eq!(synonyms(expected), synonyms(actual));
    }
    Ok(())
}

#[test]
fn test_obsolete_pointers_round_trip() -> Result<(), Box<dyn Error>> {
    let parsed = round_trip(&document())?;
    let obsolete = parsed.term(&go("0000001")).ok_or("missing term")?;
    assert!(obsolete.is_obsolete());
    assert_eq!(
        &[Value::from(go("0050069"))],
        obsolete.get_property_values(Reference::new_unchecked("iao", "0100001"))
    );
    assert_eq!(
        &[Value::from(go("0016491"))],
        obsolete.get_property_values(Reference::new_unchecked("oboinowl", "consider"))
    );
    Ok(())
}

#[test]
fn test_typedef_flags_round_trip() -> Result<(), Box<dyn Error>> {
    let parsed = round_trip(&document())?;
    let typedef = parsed.typedef(&part_of()).ok_or("missing typedef")?;
    assert_eq!(Some("part of"), typedef.name());
    assert_eq!(Some(true), typedef.flag(Flag::Transitive));
    assert_eq!(Some(false), typedef.flag(Flag::MetadataTag));
    assert_eq!(None, typedef.flag(Flag::Symmetric));
    assert_eq!(
        &[Reference::new_unchecked("bfo", "0000050")],
        typedef.xrefs()
    );
    Ok(())
}

#[test]
fn test_serialization_is_stable() -> Result<(), Box<dyn Error>> {
    let registry = MemoryRegistry::obo_defaults();
    let first = OboSerializer::new()
        .with_registry(&registry)
        .serialize_document(&document(), Vec::new())?;
    let second = OboSerializer::new()
        .with_registry(&registry)
        .serialize_document(&round_trip(&document())?, Vec::new())?;
    assert_eq!(String::from_utf8(first)?, String::from_utf8(second)?);
    Ok(())
}
