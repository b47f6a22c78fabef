//! Provides ready to use [`ReferenceRef`]s for the vocabularies OBO documents are built on.
//!
//! Prefixes are in their registry-normalized form.

pub mod obo {
    //! The OBO PURL namespace used by ontology-scoped default references.

    pub const PREFIX: &str = "obo";
}

pub mod rdf {
    use crate::reference::ReferenceRef;

    pub const TYPE: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdf", "type");
}

pub mod rdfs {
    use crate::reference::ReferenceRef;

    pub const LABEL: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdfs", "label");
    pub const COMMENT: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdfs", "comment");
    pub const SEE_ALSO: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdfs", "seeAlso");
    pub const SUB_CLASS_OF: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdfs", "subClassOf");
    pub const SUB_PROPERTY_OF: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("rdfs", "subPropertyOf");
    pub const DOMAIN: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdfs", "domain");
    pub const RANGE: ReferenceRef<'_> = ReferenceRef::new_unchecked("rdfs", "range");
}

pub mod owl {
    use crate::reference::ReferenceRef;

    pub const EQUIVALENT_CLASS: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("owl", "equivalentClass");
    pub const DISJOINT_WITH: ReferenceRef<'_> = ReferenceRef::new_unchecked("owl", "disjointWith");
    pub const DEPRECATED: ReferenceRef<'_> = ReferenceRef::new_unchecked("owl", "deprecated");
    pub const INVERSE_OF: ReferenceRef<'_> = ReferenceRef::new_unchecked("owl", "inverseOf");
    pub const THING: ReferenceRef<'_> = ReferenceRef::new_unchecked("owl", "Thing");
    pub const VERSION_INFO: ReferenceRef<'_> = ReferenceRef::new_unchecked("owl", "versionInfo");
}

pub mod xsd {
    use crate::reference::ReferenceRef;

    pub const STRING: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "string");
    pub const BOOLEAN: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "boolean");
    pub const INTEGER: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "integer");
    pub const FLOAT: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "float");
    pub const DECIMAL: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "decimal");
    pub const DATE_TIME: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "dateTime");
    pub const ANY_URI: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "anyURI");
    pub const G_YEAR: ReferenceRef<'_> = ReferenceRef::new_unchecked("xsd", "gYear");
}

pub mod skos {
    use crate::reference::ReferenceRef;

    pub const EXACT_MATCH: ReferenceRef<'_> = ReferenceRef::new_unchecked("skos", "exactMatch");
    pub const CLOSE_MATCH: ReferenceRef<'_> = ReferenceRef::new_unchecked("skos", "closeMatch");
    pub const BROAD_MATCH: ReferenceRef<'_> = ReferenceRef::new_unchecked("skos", "broadMatch");
    pub const NARROW_MATCH: ReferenceRef<'_> = ReferenceRef::new_unchecked("skos", "narrowMatch");
    pub const RELATED_MATCH: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("skos", "relatedMatch");
}

pub mod oboinowl {
    use crate::reference::ReferenceRef;

    pub const HAS_DBXREF: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "hasDbXref");
    pub const HAS_OBO_NAMESPACE: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "hasOBONamespace");
    pub const IN_SUBSET: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "inSubset");
    pub const HAS_EXACT_SYNONYM: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "hasExactSynonym");
    pub const HAS_BROAD_SYNONYM: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "hasBroadSynonym");
    pub const HAS_NARROW_SYNONYM: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "hasNarrowSynonym");
    pub const HAS_RELATED_SYNONYM: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "hasRelatedSynonym");
    pub const HAS_SYNONYM_TYPE: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "hasSynonymType");
    pub const HAS_SCOPE: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "hasScope");
    pub const CONSIDER: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "consider");
    pub const CREATED_BY: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "created_by");
    pub const CREATION_DATE: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "creation_date");
    pub const IS_ANONYMOUS: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "is_anonymous");
    pub const BUILTIN: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "builtin");
    pub const IS_CLASS_LEVEL: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "is_class_level");
    pub const IS_CYCLIC: ReferenceRef<'_> = ReferenceRef::new_unchecked("oboinowl", "is_cyclic");
    pub const IS_METADATA_TAG: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "is_metadata_tag");
    pub const SUBSET_PROPERTY: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "SubsetProperty");
    pub const SYNONYM_TYPE_PROPERTY: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "SynonymTypeProperty");
    pub const AUTO_GENERATED_BY: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("oboinowl", "auto-generated-by");
}

pub mod iao {
    use crate::reference::ReferenceRef;

    pub const DEFINITION: ReferenceRef<'_> = ReferenceRef::new_unchecked("iao", "0000115");
    pub const TERM_REPLACED_BY: ReferenceRef<'_> = ReferenceRef::new_unchecked("iao", "0100001");
    pub const HAS_ONTOLOGY_ROOT_TERM: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("iao", "0000700");
}

pub mod dcterms {
    use crate::reference::ReferenceRef;

    pub const CONTRIBUTOR: ReferenceRef<'_> = ReferenceRef::new_unchecked("dcterms", "contributor");
    pub const TITLE: ReferenceRef<'_> = ReferenceRef::new_unchecked("dcterms", "title");
}

pub mod sssom {
    use crate::reference::ReferenceRef;

    pub const MAPPING_JUSTIFICATION: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("sssom", "mapping_justification");
    pub const CONFIDENCE: ReferenceRef<'_> = ReferenceRef::new_unchecked("sssom", "confidence");
}

pub mod semapv {
    use crate::reference::ReferenceRef;

    pub const UNSPECIFIED_MATCHING: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("semapv", "UnspecifiedMatching");
    pub const MANUAL_MAPPING_CURATION: ReferenceRef<'_> =
        ReferenceRef::new_unchecked("semapv", "ManualMappingCuration");
}

/// Predicates whose reference-valued edges are reported as mappings, in reporting order.
pub const MATCHING_PREDICATES: [crate::reference::ReferenceRef<'static>; 8] = [
    skos::EXACT_MATCH,
    skos::CLOSE_MATCH,
    skos::BROAD_MATCH,
    skos::NARROW_MATCH,
    skos::RELATED_MATCH,
    owl::EQUIVALENT_CLASS,
    oboinowl::HAS_DBXREF,
    rdfs::SEE_ALSO,
];

/// Xref prefixes that denote a citation or a database of record rather than an equivalent entity.
pub const PROVENANCE_PREFIXES: [&str; 14] = [
    "pubmed",
    "pmc",
    "doi",
    "biorxiv",
    "chemrxiv",
    "wikipedia",
    "google.patent",
    "agricola",
    "cba",
    "ppr",
    "citexplore",
    "goc",
    "isbn",
    "issn",
];
