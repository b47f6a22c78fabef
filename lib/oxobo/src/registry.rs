//! Prefix registry used to normalize CURIE prefixes and validate local identifiers.

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A read-only prefix registry.
///
/// The parser and the serializers never mutate it, so a single registry can be shared
/// between many concurrent parsing sessions.
pub trait Registry {
    /// Returns the canonical form of a prefix or one of its synonyms, or `None` if the prefix is unknown.
    fn normalize_prefix(&self, prefix: &str) -> Option<&str>;

    /// Returns the preferred display form of a normalized prefix (e.g. `GO` for `go`).
    fn preferred_prefix(&self, prefix: &str) -> Option<&str>;

    /// Returns the URI prefix used to expand the CURIEs of a normalized prefix.
    fn uri_prefix(&self, prefix: &str) -> Option<&str>;

    /// Splits an IRI into a normalized prefix and a local identifier.
    fn parse_iri(&self, iri: &str) -> Option<(String, String)>;

    /// Removes redundant decoration from an identifier (e.g. `GO:0050069` in the `go` namespace becomes `0050069`).
    fn standardize_identifier(&self, prefix: &str, identifier: &str) -> String;

    /// Checks the identifier against the prefix pattern, if any.
    fn is_valid_identifier(&self, prefix: &str, identifier: &str) -> bool;
}

/// A registry record for one prefix.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PrefixRecord {
    pub prefix: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub preferred_prefix: Option<String>,
    #[serde(default)]
    pub uri_prefix: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    /// Prefix embedded in the local identifiers, e.g. `GO` for `GO:0050069`.
    #[serde(default)]
    pub banana: Option<String>,
}

#[derive(Debug, Clone)]
struct CompiledRecord {
    record: PrefixRecord,
    pattern: Option<Regex>,
}

/// An in-memory [`Registry`].
///
/// ```
/// use oxobo::{MemoryRegistry, Registry};
///
/// let registry = MemoryRegistry::from_json(
///     r#"[{"prefix": "go", "preferred_prefix": "GO", "uri_prefix": "http://purl.obolibrary.org/obo/GO_", "pattern": "^\\d{7}$"}]"#,
/// )?;
/// assert_eq!(Some("go"), registry.normalize_prefix("GO"));
/// assert_eq!(Some("GO"), registry.preferred_prefix("go"));
/// assert!(registry.is_valid_identifier("go", "0050069"));
/// assert!(!registry.is_valid_identifier("go", "50069"));
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    records: Vec<CompiledRecord>,
    lookup: FxHashMap<String, usize>,
    uri_prefixes: Vec<(String, usize)>,
}

impl MemoryRegistry {
    /// Builds a registry from records, compiling their identifier patterns.
    pub fn new(records: impl IntoIterator<Item = PrefixRecord>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for record in records {
            registry.add(record)?;
        }
        Ok(registry)
    }

    /// Loads a registry from a JSON array of [`PrefixRecord`].
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::new(serde_json::from_str::<Vec<PrefixRecord>>(json)?)
    }

    /// A registry covering the vocabularies OBO documents routinely use.
    pub fn obo_defaults() -> Self {
        let mut registry = Self::default();
        for (prefix, preferred, uri_prefix, pattern, synonyms) in OBO_DEFAULTS {
            let record = PrefixRecord {
                prefix: (*prefix).to_owned(),
                synonyms: synonyms.iter().map(|s| (*s).to_owned()).collect(),
                preferred_prefix: Some((*preferred).to_owned()),
                uri_prefix: Some((*uri_prefix).to_owned()),
                pattern: pattern.map(ToOwned::to_owned),
                banana: pattern.is_some().then(|| (*preferred).to_owned()),
            };
            let pattern = pattern.and_then(|p| Regex::new(p).ok());
            registry.insert(CompiledRecord { record, pattern });
        }
        registry
    }

    /// Adds a record, replacing any previous record with the same prefix.
    pub fn add(&mut self, record: PrefixRecord) -> Result<(), RegistryError> {
        let pattern = record
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|source| RegistryError::Pattern {
                prefix: record.prefix.clone(),
                source,
            })?;
        self.insert(CompiledRecord { record, pattern });
        Ok(())
    }

    fn insert(&mut self, compiled: CompiledRecord) {
        let id = if let Some(id) = self.lookup.get(&compiled.record.prefix.to_lowercase()) {
            self.records[*id] = compiled;
            *id
        } else {
            self.records.push(compiled);
            self.records.len() - 1
        };
        let record = &self.records[id].record;
        for key in std::iter::once(&record.prefix)
            .chain(&record.synonyms)
            .chain(&record.preferred_prefix)
        {
            self.lookup.insert(key.to_lowercase(), id);
        }
        if let Some(uri_prefix) = &record.uri_prefix {
            self.uri_prefixes.retain(|(_, i)| *i != id);
            self.uri_prefixes.push((uri_prefix.clone(), id));
            // Longest URI prefix first so that nested namespaces win
            self.uri_prefixes
                .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        }
    }

    fn get(&self, prefix: &str) -> Option<&CompiledRecord> {
        self.lookup
            .get(&prefix.to_lowercase())
            .map(|id| &self.records[*id])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Registry for MemoryRegistry {
    fn normalize_prefix(&self, prefix: &str) -> Option<&str> {
        self.get(prefix).map(|r| r.record.prefix.as_str())
    }

    fn preferred_prefix(&self, prefix: &str) -> Option<&str> {
        let record = &self.get(prefix)?.record;
        Some(record.preferred_prefix.as_deref().unwrap_or(&record.prefix))
    }

    fn uri_prefix(&self, prefix: &str) -> Option<&str> {
        self.get(prefix)?.record.uri_prefix.as_deref()
    }

    fn parse_iri(&self, iri: &str) -> Option<(String, String)> {
        self.uri_prefixes.iter().find_map(|(uri_prefix, id)| {
            let local = iri.strip_prefix(uri_prefix.as_str())?;
            (!local.is_empty()).then(|| (self.records[*id].record.prefix.clone(), local.to_owned()))
        })
    }

    fn standardize_identifier(&self, prefix: &str, identifier: &str) -> String {
        let identifier = identifier.trim();
        if let Some(banana) = self.get(prefix).and_then(|r| r.record.banana.as_deref()) {
            if let Some(rest) = identifier
                .get(..banana.len() + 1)
                .filter(|start| start.eq_ignore_ascii_case(&format!("{banana}:")))
                .map(|start| &identifier[start.len()..])
            {
                return rest.to_owned();
            }
        }
        identifier.to_owned()
    }

    fn is_valid_identifier(&self, prefix: &str, identifier: &str) -> bool {
        if identifier.is_empty() || identifier.contains(char::is_whitespace) {
            return false;
        }
        match self.get(prefix).and_then(|r| r.pattern.as_ref()) {
            Some(pattern) => pattern.is_match(identifier),
            None => true,
        }
    }
}

/// An error raised while loading a [`MemoryRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid identifier pattern for prefix {prefix}: {source}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}

type DefaultRecord = (
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static [&'static str],
);

const OBO: &str = "http://purl.obolibrary.org/obo/";

const OBO_DEFAULTS: &[DefaultRecord] = &[
    ("obo", "obo", OBO, None, &[]),
    (
        "oboinowl",
        "oboInOwl",
        "http://www.geneontology.org/formats/oboInOwl#",
        None,
        &["obo_in_owl"],
    ),
    ("owl", "owl", "http://www.w3.org/2002/07/owl#", None, &[]),
    ("rdf", "rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#", None, &[]),
    ("rdfs", "rdfs", "http://www.w3.org/2000/01/rdf-schema#", None, &[]),
    ("xsd", "xsd", "http://www.w3.org/2001/XMLSchema#", None, &[]),
    ("skos", "skos", "http://www.w3.org/2004/02/skos/core#", None, &[]),
    ("dcterms", "dcterms", "http://purl.org/dc/terms/", None, &["dc"]),
    ("sssom", "sssom", "https://w3id.org/sssom/", None, &[]),
    ("semapv", "semapv", "https://w3id.org/semapv/vocab/", None, &[]),
    ("orcid", "orcid", "https://orcid.org/", None, &[]),
    ("pubmed", "pubmed", "https://www.ncbi.nlm.nih.gov/pubmed/", None, &["pmid"]),
    ("doi", "doi", "https://doi.org/", None, &[]),
    ("go", "GO", "http://purl.obolibrary.org/obo/GO_", Some(r"^\d{7}$"), &["gobp", "gomf", "gocc"]),
    ("chebi", "CHEBI", "http://purl.obolibrary.org/obo/CHEBI_", Some(r"^\d+$"), &[]),
    ("cl", "CL", "http://purl.obolibrary.org/obo/CL_", Some(r"^\d{7}$"), &[]),
    ("uberon", "UBERON", "http://purl.obolibrary.org/obo/UBERON_", Some(r"^\d+$"), &[]),
    ("bfo", "BFO", "http://purl.obolibrary.org/obo/BFO_", Some(r"^\d{7}$"), &[]),
    ("ro", "RO", "http://purl.obolibrary.org/obo/RO_", Some(r"^\d{7}$"), &[]),
    ("iao", "IAO", "http://purl.obolibrary.org/obo/IAO_", Some(r"^\d{7}$"), &[]),
    ("omo", "OMO", "http://purl.obolibrary.org/obo/OMO_", Some(r"^\d{7}$"), &[]),
    ("mondo", "MONDO", "http://purl.obolibrary.org/obo/MONDO_", Some(r"^\d{7}$"), &[]),
    ("doid", "DOID", "http://purl.obolibrary.org/obo/DOID_", Some(r"^\d+$"), &[]),
    ("hp", "HP", "http://purl.obolibrary.org/obo/HP_", Some(r"^\d{7}$"), &["hpo"]),
    ("ncbitaxon", "NCBITaxon", "http://purl.obolibrary.org/obo/NCBITaxon_", Some(r"^\d+$"), &["taxonomy"]),
    ("mesh", "MESH", "https://meshb.nlm.nih.gov/record/ui?ui=", None, &["msh"]),
    ("ncbigene", "NCBIGene", "https://www.ncbi.nlm.nih.gov/gene/", None, &["entrez"]),
    ("hgnc", "HGNC", "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/", None, &[]),
    ("pubchem.compound", "pubchem.compound", "https://pubchem.ncbi.nlm.nih.gov/compound/", None, &["pubchem"]),
    ("drugbank", "drugbank", "http://www.drugbank.ca/drugs/", None, &[]),
    ("efo", "EFO", "http://www.ebi.ac.uk/efo/EFO_", None, &[]),
    ("ec", "EC", "https://www.enzyme-database.org/query.php?ec=", None, &["ec-code", "eccode"]),
    ("wikipedia", "wikipedia", "http://en.wikipedia.org/wiki/", None, &[]),
    ("pmc", "PMC", "http://europepmc.org/articles/", Some(r"^PMC\d+$"), &["pmcid"]),
    ("isbn", "ISBN", "https://isbndb.com/book/", None, &[]),
    ("issn", "ISSN", "https://portal.issn.org/resource/ISSN/", None, &[]),
    ("goc", "GOC", "https://github.com/orgs/geneontology/people/", None, &[]),
    ("biorxiv", "biorxiv", "https://www.biorxiv.org/content/", None, &[]),
    ("uniprot", "UniProtKB", "http://purl.uniprot.org/uniprot/", None, &["uniprotkb"]),
    ("ensembl", "ensembl", "https://www.ensembl.org/id/", None, &[]),
    ("interpro", "InterPro", "http://www.ebi.ac.uk/interpro/entry/", None, &[]),
    ("pfam", "PFAM", "https://www.ebi.ac.uk/interpro/entry/pfam/", None, &[]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_synonyms_and_case() {
        let registry = MemoryRegistry::obo_defaults();
        assert_eq!(Some("go"), registry.normalize_prefix("GO"));
        assert_eq!(Some("go"), registry.normalize_prefix("gobp"));
        assert_eq!(Some("oboinowl"), registry.normalize_prefix("oboInOwl"));
        assert_eq!(Some("NCBITaxon"), registry.preferred_prefix("ncbitaxon"));
        assert_eq!(None, registry.normalize_prefix("nope"));
    }

    #[test]
    fn parses_iris() {
        let registry = MemoryRegistry::obo_defaults();
        assert_eq!(
            Some(("go".to_owned(), "0050069".to_owned())),
            registry.parse_iri("http://purl.obolibrary.org/obo/GO_0050069")
        );
        assert_eq!(
            Some(("obo".to_owned(), "xyz".to_owned())),
            registry.parse_iri("http://purl.obolibrary.org/obo/xyz")
        );
        assert_eq!(None, registry.parse_iri("http://example.com/1"));
    }

    #[test]
    fn standardizes_banana() {
        let registry = MemoryRegistry::obo_defaults();
        assert_eq!("0050069", registry.standardize_identifier("go", "GO:0050069"));
        assert_eq!("0050069", registry.standardize_identifier("go", "0050069"));
    }

    #[test]
    fn invalid_pattern() {
        assert!(matches!(
            MemoryRegistry::from_json(r#"[{"prefix": "x", "pattern": "("}]"#),
            Err(RegistryError::Pattern { .. })
        ));
    }
}
