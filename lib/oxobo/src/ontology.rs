use crate::reader::MacroConfig;
use crate::reference::{Annotation, Reference, Value};
use crate::stanza::{SynonymTypeDef, Term, TypeDef};
use crate::vocab::rdfs;
use std::collections::BTreeMap;
use time::PrimitiveDateTime;
use time::macros::format_description;

/// The format of the `date` header directive, e.g. `17:05:2024 10:30`.
const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[day]:[month]:[year] [hour]:[minute]");

/// The OBO header directives of an ontology.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct OboHeader {
    /// The normalized ontology prefix, e.g. `go`.
    pub ontology: String,
    pub format_version: Option<String>,
    pub name: Option<String>,
    pub data_version: Option<String>,
    pub date: Option<PrimitiveDateTime>,
    pub auto_generated_by: Option<String>,
    pub default_namespace: Option<String>,
    pub imports: Vec<String>,
    /// Subset references, named with their description.
    pub subsetdefs: Vec<Reference>,
    pub synonym_typedefs: Vec<SynonymTypeDef>,
    /// Prefix to URI prefix.
    pub idspaces: BTreeMap<String, String>,
    pub root_terms: Vec<Reference>,
    /// Ontology-level `property_value`s and `remark`s (as `rdfs:comment`).
    pub properties: Vec<Annotation>,
    pub macros: MacroConfig,
}

impl OboHeader {
    pub fn new(ontology: impl Into<String>) -> Self {
        Self {
            ontology: ontology.into(),
            ..Self::default()
        }
    }

    /// The `remark`s.
    pub fn remarks(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().filter_map(|annotation| {
            if *annotation.predicate() != rdfs::COMMENT {
                return None;
            }
            match annotation.value() {
                Value::Literal(literal) => Some(literal.value()),
                Value::Reference(_) => None,
            }
        })
    }

    /// The `date` in the OBO `dd:MM:yyyy HH:mm` format.
    pub fn date_formatted(&self) -> Option<String> {
        self.date?.format(DATE_FORMAT).ok()
    }

    /// Finds a declared synonym type.
    pub fn synonym_typedef(&self, reference: &Reference) -> Option<&SynonymTypeDef> {
        self.synonym_typedefs
            .iter()
            .find(|typedef| typedef.reference() == reference)
    }
}

/// Parses a `date` header value.
pub(crate) fn parse_date(value: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(value.trim(), DATE_FORMAT)
}

/// A whole ontology: its header, its typedefs and its terms.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct OboDocument {
    pub header: OboHeader,
    pub typedefs: Vec<TypeDef>,
    pub terms: Vec<Term>,
}

impl OboDocument {
    pub fn new(header: OboHeader) -> Self {
        Self {
            header,
            typedefs: Vec::new(),
            terms: Vec::new(),
        }
    }

    #[inline]
    pub fn ontology(&self) -> &str {
        &self.header.ontology
    }

    pub fn typedef(&self, reference: &Reference) -> Option<&TypeDef> {
        self.typedefs
            .iter()
            .find(|typedef| typedef.reference() == reference)
    }

    pub fn term(&self, reference: &Reference) -> Option<&Term> {
        self.terms.iter().find(|term| term.reference() == reference)
    }
}
