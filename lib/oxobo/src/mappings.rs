//! Mapping rows extracted from stanzas and their SSSOM-style TSV serialization.

use crate::ontology::OboDocument;
use crate::reference::Reference;
use crate::registry::Registry;
use crate::stanza::{Mapping, Stanza};
use crate::vocab::semapv;
use serde::Serialize;
use std::io::{self, Write};

const COLUMNS: [&str; 6] = [
    "subject_id",
    "predicate_id",
    "object_id",
    "mapping_justification",
    "confidence",
    "author_id",
];

/// One mapping from a stanza to another entity.
#[derive(PartialEq, Debug, Clone)]
pub struct MappingRow {
    pub subject: Reference,
    pub predicate: Reference,
    pub object: Reference,
    pub justification: Reference,
    pub confidence: Option<f64>,
    pub contributor: Option<Reference>,
}

impl MappingRow {
    /// The mappings of a stanza, see [`Stanza::get_mappings`].
    pub fn from_stanza(stanza: &Stanza) -> impl Iterator<Item = Self> + '_ {
        stanza
            .get_mappings(true)
            .into_iter()
            .map(move |mapping| Self::new(stanza.reference().clone(), mapping))
    }

    fn new(subject: Reference, mapping: Mapping) -> Self {
        let Mapping {
            predicate,
            object,
            context,
        } = mapping;
        let (justification, confidence, contributor) = match context {
            Some(context) => (context.justification, context.confidence, context.contributor),
            None => (semapv::UNSPECIFIED_MATCHING.into_owned(), None, None),
        };
        Self {
            subject,
            predicate,
            object,
            justification,
            confidence,
            contributor,
        }
    }
}

/// The mappings of every typedef and term of a document.
pub fn document_mappings(document: &OboDocument) -> impl Iterator<Item = MappingRow> + '_ {
    document
        .typedefs
        .iter()
        .map(|typedef| typedef.stanza())
        .chain(document.terms.iter().map(|term| term.stanza()))
        .flat_map(MappingRow::from_stanza)
}

#[derive(Serialize)]
struct TsvRow {
    subject_id: String,
    predicate_id: String,
    object_id: String,
    mapping_justification: String,
    confidence: Option<f64>,
    author_id: Option<String>,
}

/// Writes mapping rows as a tab separated table with a header line.
///
/// CURIEs use the registry preferred prefixes if a registry is given.
///
/// ```
/// use oxobo::{MappingRow, Reference, Stanza, write_mappings_tsv};
///
/// let mut stanza = Stanza::new(Reference::new_unchecked("go", "0050069"));
/// stanza.append_xref(Reference::new_unchecked("ec", "1.4.1.15"));
/// let output = write_mappings_tsv(MappingRow::from_stanza(&stanza), None, Vec::new())?;
/// assert_eq!(
///     "subject_id\tpredicate_id\tobject_id\tmapping_justification\tconfidence\tauthor_id\ngo:0050069\toboinowl:hasDbXref\tec:1.4.1.15\tsemapv:UnspecifiedMatching\t\t\n",
///     String::from_utf8(output)?
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn write_mappings_tsv<W: Write>(
    rows: impl IntoIterator<Item = MappingRow>,
    registry: Option<&(dyn Registry + Sync)>,
    write: W,
) -> io::Result<W> {
    let curie = |reference: &Reference| match registry {
        Some(registry) => reference.preferred_curie(registry),
        None => reference.curie(),
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(write);
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.serialize(TsvRow {
            subject_id: curie(&row.subject),
            predicate_id: curie(&row.predicate),
            object_id: curie(&row.object),
            mapping_justification: curie(&row.justification),
            confidence: row.confidence,
            author_id: row.contributor.as_ref().map(curie),
        })?;
    }
    writer.into_inner().map_err(|e| e.into_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Annotation, Literal};
    use crate::registry::MemoryRegistry;
    use crate::stanza::Term;
    use crate::vocab::{dcterms, skos, sssom};

    #[test]
    fn rows_carry_context() {
        let mut term = Term::new(Reference::new_unchecked("go", "0050069"));
        term.append_property_annotated(
            skos::EXACT_MATCH.into(),
            Reference::new_unchecked("chebi", "1"),
            [
                Annotation::new(
                    sssom::MAPPING_JUSTIFICATION,
                    semapv::MANUAL_MAPPING_CURATION,
                ),
                Annotation::new(sssom::CONFIDENCE, Literal::from(0.5)),
                Annotation::new(dcterms::CONTRIBUTOR, Reference::new_unchecked("orcid", "1")),
            ],
        );
        let mut document = OboDocument::default();
        document.terms.push(term);
        let rows = document_mappings(&document).collect::<Vec<_>>();
        assert_eq!(1, rows.len());
        assert_eq!(semapv::MANUAL_MAPPING_CURATION, rows[0].justification);

        let registry = MemoryRegistry::obo_defaults();
        let output = write_mappings_tsv(rows, Some(&registry), Vec::new()).unwrap();
        assert_eq!(
            "GO:0050069\tskos:exactMatch\tCHEBI:1\tsemapv:ManualMappingCuration\t0.5\torcid:1\n",
            String::from_utf8(output).unwrap().lines().nth(1).unwrap().to_owned() + "\n"
        );
    }
}
