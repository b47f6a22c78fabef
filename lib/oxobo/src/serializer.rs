//! The OBO flat file serializer.

use crate::ontology::{OboDocument, OboHeader};
use crate::reference::{Annotation, Reference, Value};
use crate::registry::Registry;
use crate::stanza::{IntersectionOf, Stanza, Synonym, Term, TermKind, TypeDef};
use crate::vocab::{dcterms, iao, oboinowl, owl, rdfs};
use rustc_hash::FxHashSet;
use std::io::{self, Write};

const FORMAT_VERSION: &str = "1.4";

/// A [OBO flat file format](https://owlcollab.github.io/oboformat/doc/obo-syntax.html) serializer.
///
/// Tags are written in a fixed order and the values of a tag are sorted,
/// so the output only depends on the content of the stanzas.
///
/// ```
/// use oxobo::{OboHeader, OboSerializer, Reference, Term};
///
/// let mut term = Term::new(Reference::new_unchecked("go", "0050069"));
/// term.set_name("lysine dehydrogenase activity")
///     .append_parent(Reference::new_unchecked("go", "0016491"));
///
/// let mut writer = OboSerializer::new().serialize_to_write(Vec::new());
/// writer.write_header(&OboHeader::new("go"))?;
/// writer.write_term(&term)?;
/// assert_eq!(
///     b"format-version: 1.4\nontology: go\n\n[Term]\nid: go:0050069\nname: lysine dehydrogenase activity\nis_a: go:0016491\n",
///     writer.finish()?.as_slice()
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct OboSerializer<'a> {
    registry: Option<&'a (dyn Registry + Sync)>,
    name_comments: bool,
}

impl<'a> OboSerializer<'a> {
    /// Builds a new [`OboSerializer`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes CURIEs with the registry preferred prefixes, e.g. `GO:0050069` instead of `go:0050069`.
    #[inline]
    pub fn with_registry(mut self, registry: &'a (dyn Registry + Sync)) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds `! name` trailers after the references that have a name.
    #[inline]
    pub fn with_name_comments(mut self, name_comments: bool) -> Self {
        self.name_comments = name_comments;
        self
    }

    /// Writes an OBO file to a [`Write`] implementation.
    pub fn serialize_to_write<W: Write>(self, write: W) -> ToWriteOboWriter<'a, W> {
        ToWriteOboWriter {
            write,
            formatter: OboFormatter {
                registry: self.registry,
                name_comments: self.name_comments,
                ontology: String::new(),
                typedefs: FxHashSet::default(),
                warned: FxHashSet::default(),
            },
        }
    }

    /// Writes a whole document: the header, the typedefs and then the terms.
    pub fn serialize_document<W: Write>(self, document: &OboDocument, write: W) -> io::Result<W> {
        let mut writer = self.serialize_to_write(write);
        writer.write_header(&document.header)?;
        for typedef in &document.typedefs {
            writer.declare_typedef(typedef.reference());
        }
        for typedef in &document.typedefs {
            writer.write_typedef(typedef)?;
        }
        for term in &document.terms {
            writer.write_term(term)?;
        }
        writer.finish()
    }
}

/// Writes an OBO file to a [`Write`] implementation.
///
/// Can be built using [`OboSerializer::serialize_to_write`].
#[must_use]
pub struct ToWriteOboWriter<'a, W: Write> {
    write: W,
    formatter: OboFormatter<'a>,
}

impl<W: Write> ToWriteOboWriter<'_, W> {
    /// Writes the header. It must be called before writing any stanza.
    pub fn write_header(&mut self, header: &OboHeader) -> io::Result<()> {
        self.formatter.ontology.clone_from(&header.ontology);
        let mut output = String::new();
        self.formatter.header(header, &mut output);
        self.write.write_all(output.as_bytes())
    }

    /// Marks a relation as declared so that its use does not trigger a missing typedef warning.
    ///
    /// Written typedefs are declared automatically.
    pub fn declare_typedef(&mut self, reference: &Reference) {
        self.formatter.typedefs.insert(reference.clone());
    }

    pub fn write_typedef(&mut self, typedef: &TypeDef) -> io::Result<()> {
        self.declare_typedef(typedef.reference());
        let mut output = String::new();
        self.formatter.stanza("Typedef", typedef, Some(typedef), &mut output);
        self.write.write_all(output.as_bytes())
    }

    pub fn write_term(&mut self, term: &Term) -> io::Result<()> {
        let header = match term.kind() {
            TermKind::Class => "Term",
            TermKind::Instance => "Instance",
        };
        let mut output = String::new();
        self.formatter.stanza(header, term, None, &mut output);
        self.write.write_all(output.as_bytes())
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.write.flush()?;
        Ok(self.write)
    }
}

struct OboFormatter<'a> {
    registry: Option<&'a (dyn Registry + Sync)>,
    name_comments: bool,
    ontology: String,
    typedefs: FxHashSet<Reference>,
    warned: FxHashSet<Reference>,
}

impl OboFormatter<'_> {
    fn header(&self, header: &OboHeader, output: &mut String) {
        let format_version = header.format_version.as_deref().unwrap_or(FORMAT_VERSION);
        line(output, "format-version", format_version);
        if let Some(data_version) = &header.data_version {
            line(output, "data-version", data_version);
        }
        if let Some(date) = header.date_formatted() {
            line(output, "date", &date);
        }
        if let Some(auto_generated_by) = &header.auto_generated_by {
            line(output, "auto-generated-by", auto_generated_by);
        }
        for import in &header.imports {
            line(output, "import", import);
        }
        for subset in &header.subsetdefs {
            let description = escape_quoted(subset.name().unwrap_or_default());
            line(
                output,
                "subsetdef",
                &format!("{} \"{description}\"", self.reference(subset)),
            );
        }
        for synonym_typedef in &header.synonym_typedefs {
            let reference = synonym_typedef.reference();
            let mut value = format!(
                "{} \"{}\"",
                self.reference(reference),
                escape_quoted(reference.name().unwrap_or_default())
            );
            if let Some(specificity) = synonym_typedef.specificity() {
                value.push(' ');
                value.push_str(specificity.as_str());
            }
            line(output, "synonymtypedef", &value);
        }
        if let Some(default_namespace) = &header.default_namespace {
            line(output, "default-namespace", default_namespace);
        }
        for (prefix, uri) in &header.idspaces {
            line(output, "idspace", &format!("{prefix} {uri}"));
        }
        let macros = &header.macros;
        for prefix in &macros.treat_xrefs_as_equivalent {
            line(output, "treat-xrefs-as-equivalent", &self.prefix(prefix));
        }
        for (prefix, (predicate, target)) in &macros.treat_xrefs_as_genus_differentia {
            let value = format!(
                "{} {} {}",
                self.prefix(prefix),
                self.reference(predicate),
                self.reference(target)
            );
            line(output, "treat-xrefs-as-genus-differentia", &value);
        }
        for (prefix, predicate) in &macros.treat_xrefs_as_relationship {
            let value = format!("{} {}", self.prefix(prefix), self.reference(predicate));
            line(output, "treat-xrefs-as-relationship", &value);
        }
        for prefix in &macros.treat_xrefs_as_is_a {
            line(output, "treat-xrefs-as-is_a", &self.prefix(prefix));
        }
        for remark in header.remarks() {
            line(output, "remark", &escape_unquoted(remark));
        }
        line(output, "ontology", &header.ontology);
        if let Some(name) = &header.name {
            let value = format!(
                "{} \"{}\" xsd:string",
                self.reference(&dcterms::TITLE.into()),
                escape_quoted(name)
            );
            line(output, "property_value", &value);
        }
        for root in &header.root_terms {
            let value = format!(
                "{} {}",
                self.reference(&iao::HAS_ONTOLOGY_ROOT_TERM.into()),
                self.reference(root)
            );
            line(output, "property_value", &value);
        }
        for annotation in &header.properties {
            if *annotation.predicate() == rdfs::COMMENT
                && matches!(annotation.value(), Value::Literal(_))
            {
                continue;
            }
            let value = format!(
                "{} {}",
                self.reference(annotation.predicate()),
                self.value(annotation.value())
            );
            line(output, "property_value", &value);
        }
    }

    fn stanza(
        &mut self,
        header: &str,
        stanza: &Stanza,
        typedef: Option<&TypeDef>,
        output: &mut String,
    ) {
        output.push_str("\n[");
        output.push_str(header);
        output.push_str("]\n");
        line(output, "id", &self.reference(stanza.reference()));
        if let Some(name) = stanza.name() {
            line(output, "name", &escape_unquoted(name));
        }
        if let Some(namespace) = stanza.namespace() {
            line(output, "namespace", &escape_unquoted(namespace));
        }
        for alt_id in sorted(stanza.alt_ids()) {
            line(output, "alt_id", &self.named_reference(alt_id));
        }
        for (flag, value) in stanza.flags() {
            line(output, flag.tag(), if value { "true" } else { "false" });
        }
        if stanza.definition().is_some() || !stanza.definition_provenance().is_empty() {
            let value = format!(
                "\"{}\" [{}]",
                escape_quoted(stanza.definition().unwrap_or_default()),
                self.provenance(stanza.definition_provenance())
            );
            line(output, "def", &value);
        }
        for comment in literals(stanza, rdfs::COMMENT.into()) {
            line(output, "comment", &escape_unquoted(comment));
        }
        for subset in sorted(stanza.subsets()) {
            line(output, "subset", &self.named_reference(subset));
        }
        let mut synonyms = stanza.synonyms().iter().collect::<Vec<_>>();
        synonyms.sort_by(|a, b| {
            (a.name(), a.specificity(), a.synonym_type())
                .cmp(&(b.name(), b.specificity(), b.synonym_type()))
        });
        for synonym in synonyms {
            line(output, "synonym", &self.synonym(synonym));
        }
        let has_dbxref = oboinowl::HAS_DBXREF.into();
        let mut xrefs = stanza
            .xrefs()
            .iter()
            .chain(stanza.provenance())
            .collect::<Vec<_>>();
        xrefs.sort();
        xrefs.dedup();
        for xref in xrefs {
            let value = self.edge(stanza, &has_dbxref, xref);
            line(output, "xref", &value);
        }
        if let Some(typedef) = typedef {
            self.typedef(typedef, output);
        }
        let parent_tag = match stanza_kind(header) {
            TermKind::Class => "is_a",
            TermKind::Instance => "instance_of",
        };
        let sub_class_of = rdfs::SUB_CLASS_OF.into();
        for parent in sorted(stanza.parents()) {
            let value = self.edge(stanza, &sub_class_of, parent);
            line(output, parent_tag, &value);
        }
        for element in stanza.intersection_of() {
            let value = match element {
                IntersectionOf::Class(genus) => self.named_reference(genus),
                IntersectionOf::Restriction { predicate, target } => format!(
                    "{} {}",
                    self.reference(predicate),
                    self.named_reference(target)
                ),
            };
            line(output, "intersection_of", &value);
        }
        for reference in stanza.union_of() {
            line(output, "union_of", &self.named_reference(reference));
        }
        let equivalent_class = owl::EQUIVALENT_CLASS.into();
        for reference in sorted(stanza.equivalent_to()) {
            let value = self.edge(stanza, &equivalent_class, reference);
            line(output, "equivalent_to", &value);
        }
        for reference in sorted(stanza.disjoint_from()) {
            line(output, "disjoint_from", &self.named_reference(reference));
        }
        let mut relationships = stanza.relationships().collect::<Vec<_>>();
        relationships.sort();
        for (predicate, target) in relationships {
            self.check_typedef(predicate);
            let mut value = format!("{} {}", self.reference(predicate), self.reference(target));
            value.push_str(&self.modifiers(stanza.axioms(predicate, &target.clone().into())));
            if self.name_comments {
                if let (Some(predicate_name), Some(target_name)) = (predicate.name(), target.name())
                {
                    value.push_str(" ! ");
                    value.push_str(predicate_name);
                    value.push(' ');
                    value.push_str(target_name);
                }
            }
            line(output, "relationship", &value);
        }
        let mut properties = stanza
            .properties()
            .filter(|(predicate, value)| !has_dedicated_tag(predicate, value))
            .collect::<Vec<_>>();
        properties.sort();
        for (predicate, value) in properties {
            let mut line_value = format!("{} {}", self.reference(predicate), self.value(value));
            line_value.push_str(&self.modifiers(stanza.axioms(predicate, value)));
            line(output, "property_value", &line_value);
        }
        for creator in literals(stanza, oboinowl::CREATED_BY.into()) {
            line(output, "created_by", &escape_unquoted(creator));
        }
        for date in literals(stanza, oboinowl::CREATION_DATE.into()) {
            line(output, "creation_date", date);
        }
        for reference in references(stanza, iao::TERM_REPLACED_BY.into()) {
            line(output, "replaced_by", &self.named_reference(reference));
        }
        for reference in references(stanza, oboinowl::CONSIDER.into()) {
            line(output, "consider", &self.named_reference(reference));
        }
    }

    fn typedef(&self, typedef: &TypeDef, output: &mut String) {
        if let Some(domain) = typedef.domain() {
            line(output, "domain", &self.named_reference(domain));
        }
        if let Some(range) = typedef.range() {
            line(output, "range", &self.named_reference(range));
        }
        if let Some(inverse) = typedef.inverse() {
            line(output, "inverse_of", &self.named_reference(inverse));
        }
        for reference in typedef.transitive_over() {
            line(output, "transitive_over", &self.named_reference(reference));
        }
        for chain in typedef.holds_over_chain() {
            line(output, "holds_over_chain", &self.chain(chain));
        }
        for chain in typedef.equivalent_to_chain() {
            line(output, "equivalent_to_chain", &self.chain(chain));
        }
        for reference in typedef.disjoint_over() {
            line(output, "disjoint_over", &self.named_reference(reference));
        }
    }

    /// A reference with its trailing modifiers and, if enabled, its name.
    fn edge(&self, stanza: &Stanza, predicate: &Reference, target: &Reference) -> String {
        let mut value = self.reference(target);
        value.push_str(&self.modifiers(stanza.axioms(predicate, &target.clone().into())));
        if self.name_comments {
            if let Some(name) = target.name() {
                value.push_str(" ! ");
                value.push_str(name);
            }
        }
        value
    }

    fn synonym(&self, synonym: &Synonym) -> String {
        let mut value = format!("\"{}\"", escape_quoted(synonym.name()));
        if let Some(specificity) = synonym.specificity() {
            value.push(' ');
            value.push_str(specificity.as_str());
        }
        if let Some(synonym_type) = synonym.synonym_type() {
            value.push(' ');
            value.push_str(&self.reference(synonym_type));
        }
        value.push_str(" [");
        value.push_str(&self.provenance(synonym.provenance()));
        value.push(']');
        value.push_str(&self.modifiers(synonym.annotations()));
        value
    }

    fn chain(&self, chain: &[Reference]) -> String {
        chain
            .iter()
            .map(|reference| self.reference(reference))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn provenance(&self, provenance: &[Value]) -> String {
        provenance
            .iter()
            .map(|value| match value {
                Value::Reference(reference) => self.reference(reference),
                Value::Literal(literal) => format!("\"{}\"", escape_quoted(literal.value())),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// A ` {key=value, ...}` block sorted by key, or nothing.
    fn modifiers(&self, annotations: &[Annotation]) -> String {
        if annotations.is_empty() {
            return String::new();
        }
        let mut pairs = annotations
            .iter()
            .map(|annotation| {
                let value = match annotation.value() {
                    Value::Reference(reference) => self.reference(reference),
                    Value::Literal(literal) => format!("\"{}\"", escape_quoted(literal.value())),
                };
                (self.reference(annotation.predicate()), value)
            })
            .collect::<Vec<_>>();
        pairs.sort();
        let inner = pairs
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" {{{inner}}}")
    }

    fn value(&self, value: &Value) -> String {
        match value {
            Value::Reference(reference) => self.reference(reference),
            Value::Literal(literal) => format!(
                "\"{}\" {}",
                escape_quoted(literal.value()),
                self.reference(literal.datatype())
            ),
        }
    }

    /// Writes a reference, dropping the ontology scope of default references.
    fn reference(&self, reference: &Reference) -> String {
        if let Some(local) = reference.default_local(&self.ontology) {
            return local.to_owned();
        }
        match self.registry {
            Some(registry) => reference.preferred_curie(registry),
            None => reference.curie(),
        }
    }

    fn named_reference(&self, reference: &Reference) -> String {
        let mut value = self.reference(reference);
        if self.name_comments {
            if let Some(name) = reference.name() {
                value.push_str(" ! ");
                value.push_str(name);
            }
        }
        value
    }

    fn prefix(&self, prefix: &str) -> String {
        self.registry
            .and_then(|registry| registry.preferred_prefix(prefix))
            .unwrap_or(prefix)
            .to_owned()
    }

    fn check_typedef(&mut self, predicate: &Reference) {
        if !self.typedefs.contains(predicate) && self.warned.insert(predicate.clone()) {
            tracing::warn!(ontology = %self.ontology, "has no typedef for {predicate}");
        }
    }
}

fn line(output: &mut String, tag: &str, value: &str) {
    output.push_str(tag);
    output.push_str(": ");
    output.push_str(value);
    output.push('\n');
}

fn stanza_kind(header: &str) -> TermKind {
    if header == "Instance" {
        TermKind::Instance
    } else {
        TermKind::Class
    }
}

fn sorted(references: &[Reference]) -> Vec<&Reference> {
    let mut references = references.iter().collect::<Vec<_>>();
    references.sort();
    references
}

fn literals(stanza: &Stanza, predicate: Reference) -> impl Iterator<Item = &str> {
    stanza
        .get_property_values(predicate)
        .iter()
        .filter_map(|value| value.as_literal().map(|literal| literal.value()))
}

fn references(stanza: &Stanza, predicate: Reference) -> Vec<&Reference> {
    let mut references = stanza
        .get_property_values(predicate)
        .iter()
        .filter_map(Value::as_reference)
        .collect::<Vec<_>>();
    references.sort();
    references
}

/// Properties written with their own tag instead of `property_value`.
fn has_dedicated_tag(predicate: &Reference, value: &Value) -> bool {
    match value {
        Value::Literal(_) => {
            *predicate == rdfs::COMMENT
                || *predicate == oboinowl::CREATED_BY
                || *predicate == oboinowl::CREATION_DATE
        }
        Value::Reference(_) => {
            *predicate == iao::TERM_REPLACED_BY || *predicate == oboinowl::CONSIDER
        }
    }
}

/// Escapes a value written between double quotes.
fn escape_quoted(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            c => output.push(c),
        }
    }
    output
}

/// Escapes a value written without quotes, so that it is not cut at a `!` comment.
fn escape_unquoted(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '!' => output.push_str("\\!"),
            '\n' => output.push_str("\\n"),
            c => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Literal;
    use crate::registry::MemoryRegistry;
    use crate::stanza::{Flag, Specificity};

    fn write(term: &Term) -> String {
        let registry = MemoryRegistry::obo_defaults();
        let mut writer = OboSerializer::new()
            .with_registry(&registry)
            .serialize_to_write(Vec::new());
        writer.write_header(&OboHeader::new("go")).unwrap();
        writer.write_term(term).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn tag_order() {
        let go = |id: &str| Reference::new_unchecked("go", id);
        let mut term = Term::new(go("0050069"));
        term.append_relationship(Reference::default_for("go", "part_of"), go("0000002"))
            .append_xref(Reference::new_unchecked("ec", "1.4.1.15"))
            .set_obsolete(true)
            .set_definition(
                "A \"quoted\" definition.",
                [Value::from(Reference::new_unchecked("pubmed", "1"))],
            )
            .append_synonym(Synonym::new("b").with_specificity(Specificity::Exact))
            .append_synonym(Synonym::new("a"))
            .append_parent(go("0000003"))
            .append_comment("see also! the rest")
            .append_replaced_by(go("0000004"))
            .annotate_boolean(go("0000005"), true);
        let output = write(&term);
        assert_eq!(
            "
[Term]
id: GO:0050069
is_obsolete: true
def: \"A \\\"quoted\\\" definition.\" [pubmed:1]
comment: see also\\! the rest
synonym: \"a\" []
synonym: \"b\" EXACT []
xref: EC:1.4.1.15
is_a: GO:0000003
relationship: part_of GO:0000002
property_value: GO:0000005 \"true\" xsd:boolean
replaced_by: GO:0000004
",
            output.split_once("ontology: go\n").unwrap().1
        );
    }

    #[test]
    fn modifiers_are_sorted() {
        let mut term = Term::new(Reference::new_unchecked("go", "0050069"));
        term.append_xref_annotated(
            Reference::new_unchecked("ec", "1"),
            [
                Annotation::new(rdfs::COMMENT, Literal::new_simple_literal("x")),
                Annotation::new(dcterms::CONTRIBUTOR, Reference::new_unchecked("orcid", "1")),
            ],
        );
        assert!(
            write(&term).contains("xref: EC:1 {dcterms:contributor=orcid:1, rdfs:comment=\"x\"}\n")
        );
    }

    #[test]
    fn flags() {
        let mut typedef = TypeDef::new(Reference::default_for("go", "part_of"));
        typedef
            .set_flag(Flag::Transitive, true)
            .set_flag(Flag::Builtin, false);
        let mut writer = OboSerializer::new().serialize_to_write(Vec::new());
        writer.write_header(&OboHeader::new("go")).unwrap();
        writer.write_typedef(&typedef).unwrap();
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(output.ends_with("[Typedef]\nid: part_of\nbuiltin: false\nis_transitive: true\n"));
    }

    #[test]
    fn header() {
        let mut header = OboHeader::new("go");
        header.name = Some("Gene Ontology".to_owned());
        header.data_version = Some("2024-01-17".to_owned());
        header.macros.treat_xrefs_as_is_a.insert("cl".to_owned());
        header
            .properties
            .push(Annotation::new(rdfs::COMMENT, Literal::new_simple_literal("hi")));
        let registry = MemoryRegistry::obo_defaults();
        let mut writer = OboSerializer::new()
            .with_registry(&registry)
            .serialize_to_write(Vec::new());
        writer.write_header(&header).unwrap();
        assert_eq!(
            "format-version: 1.4
data-version: 2024-01-17
treat-xrefs-as-is_a: CL
remark: hi
ontology: go
property_value: dcterms:title \"Gene Ontology\" xsd:string
",
            String::from_utf8(writer.finish().unwrap()).unwrap()
        );
    }
}
