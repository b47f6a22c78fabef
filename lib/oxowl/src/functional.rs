//! A serializer for the [OWL 2 functional-style syntax](https://www.w3.org/TR/owl2-syntax/).

use crate::axiom::{AnnotatedAxiom, Axiom};
use crate::document::Document;
use crate::expression::{ClassExpression, ObjectPropertyExpression};
use oxiri::{Iri, IriParseError};
use oxobo::vocab::xsd;
use oxobo::{Annotation, Literal, Reference, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::io::{self, Write};

static NO_PREFIXES: BTreeMap<String, String> = BTreeMap::new();

/// A serializer for the OWL 2 functional-style syntax.
///
/// References are written as CURIEs when their local part is a valid prefixed name and as full IRIs
/// when it is not and the prefix is declared.
///
/// ```
/// use oxobo::{Literal, Reference};
/// use oxowl::{Axiom, FunctionalSerializer};
///
/// let term = Reference::new_unchecked("GO", "0050069");
/// let mut writer = FunctionalSerializer::new()
///     .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_")?
///     .with_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#")?
///     .with_ontology_iri("http://purl.obolibrary.org/obo/go.owl")?
///     .serialize_to_write(Vec::new());
/// writer.write_axiom(&Axiom::subclass_of(term.clone(), Reference::new_unchecked("GO", "0016491")).into())?;
/// writer.write_axiom(
///     &Axiom::annotation_assertion(
///         Reference::new_unchecked("rdfs", "label"),
///         term,
///         Literal::new_simple_literal("lysine dehydrogenase activity"),
///     )
///     .into(),
/// )?;
/// assert_eq!(
///     "Prefix(GO:=<http://purl.obolibrary.org/obo/GO_>)\nPrefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)\n\nOntology(<http://purl.obolibrary.org/obo/go.owl>\nSubClassOf(GO:0050069 GO:0016491)\nAnnotationAssertion(rdfs:label GO:0050069 \"lysine dehydrogenase activity\")\n)\n",
///     String::from_utf8(writer.finish()?)?
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct FunctionalSerializer {
    prefixes: BTreeMap<String, String>,
    ontology_iri: Option<String>,
    version_iri: Option<String>,
    imports: Vec<String>,
}

impl FunctionalSerializer {
    /// Builds a new [`FunctionalSerializer`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_prefix(
        mut self,
        prefix_name: impl Into<String>,
        prefix_iri: impl Into<String>,
    ) -> Result<Self, IriParseError> {
        self.prefixes.insert(
            prefix_name.into(),
            Iri::parse(prefix_iri.into())?.into_inner(),
        );
        Ok(self)
    }

    #[inline]
    pub fn with_ontology_iri(mut self, iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.ontology_iri = Some(Iri::parse(iri.into())?.into_inner());
        Ok(self)
    }

    #[inline]
    pub fn with_version_iri(mut self, iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.version_iri = Some(Iri::parse(iri.into())?.into_inner());
        Ok(self)
    }

    #[inline]
    pub fn with_import(mut self, iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.imports.push(Iri::parse(iri.into())?.into_inner());
        Ok(self)
    }

    /// Writes to a [`Write`] implementation, one axiom at a time.
    ///
    /// The prefix block and the ontology header are written lazily on the first call.
    pub fn serialize_to_write<W: Write>(self, write: W) -> ToWriteFunctionalWriter<W> {
        ToWriteFunctionalWriter {
            write,
            serializer: self,
            state: WriterState::Start,
            buffer: String::new(),
        }
    }

    /// Writes a whole [`Document`], with its own IRIs and prefixes taking precedence over the serializer ones.
    pub fn serialize_document<W: Write>(mut self, document: &Document, write: W) -> io::Result<W> {
        for (prefix, uri) in document.prefixes() {
            self.prefixes.insert(prefix.to_owned(), uri.to_owned());
        }
        if !document.iri().is_empty() {
            self.ontology_iri = Some(document.iri().to_owned());
        }
        if let Some(version_iri) = document.version_iri() {
            self.version_iri = Some(version_iri.to_owned());
        }
        for import in document.imports() {
            if !self.imports.contains(import) {
                self.imports.push(import.clone());
            }
        }
        let mut writer = self.serialize_to_write(write);
        for annotation in document.annotations() {
            writer.write_annotation(annotation)?;
        }
        for axiom in document.axioms() {
            writer.write_axiom(axiom)?;
        }
        writer.finish()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Start,
    Annotations,
    Axioms,
}

/// Writes functional-syntax axioms to a [`Write`] implementation.
///
/// Can be built using [`FunctionalSerializer::serialize_to_write`].
#[must_use]
pub struct ToWriteFunctionalWriter<W: Write> {
    write: W,
    serializer: FunctionalSerializer,
    state: WriterState,
    buffer: String,
}

impl<W: Write> ToWriteFunctionalWriter<W> {
    /// Writes an ontology annotation. Must be called before the first axiom.
    pub fn write_annotation(&mut self, annotation: &Annotation) -> io::Result<()> {
        match self.state {
            WriterState::Start => self.write_header()?,
            WriterState::Annotations => (),
            WriterState::Axioms => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "ontology annotations must be written before the axioms",
                ));
            }
        }
        self.state = WriterState::Annotations;
        self.buffer.clear();
        Syntax::new(&self.serializer.prefixes)
            .annotation(&mut self.buffer, annotation)
            .map_err(io::Error::other)?;
        self.buffer.push('\n');
        self.write.write_all(self.buffer.as_bytes())
    }

    /// Writes an axiom on its own line.
    pub fn write_axiom(&mut self, axiom: &AnnotatedAxiom) -> io::Result<()> {
        match self.state {
            WriterState::Start => self.write_header()?,
            WriterState::Annotations => self.write.write_all(b"\n")?,
            WriterState::Axioms => (),
        }
        self.state = WriterState::Axioms;
        self.buffer.clear();
        Syntax::new(&self.serializer.prefixes)
            .annotated_axiom(&mut self.buffer, axiom)
            .map_err(io::Error::other)?;
        self.buffer.push('\n');
        self.write.write_all(self.buffer.as_bytes())
    }

    /// Closes the ontology block and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.state == WriterState::Start {
            self.write_header()?;
        }
        self.write.write_all(b")\n")?;
        Ok(self.write)
    }

    fn write_header(&mut self) -> io::Result<()> {
        let mut prefixes = self.serializer.prefixes.iter().collect::<Vec<_>>();
        prefixes.sort_by_cached_key(|(prefix, _)| (prefix.to_lowercase(), *prefix));
        for (prefix, uri) in &prefixes {
            writeln!(self.write, "Prefix({prefix}:=<{uri}>)")?;
        }
        if !prefixes.is_empty() {
            self.write.write_all(b"\n")?;
        }
        self.write.write_all(b"Ontology(")?;
        if let Some(iri) = &self.serializer.ontology_iri {
            write!(self.write, "<{iri}>")?;
            if let Some(version_iri) = &self.serializer.version_iri {
                write!(self.write, " <{version_iri}>")?;
            }
        }
        self.write.write_all(b"\n")?;
        for import in &self.serializer.imports {
            writeln!(self.write, "Import(<{import}>)")?;
        }
        Ok(())
    }

}

/// Renders the syntax elements. The prefix map is only used to decide between CURIEs and full IRIs.
struct Syntax<'a> {
    prefixes: &'a BTreeMap<String, String>,
}

impl<'a> Syntax<'a> {
    fn new(prefixes: &'a BTreeMap<String, String>) -> Self {
        Self { prefixes }
    }

    fn bare() -> Self {
        Self::new(&NO_PREFIXES)
    }

    fn reference(&self, out: &mut impl fmt::Write, reference: &Reference) -> fmt::Result {
        if !is_prefixed_name(reference.prefix(), reference.identifier()) {
            if let Some(uri) = self.prefixes.get(reference.prefix()) {
                return write!(out, "<{uri}{}>", reference.identifier());
            }
        }
        write!(out, "{}:{}", reference.prefix(), reference.identifier())
    }

    fn literal(&self, out: &mut impl fmt::Write, literal: &Literal) -> fmt::Result {
        out.write_char('"')?;
        for c in literal.value().chars() {
            match c {
                '"' => out.write_str("\\\"")?,
                '\\' => out.write_str("\\\\")?,
                c => out.write_char(c)?,
            }
        }
        out.write_char('"')?;
        if let Some(language) = literal.language() {
            write!(out, "@{language}")
        } else if *literal.datatype() == xsd::STRING {
            Ok(())
        } else {
            out.write_str("^^")?;
            self.reference(out, literal.datatype())
        }
    }

    fn value(&self, out: &mut impl fmt::Write, value: &Value) -> fmt::Result {
        match value {
            Value::Reference(reference) => self.reference(out, reference),
            Value::Literal(literal) => self.literal(out, literal),
        }
    }

    fn annotation(&self, out: &mut impl fmt::Write, annotation: &Annotation) -> fmt::Result {
        out.write_str("Annotation(")?;
        self.reference(out, annotation.predicate())?;
        out.write_char(' ')?;
        self.value(out, annotation.value())?;
        out.write_char(')')
    }

    fn property(
        &self,
        out: &mut impl fmt::Write,
        property: &ObjectPropertyExpression,
    ) -> fmt::Result {
        match property {
            ObjectPropertyExpression::ObjectProperty(property) => self.reference(out, property),
            ObjectPropertyExpression::ObjectInverseOf(property) => {
                out.write_str("ObjectInverseOf(")?;
                self.reference(out, property)?;
                out.write_char(')')
            }
        }
    }

    fn class(&self, out: &mut impl fmt::Write, class: &ClassExpression) -> fmt::Result {
        match class {
            ClassExpression::Class(class) => self.reference(out, class),
            ClassExpression::ObjectIntersectionOf(classes) => {
                self.list(out, "ObjectIntersectionOf", classes, Self::class)
            }
            ClassExpression::ObjectUnionOf(classes) => {
                self.list(out, "ObjectUnionOf", classes, Self::class)
            }
            ClassExpression::ObjectComplementOf(class) => {
                out.write_str("ObjectComplementOf(")?;
                self.class(out, class)?;
                out.write_char(')')
            }
            ClassExpression::ObjectOneOf(individuals) => {
                self.list(out, "ObjectOneOf", individuals, Self::reference)
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                out.write_str("ObjectSomeValuesFrom(")?;
                self.property(out, property)?;
                out.write_char(' ')?;
                self.class(out, filler)?;
                out.write_char(')')
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                out.write_str("ObjectAllValuesFrom(")?;
                self.property(out, property)?;
                out.write_char(' ')?;
                self.class(out, filler)?;
                out.write_char(')')
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => {
                out.write_str("ObjectHasValue(")?;
                self.property(out, property)?;
                out.write_char(' ')?;
                self.reference(out, individual)?;
                out.write_char(')')
            }
        }
    }

    fn list<O: fmt::Write, T>(
        &self,
        out: &mut O,
        name: &str,
        items: &[T],
        item: impl Fn(&Self, &mut O, &T) -> fmt::Result,
    ) -> fmt::Result {
        write!(out, "{name}(")?;
        self.items(out, items, item)?;
        out.write_char(')')
    }

    fn items<O: fmt::Write, T>(
        &self,
        out: &mut O,
        items: &[T],
        item: impl Fn(&Self, &mut O, &T) -> fmt::Result,
    ) -> fmt::Result {
        for (i, value) in items.iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            item(self, out, value)?;
        }
        Ok(())
    }

    fn annotated_axiom(&self, out: &mut impl fmt::Write, axiom: &AnnotatedAxiom) -> fmt::Result {
        self.axiom(out, &axiom.axiom, &axiom.annotations)
    }

    /// Writes `Name(Annotation(...)* arguments)`.
    fn axiom(
        &self,
        out: &mut impl fmt::Write,
        axiom: &Axiom,
        annotations: &[Annotation],
    ) -> fmt::Result {
        write!(out, "{}(", axiom.name())?;
        for annotation in annotations {
            self.annotation(out, annotation)?;
            out.write_char(' ')?;
        }
        match axiom {
            Axiom::Declaration(kind, entity) => {
                write!(out, "{kind}(")?;
                self.reference(out, entity)?;
                out.write_char(')')?;
            }
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                self.class(out, sub_class)?;
                out.write_char(' ')?;
                self.class(out, super_class)?;
            }
            Axiom::EquivalentClasses(classes) | Axiom::DisjointClasses(classes) => {
                self.items(out, classes, Self::class)?;
            }
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                self.property(out, sub_property)?;
                out.write_char(' ')?;
                self.property(out, super_property)?;
            }
            Axiom::SubPropertyChainOf {
                property_chain,
                super_property,
            } => {
                self.list(out, "ObjectPropertyChain", property_chain, Self::property)?;
                out.write_char(' ')?;
                self.property(out, super_property)?;
            }
            Axiom::EquivalentObjectProperties(properties)
            | Axiom::DisjointObjectProperties(properties) => {
                self.items(out, properties, Self::property)?;
            }
            Axiom::InverseObjectProperties(first, second) => {
                self.property(out, first)?;
                out.write_char(' ')?;
                self.property(out, second)?;
            }
            Axiom::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Axiom::ObjectPropertyRange {
                property,
                range: class,
            } => {
                self.property(out, property)?;
                out.write_char(' ')?;
                self.class(out, class)?;
            }
            Axiom::FunctionalObjectProperty(property)
            | Axiom::InverseFunctionalObjectProperty(property)
            | Axiom::ReflexiveObjectProperty(property)
            | Axiom::SymmetricObjectProperty(property)
            | Axiom::AsymmetricObjectProperty(property)
            | Axiom::TransitiveObjectProperty(property) => {
                self.property(out, property)?;
            }
            Axiom::ClassAssertion { class, individual } => {
                self.class(out, class)?;
                out.write_char(' ')?;
                self.reference(out, individual)?;
            }
            Axiom::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                self.property(out, property)?;
                out.write_char(' ')?;
                self.reference(out, source)?;
                out.write_char(' ')?;
                self.reference(out, target)?;
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                self.reference(out, property)?;
                out.write_char(' ')?;
                self.reference(out, subject)?;
                out.write_char(' ')?;
                self.value(out, value)?;
            }
            Axiom::SubAnnotationPropertyOf {
                sub_property: first,
                super_property: second,
            }
            | Axiom::AnnotationPropertyDomain {
                property: first,
                domain: second,
            }
            | Axiom::AnnotationPropertyRange {
                property: first,
                range: second,
            } => {
                self.reference(out, first)?;
                out.write_char(' ')?;
                self.reference(out, second)?;
            }
        }
        out.write_char(')')
    }
}

/// Checks that `prefix:local` is a valid functional-syntax prefixed name.
fn is_prefixed_name(prefix: &str, local: &str) -> bool {
    let mut prefix_chars = prefix.chars();
    let prefix_ok = prefix_chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && prefix_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !prefix.ends_with('.');
    prefix_ok
        && !local.is_empty()
        && !local.starts_with(['.', '-'])
        && !local.ends_with('.')
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Syntax::bare().axiom(f, self, &[])
    }
}

impl fmt::Display for AnnotatedAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Syntax::bare().annotated_axiom(f, self)
    }
}

impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Syntax::bare().class(f, self)
    }
}

impl fmt::Display for ObjectPropertyExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Syntax::bare().property(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use oxobo::vocab::{oboinowl, rdfs};

    fn go(id: &str) -> Reference {
        Reference::new_unchecked("GO", id)
    }

    fn part_of() -> Reference {
        Reference::new_unchecked("BFO", "0000050")
    }

    #[test]
    fn test_axioms() {
        assert_eq!(
            "Declaration(Class(GO:0050069))",
            Axiom::declaration(EntityKind::Class, go("0050069")).to_string()
        );
        assert_eq!(
            "SubClassOf(GO:0050069 ObjectSomeValuesFrom(BFO:0000050 GO:0000001))",
            Axiom::subclass_of(
                go("0050069"),
                ClassExpression::some_values_from(part_of(), go("0000001"))
            )
            .to_string()
        );
        assert_eq!(
            "EquivalentClasses(GO:0050069 ObjectIntersectionOf(GO:0016491 ObjectSomeValuesFrom(BFO:0000050 GO:0000001)))",
            Axiom::equivalent_classes([
                go("0050069").into(),
                ClassExpression::intersection([
                    go("0016491").into(),
                    ClassExpression::some_values_from(part_of(), go("0000001")),
                ]),
            ])
            .to_string()
        );
        assert_eq!(
            "SubObjectPropertyOf(ObjectPropertyChain(BFO:0000050 BFO:0000050) BFO:0000050)",
            Axiom::SubPropertyChainOf {
                property_chain: vec![part_of().into(), part_of().into()],
                super_property: part_of().into(),
            }
            .to_string()
        );
        assert_eq!(
            "InverseObjectProperties(BFO:0000050 ObjectInverseOf(BFO:0000051))",
            Axiom::InverseObjectProperties(
                part_of().into(),
                ObjectPropertyExpression::from(Reference::new_unchecked("BFO", "0000051"))
                    .inverse()
            )
            .to_string()
        );
    }

    #[test]
    fn test_annotations_come_first() {
        let axiom = Axiom::annotation_assertion(
            oboinowl::HAS_EXACT_SYNONYM,
            go("0050069"),
            Literal::new_simple_literal("L-lysine:NAD+ \"oxidoreductase\""),
        )
        .annotated([
            Annotation::new(oboinowl::HAS_DBXREF, Reference::new_unchecked("pubmed", "1234")),
            Annotation::new(
                oboinowl::HAS_SYNONYM_TYPE,
                Reference::new_unchecked("OMO", "0003000"),
            ),
        ]);
        assert_eq!(
            "AnnotationAssertion(Annotation(oboinowl:hasDbXref pubmed:1234) Annotation(oboinowl:hasSynonymType OMO:0003000) oboinowl:hasExactSynonym GO:0050069 \"L-lysine:NAD+ \\\"oxidoreductase\\\"\")",
            axiom.to_string()
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            "AnnotationAssertion(oboinowl:is_anonymous GO:0050069 \"false\"^^xsd:boolean)",
            Axiom::annotation_assertion(oboinowl::IS_ANONYMOUS, go("0050069"), Literal::from(false))
                .to_string()
        );
        assert_eq!(
            "AnnotationAssertion(rdfs:label GO:0050069 \"lysine\"@en)",
            Axiom::annotation_assertion(
                rdfs::LABEL,
                go("0050069"),
                Literal::new_language_tagged_literal("lysine", "en")
            )
            .to_string()
        );
    }

    #[test]
    fn test_invalid_local_names_become_iris() -> io::Result<()> {
        let part_of = Reference::default_for("go", "part_of");
        let mut writer = FunctionalSerializer::new()
            .with_prefix("obo", "http://purl.obolibrary.org/obo/")
            .map_err(io::Error::other)?
            .serialize_to_write(Vec::new());
        writer.write_axiom(&Axiom::declaration(EntityKind::ObjectProperty, part_of.clone()).into())?;
        let output = String::from_utf8(writer.finish()?).map_err(io::Error::other)?;
        assert!(output.contains(
            "Declaration(ObjectProperty(<http://purl.obolibrary.org/obo/go#part_of>))\n"
        ));
        // Without a declared prefix the CURIE is kept as is
        assert_eq!(
            "Declaration(ObjectProperty(obo:go#part_of))",
            Axiom::declaration(EntityKind::ObjectProperty, part_of).to_string()
        );
        Ok(())
    }

    #[test]
    fn test_document_layout() -> Result<(), Box<dyn std::error::Error>> {
        let mut document = Document::new("http://purl.obolibrary.org/obo/go.owl")?
            .with_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#")?
            .with_prefix("GO", "http://purl.obolibrary.org/obo/GO_")?;
        document.set_version_iri("http://purl.obolibrary.org/obo/go/2024-01-17/go.owl")?;
        document.add_annotation(Annotation::new(
            rdfs::COMMENT,
            Literal::new_simple_literal("a remark"),
        ));
        document.add_axiom(Axiom::declaration(EntityKind::Class, go("0050069")));
        let output = FunctionalSerializer::new().serialize_document(&document, Vec::new())?;
        assert_eq!(
            "Prefix(GO:=<http://purl.obolibrary.org/obo/GO_>)\nPrefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)\n\nOntology(<http://purl.obolibrary.org/obo/go.owl> <http://purl.obolibrary.org/obo/go/2024-01-17/go.owl>\nAnnotation(rdfs:comment \"a remark\")\n\nDeclaration(Class(GO:0050069))\n)\n",
            String::from_utf8(output)?
        );
        Ok(())
    }

    #[test]
    fn test_annotations_after_axioms_are_rejected() -> io::Result<()> {
        let mut writer = FunctionalSerializer::new().serialize_to_write(Vec::new());
        writer.write_axiom(&Axiom::declaration(EntityKind::Class, go("0050069")).into())?;
        assert!(
            writer
                .write_annotation(&Annotation::new(
                    rdfs::COMMENT,
                    Literal::new_simple_literal("late")
                ))
                .is_err()
        );
        assert_eq!(b"Ontology(\nDeclaration(Class(GO:0050069))\n)\n".as_slice(), writer.finish()?);
        Ok(())
    }
}
