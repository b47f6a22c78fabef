//! The OBO flat file reader.

mod grammar;
mod header;
mod macros;
mod tags;

pub use self::header::clean_version;
pub use self::macros::MacroConfig;
pub use self::tags::Tag;
use self::tags::{Declarations, read_stanza};
use crate::error::OboParseError;
use crate::ontology::{OboDocument, OboHeader};
use crate::reference::Reference;
use crate::registry::Registry;
use crate::rules::Rules;
use crate::session::ParseSession;
use crate::stanza::{Stanza, Term, TypeDef};
use crate::tokenizer::{RawDocument, RawReader, RawStanza, StanzaKind, TagValues};
use std::io::Read;

/// A stanza built by the reader.
#[derive(PartialEq, Debug, Clone)]
pub enum ParsedStanza {
    Term(Term),
    TypeDef(TypeDef),
}

impl ParsedStanza {
    #[inline]
    pub fn reference(&self) -> &Reference {
        self.stanza().reference()
    }

    #[inline]
    pub fn stanza(&self) -> &Stanza {
        match self {
            Self::Term(term) => term,
            Self::TypeDef(typedef) => typedef,
        }
    }

    #[inline]
    pub(crate) fn stanza_mut(&mut self) -> &mut Stanza {
        match self {
            Self::Term(term) => &mut **term,
            Self::TypeDef(typedef) => &mut **typedef,
        }
    }
}

/// A [OBO flat file format](https://owlcollab.github.io/oboformat/doc/obo-syntax.html) parser.
///
/// Every identifier is normalized against a [`Registry`] and, if enabled, rewritten by [`Rules`].
///
/// Count the terms of a document:
/// ```
/// use oxobo::{MemoryRegistry, OboParser, ParsedStanza};
///
/// let file = b"format-version: 1.4
/// ontology: go
///
/// [Term]
/// id: GO:0050069
/// name: lysine dehydrogenase activity
/// is_a: GO:0016491
///
/// [Typedef]
/// id: part_of
/// name: part of
/// ";
///
/// let registry = MemoryRegistry::obo_defaults();
/// let mut reader = OboParser::new(&registry).parse_read(file.as_ref())?;
/// assert_eq!("go", reader.header().ontology);
/// let mut count = 0;
/// for stanza in reader {
///     if let ParsedStanza::Term(_) = stanza? {
///         count += 1;
///     }
/// }
/// assert_eq!(1, count);
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone)]
#[must_use]
pub struct OboParser<'a> {
    registry: &'a (dyn Registry + Sync),
    rules: Option<&'a Rules>,
    strict: bool,
    upgrade: bool,
    ontology_prefix: Option<String>,
    version: Option<String>,
}

impl<'a> OboParser<'a> {
    /// Builds a new lenient [`OboParser`].
    #[inline]
    pub fn new(registry: &'a (dyn Registry + Sync)) -> Self {
        Self {
            registry,
            rules: None,
            strict: false,
            upgrade: true,
            ontology_prefix: None,
            version: None,
        }
    }

    /// Fails on the first unresolvable value or malformed line instead of logging and skipping it.
    #[inline]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Enables or disables the rewrite rules (enabled by default).
    #[inline]
    pub fn upgrade(mut self, upgrade: bool) -> Self {
        self.upgrade = upgrade;
        self
    }

    #[inline]
    pub fn with_rules(mut self, rules: &'a Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Sets the ontology prefix.
    ///
    /// It is used when the `ontology` header directive is missing or is not purely alphabetic.
    #[inline]
    pub fn with_ontology_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ontology_prefix = Some(prefix.into());
        self
    }

    /// Sets the data version. It takes precedence over the `data-version` header directive.
    #[inline]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parses an OBO file from a [`Read`] implementation, one stanza at a time.
    ///
    /// The header is read eagerly. A relationship predicate is only known to be declared
    /// if its `[Typedef]` comes before its use.
    pub fn parse_read<R: Read>(&self, read: R) -> Result<FromReadOboReader<'a, R>, OboParseError> {
        let mut raw = RawReader::new(read).lenient(!self.strict);
        let header = raw.read_header()?;
        Ok(FromReadOboReader {
            raw,
            inner: self.for_header(&header)?,
        })
    }

    /// Parses a whole OBO file from a [`Read`] implementation.
    pub fn parse_document(&self, read: impl Read) -> Result<OboDocument, OboParseError> {
        let mut raw = RawReader::new(read).lenient(!self.strict);
        let header = raw.read_header()?;
        let stanzas = raw.collect::<Result<Vec<_>, _>>()?;
        self.parse_raw(&RawDocument { header, stanzas })
    }

    /// Parses a whole OBO file from a string.
    ///
    /// ```
    /// use oxobo::{MemoryRegistry, OboParser, Reference};
    ///
    /// let registry = MemoryRegistry::obo_defaults();
    /// let document = OboParser::new(&registry).parse_str(
    ///     "ontology: go\n\n[Term]\nid: GO:0050069\ndef: \"Catalysis of a reaction.\" [PMID:123]\n",
    /// )?;
    /// let term = document.term(&Reference::new_unchecked("go", "0050069")).unwrap();
    /// assert_eq!(Some("Catalysis of a reaction."), term.definition());
    /// # Result::<_,Box<dyn std::error::Error>>::Ok(())
    /// ```
    #[inline]
    pub fn parse_str(&self, text: &str) -> Result<OboDocument, OboParseError> {
        self.parse_slice(text.as_bytes())
    }

    #[inline]
    pub fn parse_slice(&self, slice: &[u8]) -> Result<OboDocument, OboParseError> {
        self.parse_document(slice)
    }

    /// Builds a document from already tokenized stanzas.
    ///
    /// All typedefs are read before the terms so that every declared relation is known.
    pub fn parse_raw(&self, document: &RawDocument) -> Result<OboDocument, OboParseError> {
        let mut reader = self.for_header(&document.header)?;
        let mut typedefs = Vec::new();
        let mut terms = Vec::new();
        let (raw_typedefs, raw_terms): (Vec<&RawStanza>, Vec<&RawStanza>) = document
            .stanzas
            .iter()
            .partition(|stanza| stanza.kind == StanzaKind::Typedef);
        for raw in raw_typedefs.into_iter().chain(raw_terms) {
            match reader.read_stanza(raw)? {
                Some(ParsedStanza::TypeDef(typedef)) => typedefs.push(typedef),
                Some(ParsedStanza::Term(term)) => terms.push(term),
                None => (),
            }
        }
        tracing::debug!(
            ontology = %reader.header.ontology,
            terms = terms.len(),
            typedefs = typedefs.len(),
            "parsed OBO document"
        );
        Ok(OboDocument {
            header: reader.into_header(),
            typedefs,
            terms,
        })
    }

    /// Reads a header and returns a reader for the stanzas that follow it.
    pub fn for_header(&self, header: &TagValues) -> Result<StanzaReader<'a>, OboParseError> {
        let mut session = ParseSession::new(
            self.registry,
            self.ontology_prefix.clone().unwrap_or_default(),
        )
        .strict(self.strict)
        .upgrade(self.upgrade);
        if let Some(rules) = self.rules {
            session = session.with_rules(rules);
        }
        let header = header::read_header(
            header,
            &mut session,
            self.ontology_prefix.as_deref(),
            self.version.as_deref(),
        )?;
        let declarations = Declarations::new(&header, self.registry);
        Ok(StanzaReader {
            session,
            header,
            declarations,
        })
    }
}

/// Builds stanzas against a parsed header.
///
/// Can be built using [`OboParser::for_header`].
pub struct StanzaReader<'a> {
    session: ParseSession<'a>,
    header: OboHeader,
    declarations: Declarations,
}

impl<'a> StanzaReader<'a> {
    /// Builds a term or a typedef.
    ///
    /// Returns `Ok(None)` if the stanza is skipped.
    pub fn read_stanza(&mut self, raw: &RawStanza) -> Result<Option<ParsedStanza>, OboParseError> {
        let stanza = read_stanza(raw, &self.header, &self.declarations, &mut self.session)?;
        if let Some(ParsedStanza::TypeDef(typedef)) = &stanza {
            self.declarations
                .declare_typedef(typedef.reference().clone());
        }
        Ok(stanza)
    }

    #[inline]
    pub fn header(&self) -> &OboHeader {
        &self.header
    }

    /// The parsing session, e.g. to inspect the reported warnings.
    #[inline]
    pub fn session(&self) -> &ParseSession<'a> {
        &self.session
    }

    #[inline]
    pub fn into_header(self) -> OboHeader {
        self.header
    }
}

/// Parses an OBO file from a [`Read`] implementation.
///
/// Can be built using [`OboParser::parse_read`].
#[must_use]
pub struct FromReadOboReader<'a, R: Read> {
    raw: RawReader<R>,
    inner: StanzaReader<'a>,
}

impl<'a, R: Read> FromReadOboReader<'a, R> {
    #[inline]
    pub fn header(&self) -> &OboHeader {
        self.inner.header()
    }

    #[inline]
    pub fn session(&self) -> &ParseSession<'a> {
        self.inner.session()
    }
}

impl<R: Read> Iterator for FromReadOboReader<'_, R> {
    type Item = Result<ParsedStanza, OboParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.raw.next()? {
                Ok(raw) => raw,
                Err(e) => return Some(Err(e)),
            };
            match self.inner.read_stanza(&raw) {
                Ok(Some(stanza)) => return Some(Ok(stanza)),
                Ok(None) => (),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
