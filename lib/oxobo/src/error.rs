use crate::reference::Reference;
use std::{fmt, io};

/// The closed set of reasons why a string could not be resolved to a [`Reference`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ParseErrorKind {
    /// The string is empty once trimmed.
    EmptyString,
    /// The string has no `:` and is not an IRI.
    NotCurie,
    /// The CURIE prefix is not known to the registry.
    UnregisteredPrefix,
    /// The IRI does not match any registered URI prefix.
    UnparsableIri,
    /// The local identifier does not match the prefix pattern.
    Validation,
    /// A bare local identifier could not be turned into an ontology-scoped default reference.
    DefaultCoercion,
}

impl ParseErrorKind {
    fn message(self) -> &'static str {
        match self {
            Self::EmptyString => "tried to parse an empty string",
            Self::NotCurie => "value does not look like a CURIE",
            Self::UnregisteredPrefix => "CURIE contains unhandled prefix",
            Self::UnparsableIri => "could not parse IRI",
            Self::Validation => "identifier does not match the prefix pattern",
            Self::DefaultCoercion => "could not coerce to a default reference",
        }
    }
}

/// A string that could not be resolved to a [`Reference`], with the context it was found in.
///
/// ```
/// use oxobo::{MemoryRegistry, ParseErrorKind, Reference};
///
/// let error = Reference::from_curie(&MemoryRegistry::obo_defaults(), "nope:1").unwrap_err();
/// assert_eq!(ParseErrorKind::UnregisteredPrefix, error.kind());
/// assert_eq!("CURIE contains unhandled prefix nope:1", error.to_string());
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub struct ParseError {
    kind: ParseErrorKind,
    text: String,
    ontology_prefix: Option<String>,
    node: Option<Reference>,
    predicate: Option<Reference>,
    line: Option<String>,
    tag: Option<String>,
    context: Option<String>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            ontology_prefix: None,
            node: None,
            predicate: None,
            line: None,
            tag: None,
            context: None,
        }
    }

    pub(crate) fn in_ontology(mut self, ontology_prefix: &str) -> Self {
        self.ontology_prefix = Some(ontology_prefix.to_owned());
        self
    }

    pub(crate) fn with_node(mut self, node: Option<&Reference>) -> Self {
        if self.node.is_none() {
            self.node = node.cloned();
        }
        self
    }

    pub(crate) fn with_predicate(mut self, predicate: Option<&Reference>) -> Self {
        if self.predicate.is_none() {
            self.predicate = predicate.cloned();
        }
        self
    }

    pub(crate) fn with_line(mut self, line: Option<&str>) -> Self {
        if self.line.is_none() {
            self.line = line.map(ToOwned::to_owned);
        }
        self
    }

    pub(crate) fn with_tag(mut self, tag: Option<&str>) -> Self {
        if self.tag.is_none() {
            self.tag = tag.map(ToOwned::to_owned);
        }
        self
    }

    pub(crate) fn with_context(mut self, context: Option<&str>) -> Self {
        if self.context.is_none() {
            self.context = context.map(ToOwned::to_owned);
        }
        self
    }

    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The offending text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn ontology_prefix(&self) -> Option<&str> {
        self.ontology_prefix.as_deref()
    }

    /// The stanza the text was found in.
    #[inline]
    pub fn node(&self) -> Option<&Reference> {
        self.node.as_ref()
    }

    #[inline]
    pub fn predicate(&self) -> Option<&Reference> {
        self.predicate.as_ref()
    }

    /// The raw tag value the text was extracted from.
    #[inline]
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.node, &self.predicate) {
            (Some(node), Some(predicate)) => write!(f, "[{node} - {predicate}] ")?,
            (Some(node), None) => write!(f, "[{node}] ")?,
            (None, Some(predicate)) => write!(f, "[{predicate}] ")?,
            (None, None) => (),
        }
        write!(f, "{} {}", self.kind.message(), self.text)?;
        if let Some(context) = self.context.as_deref().or(self.tag.as_deref()) {
            write!(f, " in {context}")?;
        }
        if let Some(line) = &self.line {
            if *line != self.text {
                write!(f, " in {line}")?;
            }
        }
        Ok(())
    }
}

impl From<ParseError> for io::Error {
    #[inline]
    fn from(error: ParseError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

/// A structurally malformed tag value or header directive.
#[derive(Debug, Clone, thiserror::Error)]
pub struct OboSyntaxError {
    message: String,
    tag: Option<String>,
    line: Option<String>,
    node: Option<Reference>,
}

impl OboSyntaxError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tag: None,
            line: None,
            node: None,
        }
    }

    pub(crate) fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_owned());
        self
    }

    pub(crate) fn with_line(mut self, line: &str) -> Self {
        self.line = Some(line.to_owned());
        self
    }

    pub(crate) fn with_node(mut self, node: Option<&Reference>) -> Self {
        self.node = node.cloned();
        self
    }

    /// The error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[inline]
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    #[inline]
    pub fn node(&self) -> Option<&Reference> {
        self.node.as_ref()
    }
}

impl fmt::Display for OboSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(node) = &self.node {
            write!(f, "[{node}] ")?;
        }
        f.write_str(&self.message)?;
        match (&self.tag, &self.line) {
            (Some(tag), Some(line)) => write!(f, " in {tag}: {line}"),
            (None, Some(line)) => write!(f, " in {line}"),
            (Some(tag), None) => write!(f, " in {tag}"),
            (None, None) => Ok(()),
        }
    }
}

impl From<OboSyntaxError> for io::Error {
    #[inline]
    fn from(error: OboSyntaxError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

/// A parsing error.
///
/// It is the union of [`ParseError`], [`OboSyntaxError`] and [`io::Error`].
#[derive(Debug, thiserror::Error)]
pub enum OboParseError {
    /// I/O error during parsing (file not found...).
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A malformed tag value or header directive.
    #[error(transparent)]
    Syntax(#[from] OboSyntaxError),
    /// A value that could not be resolved to a reference.
    #[error(transparent)]
    Reference(#[from] ParseError),
}

impl From<OboParseError> for io::Error {
    #[inline]
    fn from(error: OboParseError) -> Self {
        match error {
            OboParseError::Syntax(e) => e.into(),
            OboParseError::Reference(e) => e.into(),
            OboParseError::Io(e) => e,
        }
    }
}
