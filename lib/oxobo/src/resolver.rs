//! Turns raw strings into registry-normalized [`Reference`]s.

use crate::error::{ParseError, ParseErrorKind};
use crate::reference::Reference;
use crate::registry::Registry;
use crate::rules::Rules;
use oxiri::Iri;
use std::borrow::Cow;

/// The successful outcome of resolving a string.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Resolved {
    Reference(Reference),
    /// The string matched a blocklist entry and must be ignored without error.
    Blocked,
}

impl Resolved {
    #[inline]
    pub fn into_reference(self) -> Option<Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Blocked => None,
        }
    }
}

/// Where a string being resolved comes from, for diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseContext<'a> {
    /// The enclosing stanza.
    pub node: Option<&'a Reference>,
    /// The predicate of the edge being built.
    pub predicate: Option<&'a Reference>,
    /// The raw tag value.
    pub line: Option<&'a str>,
    /// The OBO tag name.
    pub tag: Option<&'a str>,
    /// A free-form label of the grammar rule being applied.
    pub context: Option<&'a str>,
}

impl<'a> ParseContext<'a> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_node(mut self, node: &'a Reference) -> Self {
        self.node = Some(node);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_predicate(mut self, predicate: &'a Reference) -> Self {
        self.predicate = Some(predicate);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_line(mut self, line: &'a str) -> Self {
        self.line = Some(line);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_context(mut self, context: &'a str) -> Self {
        self.context = Some(context);
        self
    }

    pub(crate) fn decorate(&self, error: ParseError) -> ParseError {
        error
            .with_node(self.node)
            .with_predicate(self.predicate)
            .with_line(self.line)
            .with_tag(self.tag)
            .with_context(self.context)
    }
}

/// Resolves a string against the registry, applying the rewrite rules and the blocklist.
///
/// When `upgrade` is set, full-string rewrites, prefix rewrites and relation groundings are tried first.
/// A prefix rewrite is still checked against the blocklist.
pub(crate) fn resolve(
    registry: &(impl Registry + ?Sized),
    rules: &Rules,
    text: &str,
    ontology_prefix: Option<&str>,
    upgrade: bool,
) -> Result<Resolved, ParseError> {
    let mut text = preclean(text);
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyString, text));
    }
    if upgrade {
        if let Some(replacement) = rules.remap_full(&text, ontology_prefix) {
            return resolve_unchecked(registry, replacement).map(Resolved::Reference);
        }
        if let Some(replacement) = rules.remap_prefix(&text, ontology_prefix) {
            text = Cow::Owned(replacement);
        }
        if let Some(curie) = rules.ground_relation(&text) {
            return resolve_unchecked(registry, curie).map(Resolved::Reference);
        }
    }
    if rules.is_blocked(&text, ontology_prefix) {
        return Ok(Resolved::Blocked);
    }
    resolve_unchecked(registry, &text).map(Resolved::Reference)
}

/// Parses an IRI or a CURIE without any rule applied.
pub(crate) fn parse_curie(
    registry: &(impl Registry + ?Sized),
    text: &str,
) -> Result<Reference, ParseError> {
    let text = preclean(text);
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyString, text));
    }
    resolve_unchecked(registry, &text)
}

fn resolve_unchecked(
    registry: &(impl Registry + ?Sized),
    text: &str,
) -> Result<Reference, ParseError> {
    if is_iri(text) {
        if Iri::parse(text).is_err() {
            return Err(ParseError::new(ParseErrorKind::UnparsableIri, text));
        }
        let Some((prefix, identifier)) = registry.parse_iri(text) else {
            return Err(ParseError::new(ParseErrorKind::UnparsableIri, text));
        };
        return validated(registry, text, &prefix, &identifier);
    }
    let Some((prefix, identifier)) = text.split_once(':') else {
        return Err(ParseError::new(ParseErrorKind::NotCurie, text));
    };
    let Some(prefix) = registry.normalize_prefix(prefix.trim()) else {
        return Err(ParseError::new(ParseErrorKind::UnregisteredPrefix, text));
    };
    validated(registry, text, prefix, identifier)
}

fn validated(
    registry: &(impl Registry + ?Sized),
    text: &str,
    prefix: &str,
    identifier: &str,
) -> Result<Reference, ParseError> {
    let identifier = registry.standardize_identifier(prefix, identifier);
    if !registry.is_valid_identifier(prefix, &identifier) {
        return Err(ParseError::new(ParseErrorKind::Validation, text));
    }
    Ok(Reference::new_unchecked(prefix, identifier))
}

/// Checks that a bare local identifier can be used in a default reference.
pub(crate) fn is_valid_local_identifier(text: &str) -> bool {
    !text.is_empty() && !text.contains(|c: char| c.is_whitespace() || c == ':')
}

pub(crate) fn is_iri(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Removes the wrappers and escapes some sources put around IRIs.
fn preclean(text: &str) -> Cow<'_, str> {
    let mut text = text.trim();
    for wrapper in [r"url\:", r"uri\:", r"URL\:", r"URI\:", "url:", "uri:", "URL:", "URI:"] {
        if let Some(rest) = text.strip_prefix(wrapper) {
            text = rest.trim();
        }
    }
    for wrapper in ["WWW:", "www:"] {
        if let Some(rest) = text.strip_prefix(wrapper) {
            text = rest.trim_start();
        }
    }
    if let Some(iri) = text
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .filter(|t| is_iri(t))
    {
        text = iri;
    }
    let text = text.trim_end_matches('/');
    if text.contains(r"http\:") || text.contains(r"https\:") {
        Cow::Owned(
            text.replace(r"http\:", "http:")
                .replace(r"https\:", "https:"),
        )
    } else {
        Cow::Borrowed(text)
    }
}
