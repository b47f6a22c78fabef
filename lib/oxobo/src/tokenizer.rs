//! Splits OBO text into per-stanza tag/value maps.
//!
//! This layer knows nothing about the meaning of the tags: it only handles stanza headers,
//! `tag: value` lines, `\` line continuations and trailing `!` comments.

use crate::error::{OboParseError, OboSyntaxError};
use memchr::memchr3;
use std::io::{BufRead, BufReader, Lines, Read};

/// The type of a stanza, given by its `[...]` header.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum StanzaKind {
    Term,
    Typedef,
    Instance,
}

impl StanzaKind {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Term => "Term",
            Self::Typedef => "Typedef",
            Self::Instance => "Instance",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "Term" => Some(Self::Term),
            "Typedef" => Some(Self::Typedef),
            "Instance" => Some(Self::Instance),
            _ => None,
        }
    }
}

/// The tags of a stanza or of the document header, in first appearance order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct TagValues {
    entries: Vec<(String, Vec<String>)>,
}

impl TagValues {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to a tag.
    pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        let tag = tag.into();
        let value = value.into();
        if let Some((_, values)) = self.entries.iter_mut().find(|(t, _)| *t == tag) {
            values.push(value);
        } else {
            self.entries.push((tag, vec![value]));
        }
    }

    /// The values of a tag, empty if the tag is absent.
    pub fn get(&self, tag: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// The first value of a tag.
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.get(tag).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(tag, values)| (tag.as_str(), values.as_slice()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Into<String>, V: Into<String>> FromIterator<(T, V)> for TagValues {
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (tag, value) in iter {
            values.push(tag, value);
        }
        values
    }
}

/// One `[Term]`, `[Typedef]` or `[Instance]` block.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawStanza {
    pub kind: StanzaKind,
    pub tags: TagValues,
}

/// A tokenized OBO document.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawDocument {
    pub header: TagValues,
    pub stanzas: Vec<RawStanza>,
}

/// Tokenizes a whole OBO document.
///
/// ```
/// use oxobo::tokenizer::{parse_raw, StanzaKind};
///
/// let document = parse_raw(
///     "format-version: 1.4\nontology: go\n\n[Term]\nid: GO:0050069 ! lysine dehydrogenase\nname: lysine \"dehydrogenase!\" activity\n",
/// )?;
/// assert_eq!(Some("go"), document.header.first("ontology"));
/// assert_eq!(StanzaKind::Term, document.stanzas[0].kind);
/// assert_eq!(Some("GO:0050069"), document.stanzas[0].tags.first("id"));
/// assert_eq!(
///     Some("lysine \"dehydrogenase!\" activity"),
///     document.stanzas[0].tags.first("name")
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn parse_raw(text: &str) -> Result<RawDocument, OboSyntaxError> {
    let mut reader = RawReader::new(text.as_bytes());
    let header = reader.read_header().map_err(into_syntax_error)?;
    let stanzas = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(into_syntax_error)?;
    Ok(RawDocument { header, stanzas })
}

fn into_syntax_error(error: OboParseError) -> OboSyntaxError {
    match error {
        OboParseError::Syntax(e) => e,
        error => OboSyntaxError::new(error.to_string()),
    }
}

/// Lazily tokenizes an OBO document, one stanza at a time.
///
/// [`read_header`](Self::read_header) must be called before iterating.
pub struct RawReader<R: Read> {
    lines: Lines<BufReader<R>>,
    pending_header: Option<String>,
    finished: bool,
    lenient: bool,
}

impl<R: Read> RawReader<R> {
    pub fn new(read: R) -> Self {
        Self {
            lines: BufReader::new(read).lines(),
            pending_header: None,
            finished: false,
            lenient: false,
        }
    }

    /// Skips lines without a tag separator with a warning instead of failing.
    #[inline]
    #[must_use]
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Reads the tags before the first stanza.
    pub fn read_header(&mut self) -> Result<TagValues, OboParseError> {
        let mut header = TagValues::new();
        while let Some(line) = self.next_logical_line()? {
            if let Some(name) = stanza_header(&line) {
                self.pending_header = Some(name.to_owned());
                break;
            }
            if let Some((tag, value)) = self.tag_line(&line)? {
                header.push(tag, value);
            }
        }
        Ok(header)
    }

    fn read_stanza(&mut self) -> Result<Option<RawStanza>, OboParseError> {
        loop {
            let Some(name) = self.pending_header.take() else {
                // Skips everything up to the next stanza header
                loop {
                    let Some(line) = self.next_logical_line()? else {
                        return Ok(None);
                    };
                    if let Some(name) = stanza_header(&line) {
                        self.pending_header = Some(name.to_owned());
                        break;
                    }
                }
                continue;
            };
            let mut tags = TagValues::new();
            while let Some(line) = self.next_logical_line()? {
                if let Some(next) = stanza_header(&line) {
                    self.pending_header = Some(next.to_owned());
                    break;
                }
                if let Some((tag, value)) = self.tag_line(&line)? {
                    tags.push(tag, value);
                }
            }
            if let Some(kind) = StanzaKind::from_header(&name) {
                return Ok(Some(RawStanza { kind, tags }));
            }
            tracing::debug!(stanza = %name, "skipping unsupported stanza type");
            if self.pending_header.is_none() {
                return Ok(None);
            }
        }
    }

    fn tag_line<'l>(&self, line: &'l str) -> Result<Option<(&'l str, &'l str)>, OboSyntaxError> {
        match split_tag_line(line) {
            Ok(pair) => Ok(Some(pair)),
            Err(_) if self.lenient => {
                tracing::warn!(line, "skipping a line without tag separator");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the next non-empty line with continuations joined and comments removed.
    fn next_logical_line(&mut self) -> Result<Option<String>, OboParseError> {
        let mut buffer = String::new();
        for line in self.lines.by_ref() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            if let Some(continued) = strip_continuation(line) {
                buffer.push_str(continued);
                continue;
            }
            buffer.push_str(line);
            let cleaned = strip_comment(&buffer).trim();
            if cleaned.is_empty() {
                buffer.clear();
                continue;
            }
            return Ok(Some(cleaned.to_owned()));
        }
        let cleaned = strip_comment(&buffer).trim();
        Ok((!cleaned.is_empty()).then(|| cleaned.to_owned()))
    }
}

impl<R: Read> Iterator for RawReader<R> {
    type Item = Result<RawStanza, OboParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_stanza() {
            Ok(Some(stanza)) => Some(Ok(stanza)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn stanza_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

fn split_tag_line(line: &str) -> Result<(&str, &str), OboSyntaxError> {
    let (tag, value) = line
        .split_once(':')
        .ok_or_else(|| OboSyntaxError::new("missing tag separator").with_line(line))?;
    Ok((tag.trim(), value.trim()))
}

/// Returns the line without its final `\` if it ends with an odd number of backslashes.
fn strip_continuation(line: &str) -> Option<&str> {
    let backslashes = line.len() - line.trim_end_matches('\\').len();
    (backslashes % 2 == 1).then(|| &line[..line.len() - 1])
}

/// Cuts the line at the first `!` that is neither escaped nor quoted.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut position = 0;
    let mut quoted = false;
    while let Some(offset) = memchr3(b'"', b'!', b'\\', &bytes[position..]) {
        let index = position + offset;
        match bytes[index] {
            b'\\' => {
                position = index + 2;
                if position >= bytes.len() {
                    break;
                }
                continue;
            }
            b'"' => quoted = !quoted,
            _ if !quoted => return &line[..index],
            _ => (),
        }
        position = index + 1;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments() {
        assert_eq!("is_a: GO:1 ", strip_comment("is_a: GO:1 ! name"));
        assert_eq!("name: a \\! b", strip_comment("name: a \\! b"));
        assert_eq!("def: \"a!b\" []", strip_comment("def: \"a!b\" []"));
        assert_eq!("trailing \\", strip_comment("trailing \\"));
    }

    #[test]
    fn continuation() {
        let document = parse_raw("ontology: go\n\n[Term]\nid: GO:1\ndef: \"a \\\nb\" []\n").unwrap();
        assert_eq!(
            Some("\"a b\" []"),
            document.stanzas[0].tags.first("def")
        );
    }

    #[test]
    fn unknown_stanzas_are_skipped() {
        let document =
            parse_raw("ontology: x\n[Annotation]\nid: a\n[Typedef]\nid: part_of\n[Instance]\nid: x:1\n")
                .unwrap();
        assert_eq!(2, document.stanzas.len());
        assert_eq!(StanzaKind::Typedef, document.stanzas[0].kind);
        assert_eq!(StanzaKind::Instance, document.stanzas[1].kind);
    }

    #[test]
    fn missing_separator() {
        assert!(parse_raw("ontology go\n").is_err());
        let mut reader = RawReader::new("ontology: go\n\n[Term]\nid: x:1\ngarbage line\nname: n\n".as_bytes())
            .lenient(true);
        assert_eq!(Some("go"), reader.read_header().unwrap().first("ontology"));
        let stanza = reader.next().unwrap().unwrap();
        assert_eq!(Some("n"), stanza.tags.first("name"));
        assert!(reader.next().is_none());
    }

    #[test]
    fn repeated_tags_keep_order() {
        let document = parse_raw("[Term]\nid: x:1\nis_a: x:3\nname: n\nis_a: x:2\n").unwrap();
        let tags = &document.stanzas[0].tags;
        assert_eq!(&["x:3".to_owned(), "x:2".to_owned()], tags.get("is_a"));
        assert_eq!(
            vec!["id", "is_a", "name"],
            tags.iter().map(|(tag, _)| tag).collect::<Vec<_>>()
        );
    }
}
