//! The stanza tags and their handlers.

use crate::error::{OboParseError, OboSyntaxError, ParseErrorKind};
use crate::ontology::OboHeader;
use crate::reader::ParsedStanza;
use crate::reader::grammar::{
    split_bracketed, split_modifiers, split_outside_quotes, split_quoted, split_token, unescape,
};
use crate::reference::{Annotation, Literal, Reference, Value};
use crate::registry::Registry;
use crate::resolver::{ParseContext, Resolved};
use crate::session::ParseSession;
use crate::stanza::{Flag, Specificity, Synonym, Term, TermKind, TypeDef};
use crate::tokenizer::{RawStanza, StanzaKind};
use crate::vocab::{obo, xsd};
use oxsdatatypes::DateTime;
use rustc_hash::{FxHashMap, FxHashSet};
use std::str::FromStr;

/// The stanza tags understood by the reader.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Tag {
    Id,
    Name,
    Namespace,
    AltId,
    Def,
    Comment,
    Subset,
    Synonym,
    Xref,
    IsA,
    InstanceOf,
    IntersectionOf,
    UnionOf,
    EquivalentTo,
    DisjointFrom,
    Relationship,
    PropertyValue,
    ReplacedBy,
    Consider,
    CreatedBy,
    CreationDate,
    Domain,
    Range,
    InverseOf,
    TransitiveOver,
    DisjointOver,
    HoldsOverChain,
    EquivalentToChain,
    Flag(Flag),
}

impl Tag {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "id" => Self::Id,
            "name" => Self::Name,
            "namespace" => Self::Namespace,
            "alt_id" => Self::AltId,
            "def" => Self::Def,
            "comment" => Self::Comment,
            "subset" => Self::Subset,
            "synonym" => Self::Synonym,
            "xref" => Self::Xref,
            "is_a" => Self::IsA,
            "instance_of" => Self::InstanceOf,
            "intersection_of" => Self::IntersectionOf,
            "union_of" => Self::UnionOf,
            "equivalent_to" => Self::EquivalentTo,
            "disjoint_from" => Self::DisjointFrom,
            "relationship" => Self::Relationship,
            "property_value" => Self::PropertyValue,
            "replaced_by" => Self::ReplacedBy,
            "consider" => Self::Consider,
            "created_by" => Self::CreatedBy,
            "creation_date" => Self::CreationDate,
            "domain" => Self::Domain,
            "range" => Self::Range,
            "inverse_of" => Self::InverseOf,
            "transitive_over" => Self::TransitiveOver,
            "disjoint_over" => Self::DisjointOver,
            "holds_over_chain" => Self::HoldsOverChain,
            "equivalent_to_chain" => Self::EquivalentToChain,
            name => Self::Flag(Flag::from_tag(name)?),
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Namespace => "namespace",
            Self::AltId => "alt_id",
            Self::Def => "def",
            Self::Comment => "comment",
            Self::Subset => "subset",
            Self::Synonym => "synonym",
            Self::Xref => "xref",
            Self::IsA => "is_a",
            Self::InstanceOf => "instance_of",
            Self::IntersectionOf => "intersection_of",
            Self::UnionOf => "union_of",
            Self::EquivalentTo => "equivalent_to",
            Self::DisjointFrom => "disjoint_from",
            Self::Relationship => "relationship",
            Self::PropertyValue => "property_value",
            Self::ReplacedBy => "replaced_by",
            Self::Consider => "consider",
            Self::CreatedBy => "created_by",
            Self::CreationDate => "creation_date",
            Self::Domain => "domain",
            Self::Range => "range",
            Self::InverseOf => "inverse_of",
            Self::TransitiveOver => "transitive_over",
            Self::DisjointOver => "disjoint_over",
            Self::HoldsOverChain => "holds_over_chain",
            Self::EquivalentToChain => "equivalent_to_chain",
            Self::Flag(flag) => flag.tag(),
        }
    }

    /// Tags that only make sense in a `[Typedef]` stanza.
    pub fn is_typedef_only(self) -> bool {
        match self {
            Self::Domain
            | Self::Range
            | Self::InverseOf
            | Self::TransitiveOver
            | Self::DisjointOver
            | Self::HoldsOverChain
            | Self::EquivalentToChain => true,
            Self::Flag(flag) => flag.is_typedef_only(),
            _ => false,
        }
    }
}

/// What the stanzas read so far have declared.
pub(crate) struct Declarations {
    /// Every accepted spelling of a synonym type: CURIE, preferred CURIE and local identifier.
    synonym_types: FxHashMap<String, Reference>,
    typedefs: FxHashSet<Reference>,
}

impl Declarations {
    pub fn new(header: &OboHeader, registry: &(dyn Registry + Sync)) -> Self {
        let mut synonym_types = FxHashMap::default();
        for typedef in &header.synonym_typedefs {
            let reference = typedef.reference();
            if let Some(local) = reference.default_local(&header.ontology) {
                synonym_types.insert(local.to_owned(), reference.clone());
            }
            synonym_types.insert(reference.preferred_curie(registry), reference.clone());
            synonym_types.insert(reference.curie(), reference.clone());
        }
        Self {
            synonym_types,
            typedefs: FxHashSet::default(),
        }
    }

    pub fn declare_typedef(&mut self, reference: Reference) {
        self.typedefs.insert(reference);
    }

    pub fn is_declared(&self, reference: &Reference) -> bool {
        self.typedefs.contains(reference)
    }

    fn synonym_type(&self, token: &str) -> Option<&Reference> {
        self.synonym_types.get(token)
    }
}

/// Builds a term or a typedef from its tags.
///
/// Returns `Ok(None)` if the stanza id is blocked or, in lenient mode, unresolvable.
pub(crate) fn read_stanza(
    raw: &RawStanza,
    header: &OboHeader,
    declarations: &Declarations,
    session: &mut ParseSession<'_>,
) -> Result<Option<ParsedStanza>, OboParseError> {
    let Some(id) = raw.tags.first("id") else {
        session.recover(OboSyntaxError::new("stanza has no id").with_tag(raw.kind.as_str()))?;
        return Ok(None);
    };
    let context = ParseContext::new()
        .with_tag("id")
        .with_line(id)
        .with_context("stanza ID");
    let Some(mut reference) = session.resolve_obo(id, context)? else {
        return Ok(None);
    };
    if let Some(name) = raw.tags.first("name") {
        reference = reference.with_name(unescape(name));
    }
    let mut parsed = match raw.kind {
        StanzaKind::Term => ParsedStanza::Term(Term::with_kind(reference, TermKind::Class)),
        StanzaKind::Instance => ParsedStanza::Term(Term::with_kind(reference, TermKind::Instance)),
        StanzaKind::Typedef => ParsedStanza::TypeDef(TypeDef::new(reference)),
    };
    for (name, values) in raw.tags.iter() {
        let Some(tag) = Tag::from_name(name) else {
            tracing::debug!(ontology = %session.ontology_prefix(), tag = name, "ignoring unknown tag");
            continue;
        };
        if matches!(tag, Tag::Id | Tag::Name) {
            continue;
        }
        if tag.is_typedef_only() && matches!(parsed, ParsedStanza::Term(_)) {
            let node = parsed.reference().clone();
            session.warn_once(name, || format!("[{node}] {name} is only allowed on typedefs"));
            continue;
        }
        for value in values {
            if let Err(error) = read_value(tag, value, &mut parsed, header, declarations, session) {
                let error = match error {
                    OboParseError::Syntax(e) => e
                        .with_tag(name)
                        .with_line(value)
                        .with_node(Some(parsed.reference()))
                        .into(),
                    error => error,
                };
                session.recover(error)?;
            }
        }
    }
    Ok(Some(parsed))
}

fn read_value(
    tag: Tag,
    value: &str,
    parsed: &mut ParsedStanza,
    header: &OboHeader,
    declarations: &Declarations,
    session: &mut ParseSession<'_>,
) -> Result<(), OboParseError> {
    let node = parsed.reference().clone();
    let context = ParseContext::new()
        .with_node(&node)
        .with_tag(tag.as_str())
        .with_line(value);
    match tag {
        Tag::Id | Tag::Name => (),
        Tag::Namespace => {
            parsed.stanza_mut().set_namespace(value);
        }
        Tag::Def => {
            let (definition, rest) = split_quoted(value)
                .ok_or_else(|| OboSyntaxError::new("definition is not a quoted string"))?;
            let (rest, _) = split_modifiers(rest);
            let provenance = match split_bracketed(rest) {
                Some((list, _)) => read_provenance(list, context, session)?,
                None => {
                    tracing::debug!(node = %node, line = value, "no square brackets for definition provenance");
                    Vec::new()
                }
            };
            let definition = unescape(definition);
            if !definition.is_empty() || !provenance.is_empty() {
                parsed.stanza_mut().set_definition(definition, provenance);
            }
        }
        Tag::Comment => {
            parsed.stanza_mut().append_comment(unescape(value));
        }
        Tag::Synonym => {
            if let Some(synonym) = read_synonym(value, &node, declarations, context, session)? {
                parsed.stanza_mut().append_synonym(synonym);
            }
        }
        Tag::Xref => read_xref(value, parsed, header, context, session)?,
        Tag::IsA | Tag::InstanceOf | Tag::EquivalentTo => {
            let (body, modifiers) = split_modifiers(value);
            let annotations = read_modifiers(modifiers, context, session)?;
            let Some(reference) = session.resolve_obo(body, context)? else {
                return Ok(());
            };
            let stanza = parsed.stanza_mut();
            if tag == Tag::EquivalentTo {
                stanza.append_equivalent_annotated(reference, annotations);
            } else {
                stanza.append_parent_annotated(reference, annotations);
            }
        }
        Tag::AltId
        | Tag::Subset
        | Tag::UnionOf
        | Tag::DisjointFrom
        | Tag::ReplacedBy
        | Tag::Consider => {
            let (body, _) = split_modifiers(value);
            let Some(reference) = session.resolve_obo(body, context)? else {
                return Ok(());
            };
            let stanza = parsed.stanza_mut();
            match tag {
                Tag::AltId => stanza.append_alt(reference),
                Tag::Subset => stanza.append_subset(reference),
                Tag::UnionOf => stanza.append_union_of(reference),
                Tag::DisjointFrom => stanza.append_disjoint_from(reference),
                Tag::ReplacedBy => stanza.append_replaced_by(reference),
                _ => stanza.append_consider(reference),
            };
        }
        Tag::IntersectionOf => {
            let (body, _) = split_modifiers(value);
            let mut tokens = body.split_whitespace();
            let first = tokens.next().unwrap_or_default();
            let second = tokens.next();
            if tokens.next().is_some() {
                session.warn_once(value, || {
                    format!("[{node}] ignoring extra tokens in intersection_of: {value}")
                });
            }
            let Some(first) = session.resolve_obo(first, context)? else {
                return Ok(());
            };
            match second {
                Some(target) => {
                    let context = context.with_predicate(&first);
                    if let Some(target) = session.resolve_obo(target, context)? {
                        parsed.stanza_mut().append_intersection_of((first, target));
                    }
                }
                None => {
                    parsed.stanza_mut().append_intersection_of(first);
                }
            }
        }
        Tag::Relationship => {
            let (body, modifiers) = split_modifiers(value);
            let (predicate, rest) = split_token(body);
            let (target, extra) = split_token(rest);
            if target.is_empty() {
                return Err(OboSyntaxError::new("relationship is missing a target").into());
            }
            if !extra.is_empty() {
                session.warn_once(value, || {
                    format!("[{node}] ignoring extra tokens in relationship: {value}")
                });
            }
            let Some(predicate) =
                session.resolve_obo(predicate, context.with_context("relationship predicate"))?
            else {
                return Ok(());
            };
            let target_context = context
                .with_predicate(&predicate)
                .with_context("relationship target");
            let Some(target) = session.resolve_obo(target, target_context)? else {
                return Ok(());
            };
            check_typedef(&predicate, declarations, session);
            let annotations = read_modifiers(modifiers, context, session)?;
            parsed
                .stanza_mut()
                .append_relationship_annotated(predicate, target, annotations);
        }
        Tag::PropertyValue => {
            if let Some((predicate, value, annotations)) =
                parse_property_value(value, Some(&node), session)?
            {
                parsed
                    .stanza_mut()
                    .append_property_annotated(predicate, value, annotations);
            }
        }
        Tag::CreatedBy => {
            parsed.stanza_mut().append_created_by(value);
        }
        Tag::CreationDate => {
            let date = parse_date_time(value)
                .ok_or_else(|| OboSyntaxError::new(format!("could not parse date {value}")))?;
            parsed.stanza_mut().append_creation_date(date);
        }
        Tag::Flag(flag) => {
            let value = match value.trim() {
                "true" => true,
                "false" => false,
                other => {
                    return Err(
                        OboSyntaxError::new(format!("invalid boolean value {other}")).into()
                    );
                }
            };
            parsed.stanza_mut().set_flag(flag, value);
        }
        Tag::Domain
        | Tag::Range
        | Tag::InverseOf
        | Tag::TransitiveOver
        | Tag::DisjointOver
        | Tag::HoldsOverChain
        | Tag::EquivalentToChain => {
            let ParsedStanza::TypeDef(typedef) = parsed else {
                return Ok(());
            };
            read_typedef_value(tag, value, typedef, context, session)?;
        }
    }
    Ok(())
}

fn read_typedef_value(
    tag: Tag,
    value: &str,
    typedef: &mut TypeDef,
    context: ParseContext<'_>,
    session: &mut ParseSession<'_>,
) -> Result<(), OboParseError> {
    let (body, _) = split_modifiers(value);
    if matches!(tag, Tag::HoldsOverChain | Tag::EquivalentToChain) {
        let mut chain = Vec::new();
        for element in body.split_whitespace() {
            let Some(element) = session.resolve_obo(element, context)? else {
                return Ok(());
            };
            chain.push(element);
        }
        if chain.len() < 2 {
            return Err(OboSyntaxError::new("a property chain needs at least two elements").into());
        }
        if tag == Tag::HoldsOverChain {
            typedef.append_holds_over_chain(chain);
        } else {
            typedef.append_equivalent_to_chain(chain);
        }
        return Ok(());
    }
    let Some(reference) = session.resolve_obo(body, context)? else {
        return Ok(());
    };
    match tag {
        Tag::Domain => typedef.set_domain(reference),
        Tag::Range => typedef.set_range(reference),
        Tag::InverseOf => typedef.set_inverse(reference),
        Tag::TransitiveOver => typedef.append_transitive_over(reference),
        _ => typedef.append_disjoint_over(reference),
    };
    Ok(())
}

/// Reads `"name" [SCOPE] [type] [provenance] {modifiers}`.
fn read_synonym(
    value: &str,
    node: &Reference,
    declarations: &Declarations,
    context: ParseContext<'_>,
    session: &mut ParseSession<'_>,
) -> Result<Option<Synonym>, OboParseError> {
    let (name, rest) =
        split_quoted(value).ok_or_else(|| OboSyntaxError::new("synonym is not a quoted string"))?;
    let mut synonym = Synonym::new(unescape(name));
    let (mut rest, modifiers) = split_modifiers(rest);

    if !rest.starts_with('[') {
        let (token, after) = split_token(rest);
        if let Ok(specificity) = Specificity::from_str(token) {
            synonym = synonym.with_specificity(specificity);
            rest = after;
        }
    }

    if !rest.is_empty() && !rest.starts_with('[') {
        let (token, after) = split_token(rest);
        if let Some(synonym_type) = declarations.synonym_type(token) {
            synonym = synonym.with_type(synonym_type.clone());
        } else if synonym.specificity().is_none()
            && token.chars().all(|c| c.is_ascii_uppercase() || c == '_')
        {
            return Err(OboSyntaxError::new(format!("unknown synonym specificity {token}")).into());
        } else {
            match session.resolve(token, context.with_context("synonym type")) {
                Ok(Resolved::Reference(synonym_type)) => {
                    session.warn_once(token, || {
                        format!("[{node}] synonym type {token} is not declared in the header")
                    });
                    synonym = synonym.with_type(synonym_type);
                }
                Ok(Resolved::Blocked) => (),
                Err(_) => session.warn_once(token, || {
                    format!("[{node}] unable to parse synonym type {token}")
                }),
            }
        }
        rest = after;
    }

    if !rest.is_empty() {
        let (list, after) = split_bracketed(rest)
            .ok_or_else(|| OboSyntaxError::new("missing closing square bracket in references"))?;
        for provenance in read_provenance(list, context, session)? {
            synonym = synonym.with_provenance(provenance);
        }
        if !after.is_empty() {
            tracing::debug!(node = %node, line = value, "ignoring trailing content in synonym");
        }
    }

    for annotation in read_modifiers(modifiers, context, session)? {
        synonym = synonym.with_annotation(annotation);
    }
    Ok(Some(synonym))
}

/// Reads `CURIE ["description"] [provenance] {modifiers}` and files it through the xref macros.
fn read_xref(
    value: &str,
    parsed: &mut ParsedStanza,
    header: &OboHeader,
    context: ParseContext<'_>,
    session: &mut ParseSession<'_>,
) -> Result<(), OboParseError> {
    let (body, modifiers) = split_modifiers(value);
    let (xref, mut rest) = split_token(body);
    if !xref.contains(':') || session.rules().is_blocked(xref, Some(session.ontology_prefix())) {
        return Ok(());
    }
    if rest.starts_with('"') {
        rest = split_quoted(rest).map_or("", |(_, after)| after);
    } else if rest.starts_with('(') {
        rest = rest.find(')').map_or("", move |i| rest[i + 1..].trim_start());
    }
    let provenance = if rest.is_empty() {
        Vec::new()
    } else if let Some((list, _)) = split_bracketed(rest) {
        read_provenance(list, context, session)?
    } else {
        tracing::debug!(line = value, "problem with space in xref");
        return Ok(());
    };
    let reference = match session.resolve(xref, context.with_context("xref"))? {
        Resolved::Reference(reference) => reference,
        Resolved::Blocked => return Ok(()),
    };
    let modifiers = read_modifiers(modifiers, context, session)?;
    header
        .macros
        .apply(parsed.stanza_mut(), reference, provenance, modifiers, session);
    Ok(())
}

/// Reads a comma separated list of references or quoted strings.
fn read_provenance(
    list: &str,
    context: ParseContext<'_>,
    session: &mut ParseSession<'_>,
) -> Result<Vec<Value>, OboParseError> {
    let mut provenance = Vec::new();
    for element in split_outside_quotes(list, ',') {
        if let Some((text, _)) = split_quoted(element) {
            provenance.push(Literal::new_simple_literal(unescape(text)).into());
            continue;
        }
        match session.resolve(element, context.with_context("provenance")) {
            Ok(Resolved::Reference(reference)) => provenance.push(reference.into()),
            Ok(Resolved::Blocked) => (),
            Err(error) => session.recover(error)?,
        }
    }
    Ok(provenance)
}

/// Reads the content of a trailing `{key=value, ...}` block.
fn read_modifiers(
    modifiers: Option<&str>,
    context: ParseContext<'_>,
    session: &mut ParseSession<'_>,
) -> Result<Vec<Annotation>, OboParseError> {
    let Some(modifiers) = modifiers else {
        return Ok(Vec::new());
    };
    let mut annotations = Vec::new();
    for pair in split_outside_quotes(modifiers, ',') {
        let Some((key, value)) = pair.split_once('=') else {
            session.recover(OboSyntaxError::new("modifier is missing a '='").with_line(pair))?;
            continue;
        };
        let Some(key) = session.resolve_obo(key.trim(), context.with_context("modifier key"))?
        else {
            continue;
        };
        let value = value.trim();
        let value: Value = if let Some((text, _)) = split_quoted(value) {
            let text = unescape(text);
            match session.resolve(&text, context) {
                Ok(Resolved::Reference(reference)) => reference.into(),
                _ => Literal::new_simple_literal(text).into(),
            }
        } else {
            match session.resolve(value, context) {
                Ok(Resolved::Reference(reference)) => reference.into(),
                Ok(Resolved::Blocked) => continue,
                Err(_) => Literal::new_simple_literal(value).into(),
            }
        };
        annotations.push(Annotation::new(key, value));
    }
    Ok(annotations)
}

/// Reads `predicate value [datatype] {modifiers}`.
pub(crate) fn parse_property_value(
    line: &str,
    node: Option<&Reference>,
    session: &mut ParseSession<'_>,
) -> Result<Option<(Reference, Value, Vec<Annotation>)>, OboParseError> {
    let mut context = ParseContext::new()
        .with_tag("property_value")
        .with_line(line);
    if let Some(node) = node {
        context = context.with_node(node);
    }
    let (body, modifiers) = split_modifiers(line);
    let (predicate, rest) = split_token(body);
    if rest.is_empty() {
        session.recover(
            OboSyntaxError::new("property_value is missing a value")
                .with_tag("property_value")
                .with_line(line)
                .with_node(node),
        )?;
        return Ok(None);
    }
    let predicate = match default_property(predicate, session.ontology_prefix()) {
        Some(predicate) => predicate,
        None => {
            let Some(predicate) =
                session.resolve_obo(predicate, context.with_context("property predicate"))?
            else {
                return Ok(None);
            };
            predicate
        }
    };
    let context = context.with_predicate(&predicate);

    let (raw_value, datatype, quoted) = if let Some((raw_value, after)) = split_quoted(rest) {
        if raw_value.is_empty() {
            return Ok(None);
        }
        (unescape(raw_value), after, true)
    } else {
        let (raw_value, after) = split_token(rest);
        (raw_value.to_owned(), after, false)
    };
    let datatype = if datatype.is_empty() {
        None
    } else {
        match session.resolve(datatype, context.with_context("property datatype")) {
            Ok(Resolved::Reference(datatype)) => Some(datatype),
            Ok(Resolved::Blocked) => return Ok(None),
            Err(error) => {
                session.recover(error)?;
                return Ok(None);
            }
        }
    };

    let object_context = context.with_context("property object");
    let value: Value = match datatype {
        Some(datatype) if datatype == xsd::DATE_TIME => {
            let Some(date) = parse_date_time(&raw_value) else {
                session.recover(
                    OboSyntaxError::new(format!("could not parse date {raw_value}"))
                        .with_tag("property_value")
                        .with_line(line)
                        .with_node(node),
                )?;
                return Ok(None);
            };
            Literal::from(date).into()
        }
        Some(datatype) if datatype == xsd::ANY_URI => {
            match session.resolve(&raw_value, object_context) {
                Ok(Resolved::Reference(reference)) => reference.into(),
                Ok(Resolved::Blocked) => return Ok(None),
                Err(error) if error.kind() == ParseErrorKind::UnparsableIri => {
                    Literal::uri(raw_value).into()
                }
                Err(error) => {
                    session.recover(error)?;
                    return Ok(None);
                }
            }
        }
        Some(datatype) => Literal::new_typed_literal(raw_value, datatype).into(),
        None => match session.resolve(&raw_value, object_context) {
            Ok(Resolved::Reference(reference)) => reference.into(),
            Ok(Resolved::Blocked) => return Ok(None),
            Err(error) => {
                if !quoted {
                    tracing::debug!(%error, "keeping unquoted property value as a string");
                }
                Literal::new_simple_literal(raw_value).into()
            }
        },
    };
    let annotations = read_modifiers(modifiers, context, session)?;
    Ok(Some((predicate, value, annotations)))
}

/// Turns `http://purl.obolibrary.org/obo/{ontology}#{local}` into a default reference.
fn default_property(predicate: &str, ontology_prefix: &str) -> Option<Reference> {
    let local = predicate
        .strip_prefix("http://purl.obolibrary.org/obo/")?
        .strip_prefix(ontology_prefix)?;
    let local = local.strip_prefix('#').or_else(|| local.strip_prefix('/'))?;
    Some(Reference::default_for(ontology_prefix, local))
}

/// Parses a `xsd:dateTime`, accepting bare dates as midnight UTC.
fn parse_date_time(value: &str) -> Option<DateTime> {
    let value = value.trim();
    DateTime::from_str(value)
        .or_else(|_| DateTime::from_str(&format!("{value}T00:00:00Z")))
        .ok()
}

fn check_typedef(predicate: &Reference, declarations: &Declarations, session: &mut ParseSession<'_>) {
    if predicate.prefix() == obo::PREFIX
        && !declarations.is_declared(predicate)
        && session.note_missing_typedef(predicate)
    {
        tracing::warn!(ontology = %session.ontology_prefix(), "has no typedef for {predicate}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    #[test]
    fn tag_names() {
        for name in ["is_a", "property_value", "holds_over_chain", "is_obsolete", "builtin"] {
            assert_eq!(name, Tag::from_name(name).unwrap().as_str());
        }
        assert_eq!(None, Tag::from_name("nope"));
        assert!(Tag::Domain.is_typedef_only());
        assert!(Tag::Flag(Flag::Transitive).is_typedef_only());
        assert!(!Tag::Flag(Flag::Obsolete).is_typedef_only());
    }

    fn property(line: &str) -> Option<(Reference, Value, Vec<Annotation>)> {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "go").strict(true);
        parse_property_value(line, None, &mut session).unwrap()
    }

    #[test]
    fn property_values() {
        let (predicate, value, _) = property("dcterms:contributor orcid:0000-0003-4423-4370").unwrap();
        assert_eq!(Reference::new_unchecked("dcterms", "contributor"), predicate);
        assert_eq!(
            Value::Reference(Reference::new_unchecked("orcid", "0000-0003-4423-4370")),
            value
        );

        let (_, value, _) = property("rdfs:comment \"some text\" xsd:string").unwrap();
        assert_eq!(Value::Literal(Literal::new_simple_literal("some text")), value);

        let (_, value, _) = property("rdfs:seeAlso \"GO:0050069\"").unwrap();
        assert_eq!(Value::Reference(Reference::new_unchecked("go", "0050069")), value);

        let (_, value, _) = property("rdfs:seeAlso \"https://example.com\" xsd:anyURI").unwrap();
        assert_eq!(Value::Literal(Literal::uri("https://example.com")), value);

        let (_, value, _) = property("oboInOwl:creation_date \"2020-01-02\" xsd:dateTime").unwrap();
        assert_eq!(
            Value::Literal(Literal::from(DateTime::from_str("2020-01-02T00:00:00Z").unwrap())),
            value
        );

        let (predicate, _, _) = property("http://purl.obolibrary.org/obo/go#foo \"x\"").unwrap();
        assert_eq!(Reference::default_for("go", "foo"), predicate);

        assert_eq!(None, property("rdfs:comment \"\""));
    }

    #[test]
    fn property_value_modifiers() {
        let (_, _, annotations) =
            property("rdfs:seeAlso GO:0050069 {dcterms:contributor=orcid:1, rdfs:comment=\"hi\"}")
                .unwrap();
        assert_eq!(
            vec![
                Annotation::new(
                    Reference::new_unchecked("dcterms", "contributor"),
                    Reference::new_unchecked("orcid", "1")
                ),
                Annotation::new(
                    Reference::new_unchecked("rdfs", "comment"),
                    Literal::new_simple_literal("hi")
                ),
            ],
            annotations
        );
    }
}
