use crate::error::{OboParseError, OboSyntaxError};
use crate::reference::{Annotation, Reference, Value};
use crate::resolver::ParseContext;
use crate::session::ParseSession;
use crate::stanza::Stanza;
use crate::tokenizer::TagValues;
use crate::vocab::{PROVENANCE_PREFIXES, oboinowl};
use std::collections::{BTreeMap, BTreeSet};

/// The `treat-xrefs-as-*` header directives, keyed by normalized xref prefix.
///
/// An xref whose prefix is configured here is turned into a logical axiom instead of a plain xref.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MacroConfig {
    pub treat_xrefs_as_equivalent: BTreeSet<String>,
    /// Prefix to the `(predicate, target)` differentia added next to the xref genus.
    pub treat_xrefs_as_genus_differentia: BTreeMap<String, (Reference, Reference)>,
    pub treat_xrefs_as_relationship: BTreeMap<String, Reference>,
    pub treat_xrefs_as_is_a: BTreeSet<String>,
}

impl MacroConfig {
    pub fn is_empty(&self) -> bool {
        self.treat_xrefs_as_equivalent.is_empty()
            && self.treat_xrefs_as_genus_differentia.is_empty()
            && self.treat_xrefs_as_relationship.is_empty()
            && self.treat_xrefs_as_is_a.is_empty()
    }

    /// Reads the directives from the header tags.
    ///
    /// Unknown prefixes are skipped silently, malformed lines follow the session failure policy.
    pub(crate) fn from_header(
        header: &TagValues,
        session: &mut ParseSession<'_>,
    ) -> Result<Self, OboParseError> {
        let mut config = Self::default();
        for prefix in header.get("treat-xrefs-as-equivalent") {
            if let Some(prefix) = normalize(session, prefix) {
                config.treat_xrefs_as_equivalent.insert(prefix);
            }
        }
        for prefix in header.get("treat-xrefs-as-is_a") {
            if let Some(prefix) = normalize(session, prefix) {
                config.treat_xrefs_as_is_a.insert(prefix);
            }
        }
        let tag = "treat-xrefs-as-genus-differentia";
        for line in header.get(tag) {
            let [prefix, predicate, target] = line.split_whitespace().collect::<Vec<_>>()[..]
            else {
                session.recover(
                    OboSyntaxError::new("expected a prefix, a predicate and a target")
                        .with_tag(tag)
                        .with_line(line),
                )?;
                continue;
            };
            let Some(prefix) = normalize(session, prefix) else {
                continue;
            };
            let context = ParseContext::new().with_tag(tag).with_line(line);
            let Some(predicate) = session.resolve_obo(predicate, context)? else {
                continue;
            };
            let Some(target) = session.resolve_obo(target, context.with_predicate(&predicate))?
            else {
                continue;
            };
            config
                .treat_xrefs_as_genus_differentia
                .insert(prefix, (predicate, target));
        }
        let tag = "treat-xrefs-as-relationship";
        for line in header.get(tag) {
            let [prefix, predicate] = line.split_whitespace().collect::<Vec<_>>()[..] else {
                session.recover(
                    OboSyntaxError::new("expected a prefix and a predicate")
                        .with_tag(tag)
                        .with_line(line),
                )?;
                continue;
            };
            let Some(prefix) = normalize(session, prefix) else {
                continue;
            };
            let context = ParseContext::new().with_tag(tag).with_line(line);
            if let Some(predicate) = session.resolve_obo(predicate, context)? {
                config.treat_xrefs_as_relationship.insert(prefix, predicate);
            }
        }
        Ok(config)
    }

    /// Adds an xref to a stanza, rewriting it if a directive applies to its prefix.
    ///
    /// The rules are tried in order: equivalence, genus-differentia, relationship and is_a.
    /// Xrefs to citation namespaces become stanza provenance.
    /// The bracketed provenance values become `oboInOwl:hasDbXref` annotations on the new edge.
    pub(crate) fn apply(
        &self,
        stanza: &mut Stanza,
        xref: Reference,
        provenance: Vec<Value>,
        modifiers: Vec<Annotation>,
        session: &mut ParseSession<'_>,
    ) {
        let annotations = provenance
            .into_iter()
            .map(|value| Annotation::new(oboinowl::HAS_DBXREF, value))
            .chain(modifiers)
            .collect::<Vec<_>>();
        if self.treat_xrefs_as_equivalent.contains(xref.prefix()) {
            stanza.append_equivalent_annotated(xref, annotations);
        } else if let Some((predicate, target)) =
            self.treat_xrefs_as_genus_differentia.get(xref.prefix())
        {
            if !annotations.is_empty() {
                let node = stanza.reference().clone();
                session.warn_once(&xref.to_string(), || {
                    format!("[{node}] unable to add provenance to xref upgraded to intersection_of: {xref}")
                });
            }
            stanza
                .append_intersection_of(xref)
                .append_intersection_of((predicate.clone(), target.clone()));
        } else if let Some(predicate) = self.treat_xrefs_as_relationship.get(xref.prefix()) {
            stanza.append_relationship_annotated(predicate.clone(), xref, annotations);
        } else if self.treat_xrefs_as_is_a.contains(xref.prefix()) {
            stanza.append_parent_annotated(xref, annotations);
        } else if PROVENANCE_PREFIXES.contains(&xref.prefix()) {
            stanza.append_provenance_annotated(xref, annotations);
        } else {
            stanza.append_xref_annotated(xref, annotations);
        }
    }
}

fn normalize(session: &ParseSession<'_>, prefix: &str) -> Option<String> {
    let normalized = session.registry().normalize_prefix(prefix.trim());
    if normalized.is_none() {
        tracing::debug!(ontology = %session.ontology_prefix(), prefix, "ignoring macro on unknown prefix");
    }
    normalized.map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    fn config(header: &[(&str, &str)]) -> MacroConfig {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "uberon");
        MacroConfig::from_header(&header.iter().copied().collect(), &mut session).unwrap()
    }

    #[test]
    fn directives() {
        let config = config(&[
            ("treat-xrefs-as-is_a", "CL"),
            ("treat-xrefs-as-equivalent", "GO"),
            ("treat-xrefs-as-genus-differentia", "CL part_of NCBITaxon:7955"),
            ("treat-xrefs-as-relationship", "MESH has_related"),
            ("treat-xrefs-as-is_a", "NOPE"),
            ("treat-xrefs-as-genus-differentia", "CARO part_of NCBITaxon:79327; CL part_of"),
        ]);
        assert!(config.treat_xrefs_as_is_a.contains("cl"));
        assert_eq!(1, config.treat_xrefs_as_is_a.len());
        assert!(config.treat_xrefs_as_equivalent.contains("go"));
        assert_eq!(
            Some(&(
                Reference::default_for("uberon", "part_of"),
                Reference::new_unchecked("ncbitaxon", "7955")
            )),
            config.treat_xrefs_as_genus_differentia.get("cl")
        );
        assert_eq!(
            Some(&Reference::default_for("uberon", "has_related")),
            config.treat_xrefs_as_relationship.get("mesh")
        );
    }

    #[test]
    fn rewriting() {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "uberon");
        let config = config(&[("treat-xrefs-as-is_a", "CL")]);
        let mut stanza = Stanza::new(Reference::new_unchecked("uberon", "0000001"));
        let cell = Reference::new_unchecked("cl", "0000540");
        config.apply(&mut stanza, cell.clone(), Vec::new(), Vec::new(), &mut session);
        config.apply(
            &mut stanza,
            Reference::new_unchecked("pubmed", "123"),
            Vec::new(),
            Vec::new(),
            &mut session,
        );
        config.apply(
            &mut stanza,
            Reference::new_unchecked("mesh", "D1"),
            Vec::new(),
            Vec::new(),
            &mut session,
        );
        assert_eq!(&[cell], stanza.parents());
        assert_eq!(&[Reference::new_unchecked("pubmed", "123")], stanza.provenance());
        assert_eq!(&[Reference::new_unchecked("mesh", "D1")], stanza.xrefs());
    }

    #[test]
    fn provenance_keeps_annotations() {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "uberon");
        let mut stanza = Stanza::new(Reference::new_unchecked("uberon", "0000001"));
        let pubmed = Reference::new_unchecked("pubmed", "123");
        let source = Value::from(Reference::new_unchecked("orcid", "0000-0003-4423-4370"));
        MacroConfig::default().apply(
            &mut stanza,
            pubmed.clone(),
            vec![source.clone()],
            Vec::new(),
            &mut session,
        );
        assert_eq!(&[pubmed.clone()], stanza.provenance());
        assert_eq!(
            &[Annotation::new(oboinowl::HAS_DBXREF, source)],
            stanza.axioms(&oboinowl::HAS_DBXREF.into(), &pubmed.into())
        );
    }
}
