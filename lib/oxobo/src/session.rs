use crate::error::{OboParseError, ParseError, ParseErrorKind};
use crate::reference::Reference;
use crate::registry::Registry;
use crate::resolver::{self, ParseContext, Resolved};
use crate::rules::Rules;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::OnceLock;

/// The mutable state of one top-level parse.
///
/// It holds the warning deduplication counters, the default reference cache and the set of
/// predicates already reported as lacking a typedef. Independent sessions share nothing but
/// the read-only registry and rules, so several ontologies can be parsed in parallel.
///
/// ```
/// use oxobo::{MemoryRegistry, ParseContext, ParseSession};
///
/// let registry = MemoryRegistry::obo_defaults();
/// let mut session = ParseSession::new(&registry, "go");
/// let part_of = session.resolve_obo("part_of", ParseContext::new())?;
/// assert_eq!("obo:go#part_of", part_of.unwrap().to_string());
///
/// // Lenient sessions drop unresolvable values and warn once per text
/// assert_eq!(None, session.resolve_obo("nope:1", ParseContext::new())?);
/// assert_eq!(None, session.resolve_obo("nope:1", ParseContext::new())?);
/// assert_eq!(2, session.warning_count("nope:1"));
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct ParseSession<'a> {
    registry: &'a (dyn Registry + Sync),
    rules: Option<&'a Rules>,
    ontology_prefix: String,
    strict: bool,
    upgrade: bool,
    warnings: FxHashMap<(String, String), usize>,
    default_references: FxHashMap<String, Reference>,
    missing_typedefs: FxHashSet<Reference>,
}

impl<'a> ParseSession<'a> {
    pub fn new(registry: &'a (dyn Registry + Sync), ontology_prefix: impl Into<String>) -> Self {
        Self {
            registry,
            rules: None,
            ontology_prefix: ontology_prefix.into(),
            strict: false,
            upgrade: true,
            warnings: FxHashMap::default(),
            default_references: FxHashMap::default(),
            missing_typedefs: FxHashSet::default(),
        }
    }

    /// Surfaces the first unresolvable value as an error instead of dropping it.
    #[inline]
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enables the rewrite rules and relation groundings (on by default).
    #[inline]
    #[must_use]
    pub fn upgrade(mut self, upgrade: bool) -> Self {
        self.upgrade = upgrade;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_rules(mut self, rules: &'a Rules) -> Self {
        self.rules = Some(rules);
        self
    }

    #[inline]
    pub fn registry(&self) -> &'a (dyn Registry + Sync) {
        self.registry
    }

    #[inline]
    pub fn rules(&self) -> &'a Rules {
        self.rules.unwrap_or_else(|| empty_rules())
    }

    #[inline]
    pub fn ontology_prefix(&self) -> &str {
        &self.ontology_prefix
    }

    pub(crate) fn set_ontology_prefix(&mut self, ontology_prefix: impl Into<String>) {
        self.ontology_prefix = ontology_prefix.into();
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Resolves a string to a reference without default reference coercion.
    pub fn resolve(&self, text: &str, context: ParseContext<'_>) -> Result<Resolved, ParseError> {
        resolver::resolve(
            self.registry,
            self.rules(),
            text,
            Some(&self.ontology_prefix),
            self.upgrade,
        )
        .map_err(|e| context.decorate(e).in_ontology(&self.ontology_prefix))
    }

    /// Resolves a string like [`resolve`](Self::resolve) but turns bare local identifiers
    /// into ontology-scoped default references.
    pub fn try_resolve_obo(
        &mut self,
        text: &str,
        context: ParseContext<'_>,
    ) -> Result<Resolved, ParseError> {
        match self.resolve(text, context) {
            Err(error) if error.kind() == ParseErrorKind::NotCurie => {
                let text = text.trim();
                if let Some(reference) = self.default_references.get(text) {
                    return Ok(Resolved::Reference(reference.clone()));
                }
                if !resolver::is_valid_local_identifier(text) {
                    return Err(context
                        .decorate(ParseError::new(ParseErrorKind::DefaultCoercion, text))
                        .in_ontology(&self.ontology_prefix));
                }
                let reference = Reference::default_for(&self.ontology_prefix, text);
                self.default_references
                    .insert(text.to_owned(), reference.clone());
                Ok(Resolved::Reference(reference))
            }
            result => result,
        }
    }

    /// Resolves a string with default reference coercion, applying the failure policy.
    ///
    /// Returns `Ok(None)` for blocked values and, in lenient mode, for unresolvable ones.
    pub fn resolve_obo(
        &mut self,
        text: &str,
        context: ParseContext<'_>,
    ) -> Result<Option<Reference>, OboParseError> {
        match self.try_resolve_obo(text, context) {
            Ok(resolved) => Ok(resolved.into_reference()),
            Err(error) => {
                self.recover(error)?;
                Ok(None)
            }
        }
    }

    /// Applies the failure policy to an error.
    ///
    /// Strict sessions return the error, lenient ones log it once per `(ontology, text)` key.
    pub fn recover(&mut self, error: impl Into<OboParseError>) -> Result<(), OboParseError> {
        let error = error.into();
        if self.strict {
            return Err(error);
        }
        let text = match &error {
            OboParseError::Reference(e) => e.text().to_owned(),
            OboParseError::Syntax(e) => e.line().unwrap_or(e.message()).to_owned(),
            OboParseError::Io(_) => return Err(error),
        };
        let count = self
            .warnings
            .entry((self.ontology_prefix.clone(), text))
            .or_default();
        *count += 1;
        if *count == 1 {
            tracing::warn!(ontology = %self.ontology_prefix, "{error}");
        }
        Ok(())
    }

    /// Logs a warning once per `(ontology, key)`.
    pub fn warn_once(&mut self, key: &str, message: impl FnOnce() -> String) {
        let count = self
            .warnings
            .entry((self.ontology_prefix.clone(), key.to_owned()))
            .or_default();
        *count += 1;
        if *count == 1 {
            tracing::warn!(ontology = %self.ontology_prefix, "{}", message());
        }
    }

    /// Records that a predicate has no typedef. Returns `true` the first time.
    pub fn note_missing_typedef(&mut self, predicate: &Reference) -> bool {
        self.missing_typedefs.insert(predicate.clone())
    }

    /// How many times a text has been reported for the current ontology.
    pub fn warning_count(&self, text: &str) -> usize {
        self.warnings
            .get(&(self.ontology_prefix.clone(), text.to_owned()))
            .copied()
            .unwrap_or(0)
    }

    /// The predicates used without a typedef, in no particular order.
    pub fn missing_typedefs(&self) -> impl Iterator<Item = &Reference> {
        self.missing_typedefs.iter()
    }
}

fn empty_rules() -> &'static Rules {
    static EMPTY: OnceLock<Rules> = OnceLock::new();
    EMPTY.get_or_init(Rules::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    #[test]
    fn strict_sessions_fail() {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "go").strict(true);
        let error = session
            .resolve_obo("nope:1", ParseContext::new().with_tag("xref"))
            .unwrap_err();
        let OboParseError::Reference(error) = error else {
            panic!("unexpected error {error}")
        };
        assert_eq!(ParseErrorKind::UnregisteredPrefix, error.kind());
        assert_eq!(Some("go"), error.ontology_prefix());
        assert_eq!(Some("xref"), error.tag());
    }

    #[test]
    fn default_coercion() {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "go").strict(true);
        assert_eq!(
            ParseErrorKind::DefaultCoercion,
            session
                .try_resolve_obo("has part", ParseContext::new())
                .unwrap_err()
                .kind()
        );
        assert_eq!(
            Resolved::Reference(Reference::default_for("go", "has_part")),
            session
                .try_resolve_obo("has_part", ParseContext::new())
                .unwrap()
        );
    }

    #[test]
    fn missing_typedefs_are_reported_once() {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "go");
        let predicate = Reference::default_for("go", "part_of");
        assert!(session.note_missing_typedef(&predicate));
        assert!(!session.note_missing_typedef(&predicate));
    }
}
