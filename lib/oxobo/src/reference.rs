use crate::error::ParseError;
use crate::registry::Registry;
use crate::vocab::{obo, xsd};
use oxsdatatypes::DateTime;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An owned reference to an ontology entity, i.e. a `prefix:identifier` pair with an optional label.
///
/// Equality, hashing and ordering only consider the prefix and the identifier:
/// ```
/// use oxobo::Reference;
///
/// let lysine = Reference::new_unchecked("go", "0050069").with_name("lysine dehydrogenase activity");
/// assert_eq!(lysine, Reference::new_unchecked("go", "0050069"));
/// assert_eq!("go:0050069", lysine.to_string());
/// ```
///
/// [`Reference::from_curie`] should be used to build references from untrusted strings
/// so that the prefix goes through registry normalization.
#[derive(Debug, Clone)]
pub struct Reference {
    prefix: String,
    identifier: String,
    name: Option<String>,
}

impl Reference {
    /// Builds a reference without any registry check.
    ///
    /// It is the caller's responsibility to ensure that `prefix` is already normalized.
    #[inline]
    pub fn new_unchecked(prefix: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            identifier: identifier.into(),
            name: None,
        }
    }

    /// Parses a CURIE and normalizes its prefix with the given registry.
    ///
    /// ```
    /// use oxobo::{MemoryRegistry, Reference};
    ///
    /// let registry = MemoryRegistry::obo_defaults();
    /// let reference = Reference::from_curie(&registry, "GO:0050069")?;
    /// assert_eq!("go", reference.prefix());
    /// assert_eq!("0050069", reference.identifier());
    /// # Result::<_,Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn from_curie(registry: &(impl Registry + ?Sized), curie: &str) -> Result<Self, ParseError> {
        crate::resolver::parse_curie(registry, curie)
    }

    /// Builds the ontology-scoped default reference used for local identifiers without a prefix,
    /// e.g. `part_of` in a `go` document becomes `obo:go#part_of`.
    pub fn default_for(ontology_prefix: &str, local: &str) -> Self {
        Self::new_unchecked(obo::PREFIX, format!("{ontology_prefix}#{local}"))
    }

    /// Returns the local part if this is a default reference of the given ontology.
    pub fn default_local(&self, ontology_prefix: &str) -> Option<&str> {
        if self.prefix != obo::PREFIX {
            return None;
        }
        self.identifier
            .strip_prefix(ontology_prefix)?
            .strip_prefix('#')
    }

    /// Sets the human readable label of the reference.
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// The CURIE using the normalized prefix.
    #[inline]
    pub fn curie(&self) -> String {
        self.to_string()
    }

    /// The CURIE using the registry preferred prefix (e.g. `GO:0050069` instead of `go:0050069`).
    pub fn preferred_curie(&self, registry: &(impl Registry + ?Sized)) -> String {
        let prefix = registry
            .preferred_prefix(&self.prefix)
            .unwrap_or(&self.prefix);
        format!("{prefix}:{}", self.identifier)
    }

    #[inline]
    pub fn as_ref(&self) -> ReferenceRef<'_> {
        ReferenceRef::new_unchecked(&self.prefix, &self.identifier)
    }

    /// Folds the prefix to lower case, the form every registry-normalized prefix has.
    ///
    /// ```
    /// use oxobo::Reference;
    ///
    /// let chebi = Reference::new_unchecked("CHEBI", "1").normalized();
    /// assert_eq!("chebi", chebi.prefix());
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.prefix.bytes().any(|b| b.is_ascii_uppercase()) {
            self.prefix.make_ascii_lowercase();
        }
        self
    }
}

impl PartialEq for Reference {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.identifier == other.identifier
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.prefix.hash(state);
        self.identifier.hash(state);
    }
}

impl PartialOrd for Reference {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reference {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.prefix, &self.identifier).cmp(&(&other.prefix, &other.identifier))
    }
}

impl fmt::Display for Reference {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

impl PartialEq<ReferenceRef<'_>> for Reference {
    #[inline]
    fn eq(&self, other: &ReferenceRef<'_>) -> bool {
        self.as_ref() == *other
    }
}

impl PartialEq<Reference> for ReferenceRef<'_> {
    #[inline]
    fn eq(&self, other: &Reference) -> bool {
        *self == other.as_ref()
    }
}

impl From<ReferenceRef<'_>> for Reference {
    #[inline]
    fn from(reference: ReferenceRef<'_>) -> Self {
        reference.into_owned()
    }
}

/// A borrowed [`Reference`], without label.
///
/// Used for the vocabulary constants in [`vocab`](crate::vocab).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct ReferenceRef<'a> {
    prefix: &'a str,
    identifier: &'a str,
}

impl<'a> ReferenceRef<'a> {
    #[inline]
    pub const fn new_unchecked(prefix: &'a str, identifier: &'a str) -> Self {
        Self { prefix, identifier }
    }

    #[inline]
    pub const fn prefix(self) -> &'a str {
        self.prefix
    }

    #[inline]
    pub const fn identifier(self) -> &'a str {
        self.identifier
    }

    #[inline]
    pub fn into_owned(self) -> Reference {
        Reference::new_unchecked(self.prefix, self.identifier)
    }
}

impl fmt::Display for ReferenceRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.identifier)
    }
}

/// A typed scalar value.
///
/// ```
/// use oxobo::Literal;
/// use oxobo::vocab::xsd;
///
/// let literal = Literal::from(true);
/// assert_eq!("true", literal.value());
/// assert_eq!(xsd::BOOLEAN, *literal.datatype());
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Literal {
    value: String,
    datatype: Reference,
    language: Option<String>,
}

impl Literal {
    /// Builds a `xsd:string` literal.
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self::new_typed_literal(value, xsd::STRING.into_owned())
    }

    #[inline]
    pub fn new_typed_literal(value: impl Into<String>, datatype: Reference) -> Self {
        Self {
            value: value.into(),
            datatype,
            language: None,
        }
    }

    /// Builds a `xsd:string` literal with a language tag.
    #[inline]
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            datatype: xsd::STRING.into_owned(),
            language: Some(language.into()),
        }
    }

    /// Builds a `xsd:gYear` literal.
    #[inline]
    pub fn year(year: i32) -> Self {
        Self::new_typed_literal(year.to_string(), xsd::G_YEAR.into_owned())
    }

    /// Builds a `xsd:anyURI` literal.
    #[inline]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::new_typed_literal(uri, xsd::ANY_URI.into_owned())
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn datatype(&self) -> &Reference {
        &self.datatype
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Checks if the literal is a plain `xsd:string` without language tag.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.language.is_none() && self.datatype == xsd::STRING
    }

    /// Returns the boolean value of a `xsd:boolean` literal.
    pub fn as_bool(&self) -> Option<bool> {
        if self.datatype != xsd::BOOLEAN {
            return None;
        }
        match self.value.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl From<bool> for Literal {
    #[inline]
    fn from(value: bool) -> Self {
        Self::new_typed_literal(value.to_string(), xsd::BOOLEAN.into_owned())
    }
}

impl From<i64> for Literal {
    #[inline]
    fn from(value: i64) -> Self {
        Self::new_typed_literal(value.to_string(), xsd::INTEGER.into_owned())
    }
}

impl From<f64> for Literal {
    #[inline]
    fn from(value: f64) -> Self {
        Self::new_typed_literal(value.to_string(), xsd::FLOAT.into_owned())
    }
}

impl From<DateTime> for Literal {
    #[inline]
    fn from(value: DateTime) -> Self {
        Self::new_typed_literal(value.to_string(), xsd::DATE_TIME.into_owned())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value.replace('\\', "\\\\").replace('"', "\\\""))?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if self.datatype == xsd::STRING {
            Ok(())
        } else {
            write!(f, "^^{}", self.datatype)
        }
    }
}

/// Either an entity [`Reference`] or a scalar [`Literal`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Value {
    Reference(Reference),
    Literal(Literal),
}

impl Value {
    #[inline]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Literal(_) => None,
        }
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Reference(_) => None,
            Self::Literal(literal) => Some(literal),
        }
    }

    /// Normalizes the reference prefix, see [`Reference::normalized`].
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Reference(reference) => Self::Reference(reference.normalized()),
            Self::Literal(_) => self,
        }
    }
}

impl fmt::Display for Value {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(reference) => reference.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<Reference> for Value {
    #[inline]
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl From<ReferenceRef<'_>> for Value {
    #[inline]
    fn from(reference: ReferenceRef<'_>) -> Self {
        Self::Reference(reference.into_owned())
    }
}

impl From<Literal> for Value {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// A `(predicate, value)` pair.
///
/// It is used both for plain property edges and for the secondary annotations attached to an edge.
/// Secondary annotations are never annotated themselves.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Annotation {
    predicate: Reference,
    value: Value,
}

impl Annotation {
    #[inline]
    pub fn new(predicate: impl Into<Reference>, value: impl Into<Value>) -> Self {
        Self {
            predicate: predicate.into().normalized(),
            value: value.into().normalized(),
        }
    }

    #[inline]
    pub fn predicate(&self) -> &Reference {
        &self.predicate
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn into_parts(self) -> (Reference, Value) {
        (self.predicate, self.value)
    }
}

impl fmt::Display for Annotation {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.predicate, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reference() {
        let reference = Reference::default_for("go", "part_of");
        assert_eq!("obo:go#part_of", reference.to_string());
        assert_eq!(Some("part_of"), reference.default_local("go"));
        assert_eq!(None, reference.default_local("chebi"));
    }

    #[test]
    fn name_is_ignored_by_equality() {
        let a = Reference::new_unchecked("chebi", "1").with_name("a");
        let b = Reference::new_unchecked("chebi", "1").with_name("b");
        assert_eq!(a, b);
        assert!(Reference::new_unchecked("chebi", "1") < Reference::new_unchecked("chebi", "2"));
    }

    #[test]
    fn literal_display() {
        assert_eq!("\"a \\\"b\\\"\"", Literal::new_simple_literal("a \"b\"").to_string());
        assert_eq!("\"1\"^^xsd:integer", Literal::from(1_i64).to_string());
        assert_eq!(Some(false), Literal::from(false).as_bool());
    }
}
