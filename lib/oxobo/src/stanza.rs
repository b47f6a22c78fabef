use crate::error::OboSyntaxError;
use crate::reference::{Annotation, Literal, Reference, ReferenceRef, Value};
use crate::vocab::{MATCHING_PREDICATES, dcterms, iao, oboinowl, owl, rdfs, semapv, sssom};
use oxsdatatypes::DateTime;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// The scope of a [`Synonym`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Specificity {
    Exact,
    Broad,
    Narrow,
    Related,
}

impl Specificity {
    pub const ALL: [Self; 4] = [Self::Exact, Self::Broad, Self::Narrow, Self::Related];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::Broad => "BROAD",
            Self::Narrow => "NARROW",
            Self::Related => "RELATED",
        }
    }

    /// The oboInOwl annotation property used for synonyms with this scope.
    #[inline]
    pub fn synonym_predicate(self) -> ReferenceRef<'static> {
        match self {
            Self::Exact => oboinowl::HAS_EXACT_SYNONYM,
            Self::Broad => oboinowl::HAS_BROAD_SYNONYM,
            Self::Narrow => oboinowl::HAS_NARROW_SYNONYM,
            Self::Related => oboinowl::HAS_RELATED_SYNONYM,
        }
    }
}

impl fmt::Display for Specificity {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specificity {
    type Err = OboSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|specificity| specificity.as_str() == s)
            .ok_or_else(|| OboSyntaxError::new(format!("unknown synonym specificity {s}")))
    }
}

/// An alternative label of a stanza.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Synonym {
    name: String,
    specificity: Option<Specificity>,
    synonym_type: Option<Reference>,
    provenance: Vec<Value>,
    annotations: Vec<Annotation>,
}

impl Synonym {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specificity: None,
            synonym_type: None,
            provenance: Vec::new(),
            annotations: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_specificity(mut self, specificity: Specificity) -> Self {
        self.specificity = Some(specificity);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_type(mut self, synonym_type: Reference) -> Self {
        self.synonym_type = Some(synonym_type.normalized());
        self
    }

    #[must_use]
    pub fn with_provenance(mut self, provenance: impl Into<Value>) -> Self {
        let provenance = provenance.into().normalized();
        if !self.provenance.contains(&provenance) {
            self.provenance.push(provenance);
        }
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit scope, if any. OBO considers unscoped synonyms as [`Specificity::Related`].
    #[inline]
    pub fn specificity(&self) -> Option<Specificity> {
        self.specificity
    }

    #[inline]
    pub fn synonym_type(&self) -> Option<&Reference> {
        self.synonym_type.as_ref()
    }

    #[inline]
    pub fn provenance(&self) -> &[Value] {
        &self.provenance
    }

    /// The trailing `{k=v}` annotations.
    #[inline]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A synonym type declared in the document header.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct SynonymTypeDef {
    reference: Reference,
    specificity: Option<Specificity>,
}

impl SynonymTypeDef {
    #[inline]
    pub fn new(reference: Reference, specificity: Option<Specificity>) -> Self {
        Self {
            reference,
            specificity,
        }
    }

    #[inline]
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    #[inline]
    pub fn specificity(&self) -> Option<Specificity> {
        self.specificity
    }
}

/// One element of an `intersection_of` definition.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum IntersectionOf {
    /// A genus class.
    Class(Reference),
    /// A differentia, i.e. an existential restriction on `predicate`.
    Restriction {
        predicate: Reference,
        target: Reference,
    },
}

impl IntersectionOf {
    #[must_use]
    fn normalized(self) -> Self {
        match self {
            Self::Class(class) => Self::Class(class.normalized()),
            Self::Restriction { predicate, target } => Self::Restriction {
                predicate: predicate.normalized(),
                target: target.normalized(),
            },
        }
    }
}

impl From<Reference> for IntersectionOf {
    #[inline]
    fn from(reference: Reference) -> Self {
        Self::Class(reference)
    }
}

impl From<(Reference, Reference)> for IntersectionOf {
    #[inline]
    fn from((predicate, target): (Reference, Reference)) -> Self {
        Self::Restriction { predicate, target }
    }
}

/// A boolean stanza tag.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub enum Flag {
    Anonymous,
    Builtin,
    Obsolete,
    MetadataTag,
    ClassLevel,
    AntiSymmetric,
    Symmetric,
    Reflexive,
    Cyclic,
    Transitive,
    Functional,
    InverseFunctional,
}

impl Flag {
    pub const ALL: [Self; 12] = [
        Self::Anonymous,
        Self::Builtin,
        Self::Obsolete,
        Self::MetadataTag,
        Self::ClassLevel,
        Self::AntiSymmetric,
        Self::Symmetric,
        Self::Reflexive,
        Self::Cyclic,
        Self::Transitive,
        Self::Functional,
        Self::InverseFunctional,
    ];

    /// The OBO tag name.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Anonymous => "is_anonymous",
            Self::Builtin => "builtin",
            Self::Obsolete => "is_obsolete",
            Self::MetadataTag => "is_metadata_tag",
            Self::ClassLevel => "is_class_level",
            Self::AntiSymmetric => "is_anti_symmetric",
            Self::Symmetric => "is_symmetric",
            Self::Reflexive => "is_reflexive",
            Self::Cyclic => "is_cyclic",
            Self::Transitive => "is_transitive",
            Self::Functional => "is_functional",
            Self::InverseFunctional => "is_inverse_functional",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.tag() == tag)
    }

    /// Flags that only make sense on typedefs.
    pub fn is_typedef_only(self) -> bool {
        !matches!(self, Self::Anonymous | Self::Builtin | Self::Obsolete)
    }
}

/// An edge lookup on a stanza failed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{node} has no {predicate} edge to {object}")]
pub struct MissingEdgeError {
    node: Reference,
    predicate: Reference,
    object: Value,
}

/// A mapping extracted by [`Stanza::get_mappings`].
#[derive(PartialEq, Debug, Clone)]
pub struct Mapping {
    pub predicate: Reference,
    pub object: Reference,
    pub context: Option<MappingContext>,
}

/// The justification, confidence and contributor of a mapping.
#[derive(PartialEq, Debug, Clone)]
pub struct MappingContext {
    pub justification: Reference,
    pub confidence: Option<f64>,
    pub contributor: Option<Reference>,
}

/// The content shared by [`Term`] and [`TypeDef`].
///
/// Every mutating method keeps sets duplicate-free and returns the stanza to allow chaining:
/// ```
/// use oxobo::{Reference, Stanza, Synonym, Specificity};
/// use oxobo::vocab::rdfs;
///
/// let mut stanza = Stanza::new(Reference::new_unchecked("go", "0050069"));
/// stanza
///     .append_parent(Reference::new_unchecked("go", "0016491"))
///     .append_xref(Reference::new_unchecked("ec", "1.4.1.15"))
///     .append_xref(Reference::new_unchecked("ec", "1.4.1.15"))
///     .append_synonym(Synonym::new("lysine dehydrogenase").with_specificity(Specificity::Exact))
///     .annotate_literal(rdfs::COMMENT, "curated");
/// assert_eq!(1, stanza.xrefs().len());
/// assert_eq!(1, stanza.parents().len());
/// ```
#[derive(PartialEq, Debug, Clone)]
pub struct Stanza {
    reference: Reference,
    definition: Option<String>,
    definition_provenance: Vec<Value>,
    namespace: Option<String>,
    relationships: BTreeMap<Reference, Vec<Reference>>,
    properties: BTreeMap<Reference, Vec<Value>>,
    xrefs: Vec<Reference>,
    parents: Vec<Reference>,
    synonyms: Vec<Synonym>,
    subsets: Vec<Reference>,
    intersection_of: Vec<IntersectionOf>,
    union_of: Vec<Reference>,
    equivalent_to: Vec<Reference>,
    disjoint_from: Vec<Reference>,
    alt_ids: Vec<Reference>,
    provenance: Vec<Reference>,
    flags: BTreeMap<Flag, bool>,
    axioms: BTreeMap<(Reference, Value), Vec<Annotation>>,
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) -> bool {
    if values.contains(&value) {
        false
    } else {
        values.push(value);
        true
    }
}

impl Stanza {
    pub fn new(reference: Reference) -> Self {
        Self {
            reference: reference.normalized(),
            definition: None,
            definition_provenance: Vec::new(),
            namespace: None,
            relationships: BTreeMap::new(),
            properties: BTreeMap::new(),
            xrefs: Vec::new(),
            parents: Vec::new(),
            synonyms: Vec::new(),
            subsets: Vec::new(),
            intersection_of: Vec::new(),
            union_of: Vec::new(),
            equivalent_to: Vec::new(),
            disjoint_from: Vec::new(),
            alt_ids: Vec::new(),
            provenance: Vec::new(),
            flags: BTreeMap::new(),
            axioms: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.reference.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.reference.set_name(Some(name.into()));
        self
    }

    #[inline]
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    /// The references or literals the definition is attributed to.
    #[inline]
    pub fn definition_provenance(&self) -> &[Value] {
        &self.definition_provenance
    }

    pub fn set_definition(
        &mut self,
        definition: impl Into<String>,
        provenance: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        self.definition = Some(definition.into());
        self.definition_provenance.clear();
        for value in provenance {
            push_unique(&mut self.definition_provenance, value.normalized());
        }
        self
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Returns the value of a boolean tag if it has been set.
    #[inline]
    pub fn flag(&self, flag: Flag) -> Option<bool> {
        self.flags.get(&flag).copied()
    }

    /// The boolean tags that have been set, in tag order.
    pub fn flags(&self) -> impl Iterator<Item = (Flag, bool)> + '_ {
        self.flags.iter().map(|(flag, value)| (*flag, *value))
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) -> &mut Self {
        self.flags.insert(flag, value);
        self
    }

    #[inline]
    pub fn is_obsolete(&self) -> bool {
        self.flag(Flag::Obsolete).unwrap_or(false)
    }

    pub fn set_obsolete(&mut self, obsolete: bool) -> &mut Self {
        self.set_flag(Flag::Obsolete, obsolete)
    }

    pub fn append_relationship(&mut self, predicate: Reference, target: Reference) -> &mut Self {
        let targets = self.relationships.entry(predicate.normalized()).or_default();
        push_unique(targets, target.normalized());
        self
    }

    /// Adds a relationship together with secondary annotations on it.
    pub fn append_relationship_annotated(
        &mut self,
        predicate: Reference,
        target: Reference,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.append_relationship(predicate.clone(), target.clone());
        self.add_axioms(predicate, target.into(), annotations)
    }

    /// Iterates over `(predicate, target)` relationship pairs, sorted by predicate then insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = (&Reference, &Reference)> {
        self.relationships
            .iter()
            .flat_map(|(predicate, targets)| targets.iter().map(move |t| (predicate, t)))
    }

    pub fn get_relationships(&self, predicate: impl Into<Reference>) -> &[Reference] {
        self.relationships
            .get(&predicate.into().normalized())
            .map_or(&[], Vec::as_slice)
    }

    pub fn append_property(&mut self, predicate: Reference, value: impl Into<Value>) -> &mut Self {
        let values = self.properties.entry(predicate.normalized()).or_default();
        push_unique(values, value.into().normalized());
        self
    }

    /// Adds a property together with secondary annotations on it.
    pub fn append_property_annotated(
        &mut self,
        predicate: Reference,
        value: impl Into<Value>,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        let value = value.into();
        self.append_property(predicate.clone(), value.clone());
        self.add_axioms(predicate, value, annotations)
    }

    /// Iterates over `(predicate, value)` property pairs, sorted by predicate then insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&Reference, &Value)> {
        self.properties
            .iter()
            .flat_map(|(predicate, values)| values.iter().map(move |v| (predicate, v)))
    }

    pub fn get_property_values(&self, predicate: impl Into<Reference>) -> &[Value] {
        self.properties
            .get(&predicate.into().normalized())
            .map_or(&[], Vec::as_slice)
    }

    /// Adds a reference-valued property.
    pub fn annotate_object(
        &mut self,
        predicate: impl Into<Reference>,
        object: Reference,
    ) -> &mut Self {
        self.append_property(predicate.into(), object)
    }

    /// Adds a `xsd:string` valued property.
    pub fn annotate_literal(
        &mut self,
        predicate: impl Into<Reference>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.append_property(predicate.into(), Literal::new_simple_literal(value))
    }

    pub fn annotate_typed_literal(
        &mut self,
        predicate: impl Into<Reference>,
        literal: Literal,
    ) -> &mut Self {
        self.append_property(predicate.into(), literal)
    }

    pub fn annotate_boolean(&mut self, predicate: impl Into<Reference>, value: bool) -> &mut Self {
        self.append_property(predicate.into(), Literal::from(value))
    }

    pub fn annotate_integer(&mut self, predicate: impl Into<Reference>, value: i64) -> &mut Self {
        self.append_property(predicate.into(), Literal::from(value))
    }

    pub fn annotate_year(&mut self, predicate: impl Into<Reference>, year: i32) -> &mut Self {
        self.append_property(predicate.into(), Literal::year(year))
    }

    pub fn append_comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.annotate_literal(rdfs::COMMENT, comment)
    }

    pub fn append_see_also(&mut self, reference: Reference) -> &mut Self {
        self.annotate_object(rdfs::SEE_ALSO, reference)
    }

    pub fn append_replaced_by(&mut self, reference: Reference) -> &mut Self {
        self.annotate_object(iao::TERM_REPLACED_BY, reference)
    }

    pub fn append_consider(&mut self, reference: Reference) -> &mut Self {
        self.annotate_object(oboinowl::CONSIDER, reference)
    }

    pub fn append_created_by(&mut self, creator: impl Into<String>) -> &mut Self {
        self.annotate_literal(oboinowl::CREATED_BY, creator)
    }

    pub fn append_creation_date(&mut self, date: DateTime) -> &mut Self {
        self.append_property(oboinowl::CREATION_DATE.into(), Literal::from(date))
    }

    pub fn append_xref(&mut self, xref: Reference) -> &mut Self {
        push_unique(&mut self.xrefs, xref.normalized());
        self
    }

    /// Adds a cross-reference together with secondary annotations on it.
    pub fn append_xref_annotated(
        &mut self,
        xref: Reference,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.append_xref(xref.clone());
        self.add_axioms(oboinowl::HAS_DBXREF.into(), xref.into(), annotations)
    }

    #[inline]
    pub fn xrefs(&self) -> &[Reference] {
        &self.xrefs
    }

    pub fn append_parent(&mut self, parent: Reference) -> &mut Self {
        push_unique(&mut self.parents, parent.normalized());
        self
    }

    /// Adds a parent together with secondary annotations on the `is_a` edge.
    pub fn append_parent_annotated(
        &mut self,
        parent: Reference,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.append_parent(parent.clone());
        self.add_axioms(rdfs::SUB_CLASS_OF.into(), parent.into(), annotations)
    }

    #[inline]
    pub fn parents(&self) -> &[Reference] {
        &self.parents
    }

    pub fn append_synonym(&mut self, mut synonym: Synonym) -> &mut Self {
        synonym.synonym_type = synonym.synonym_type.map(Reference::normalized);
        synonym.provenance = synonym.provenance.into_iter().map(Value::normalized).collect();
        push_unique(&mut self.synonyms, synonym);
        self
    }

    #[inline]
    pub fn synonyms(&self) -> &[Synonym] {
        &self.synonyms
    }

    pub fn append_subset(&mut self, subset: Reference) -> &mut Self {
        push_unique(&mut self.subsets, subset.normalized());
        self
    }

    #[inline]
    pub fn subsets(&self) -> &[Reference] {
        &self.subsets
    }

    pub fn append_intersection_of(&mut self, element: impl Into<IntersectionOf>) -> &mut Self {
        push_unique(&mut self.intersection_of, element.into().normalized());
        self
    }

    #[inline]
    pub fn intersection_of(&self) -> &[IntersectionOf] {
        &self.intersection_of
    }

    pub fn append_union_of(&mut self, reference: Reference) -> &mut Self {
        push_unique(&mut self.union_of, reference.normalized());
        self
    }

    #[inline]
    pub fn union_of(&self) -> &[Reference] {
        &self.union_of
    }

    pub fn append_equivalent(&mut self, reference: Reference) -> &mut Self {
        push_unique(&mut self.equivalent_to, reference.normalized());
        self
    }

    /// Adds an equivalence together with secondary annotations on it.
    pub fn append_equivalent_annotated(
        &mut self,
        reference: Reference,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.append_equivalent(reference.clone());
        self.add_axioms(owl::EQUIVALENT_CLASS.into(), reference.into(), annotations)
    }

    #[inline]
    pub fn equivalent_to(&self) -> &[Reference] {
        &self.equivalent_to
    }

    pub fn append_disjoint_from(&mut self, reference: Reference) -> &mut Self {
        push_unique(&mut self.disjoint_from, reference.normalized());
        self
    }

    #[inline]
    pub fn disjoint_from(&self) -> &[Reference] {
        &self.disjoint_from
    }

    pub fn append_alt(&mut self, alt_id: Reference) -> &mut Self {
        push_unique(&mut self.alt_ids, alt_id.normalized());
        self
    }

    #[inline]
    pub fn alt_ids(&self) -> &[Reference] {
        &self.alt_ids
    }

    /// Adds a citation or database of record supporting the whole stanza.
    pub fn append_provenance(&mut self, reference: Reference) -> &mut Self {
        push_unique(&mut self.provenance, reference.normalized());
        self
    }

    /// Adds a stanza provenance together with secondary annotations on its `oboInOwl:hasDbXref` edge.
    pub fn append_provenance_annotated(
        &mut self,
        reference: Reference,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        self.append_provenance(reference.clone());
        self.add_axioms(oboinowl::HAS_DBXREF.into(), reference.into(), annotations)
    }

    #[inline]
    pub fn provenance(&self) -> &[Reference] {
        &self.provenance
    }

    /// Checks if the stanza has a `(predicate, object)` edge that secondary annotations can be attached to.
    pub fn has_edge(&self, predicate: &Reference, object: &Value) -> bool {
        if let Value::Reference(target) = object {
            if self
                .relationships
                .get(predicate)
                .is_some_and(|targets| targets.contains(target))
            {
                return true;
            }
            if *predicate == oboinowl::HAS_DBXREF && self.provenance.contains(target) {
                return true;
            }
            let edges: &[Reference] = if *predicate == oboinowl::HAS_DBXREF {
                &self.xrefs
            } else if *predicate == rdfs::SUB_CLASS_OF {
                &self.parents
            } else if *predicate == owl::EQUIVALENT_CLASS {
                &self.equivalent_to
            } else {
                &[]
            };
            if edges.contains(target) {
                return true;
            }
        }
        self.properties
            .get(predicate)
            .is_some_and(|values| values.contains(object))
    }

    /// Attaches a secondary annotation to an existing edge.
    pub fn annotate_edge(
        &mut self,
        predicate: &Reference,
        object: &Value,
        annotation: Annotation,
    ) -> Result<&mut Self, MissingEdgeError> {
        let predicate = predicate.clone().normalized();
        let object = object.clone().normalized();
        if !self.has_edge(&predicate, &object) {
            return Err(MissingEdgeError {
                node: self.reference.clone(),
                predicate,
                object,
            });
        }
        Ok(self.add_axioms(predicate, object, [annotation]))
    }

    fn add_axioms(
        &mut self,
        predicate: Reference,
        object: Value,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> &mut Self {
        let mut annotations = annotations.into_iter().peekable();
        if annotations.peek().is_none() {
            return self;
        }
        let axioms = self
            .axioms
            .entry((predicate.normalized(), object.normalized()))
            .or_default();
        for annotation in annotations {
            push_unique(axioms, annotation);
        }
        self
    }

    /// The secondary annotations of a `(predicate, object)` edge.
    pub fn axioms(&self, predicate: &Reference, object: &Value) -> &[Annotation] {
        self.axioms
            .get(&(predicate.clone(), object.clone()))
            .map_or(&[], Vec::as_slice)
    }

    /// Iterates over every annotated edge.
    pub fn all_axioms(&self) -> impl Iterator<Item = (&Reference, &Value, &[Annotation])> {
        self.axioms
            .iter()
            .map(|((p, o), annotations)| (p, o, annotations.as_slice()))
    }

    /// Collects the reference-valued edges using a matching predicate, plus `equivalent_to`,
    /// deduplicated and sorted by predicate then object.
    ///
    /// With `add_context`, each mapping carries the justification, confidence and contributor
    /// annotated on its edge, the justification defaulting to `semapv:UnspecifiedMatching`.
    ///
    /// ```
    /// use oxobo::{Reference, Stanza};
    /// use oxobo::vocab::semapv;
    ///
    /// let mut stanza = Stanza::new(Reference::new_unchecked("go", "0050069"));
    /// stanza.append_xref(Reference::new_unchecked("ec", "1.4.1.15"));
    /// let mappings = stanza.get_mappings(true);
    /// assert_eq!(1, mappings.len());
    /// assert_eq!(
    ///     semapv::UNSPECIFIED_MATCHING,
    ///     mappings[0].context.as_ref().unwrap().justification
    /// );
    /// ```
    pub fn get_mappings(&self, add_context: bool) -> Vec<Mapping> {
        let mut pairs = BTreeSet::new();
        for predicate in MATCHING_PREDICATES {
            let predicate = predicate.into_owned();
            for target in self.get_relationships(predicate.clone()) {
                pairs.insert((predicate.clone(), target.clone()));
            }
            for value in self.get_property_values(predicate.clone()) {
                if let Value::Reference(target) = value {
                    pairs.insert((predicate.clone(), target.clone()));
                }
            }
            if predicate == oboinowl::HAS_DBXREF {
                for xref in &self.xrefs {
                    pairs.insert((predicate.clone(), xref.clone()));
                }
            }
            if predicate == owl::EQUIVALENT_CLASS {
                for equivalent in &self.equivalent_to {
                    pairs.insert((predicate.clone(), equivalent.clone()));
                }
            }
        }
        pairs
            .into_iter()
            .map(|(predicate, object)| {
                let context = add_context.then(|| self.mapping_context(&predicate, &object));
                Mapping {
                    predicate,
                    object,
                    context,
                }
            })
            .collect()
    }

    fn mapping_context(&self, predicate: &Reference, object: &Reference) -> MappingContext {
        let annotations = self.axioms(predicate, &Value::Reference(object.clone()));
        let find = |key: ReferenceRef<'_>| {
            annotations
                .iter()
                .find(|annotation| *annotation.predicate() == key)
                .map(Annotation::value)
        };
        MappingContext {
            justification: find(sssom::MAPPING_JUSTIFICATION)
                .and_then(Value::as_reference)
                .cloned()
                .unwrap_or_else(|| semapv::UNSPECIFIED_MATCHING.into_owned()),
            confidence: find(sssom::CONFIDENCE)
                .and_then(Value::as_literal)
                .and_then(|literal| literal.value().parse().ok()),
            contributor: find(dcterms::CONTRIBUTOR)
                .and_then(Value::as_reference)
                .cloned(),
        }
    }
}

/// Whether a [`Term`] is a class or an individual.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum TermKind {
    #[default]
    Class,
    Instance,
}

/// A `[Term]` or `[Instance]` stanza.
///
/// It dereferences to its [`Stanza`].
#[derive(PartialEq, Debug, Clone)]
pub struct Term {
    stanza: Stanza,
    kind: TermKind,
}

impl Term {
    #[inline]
    pub fn new(reference: Reference) -> Self {
        Self::with_kind(reference, TermKind::Class)
    }

    #[inline]
    pub fn new_instance(reference: Reference) -> Self {
        Self::with_kind(reference, TermKind::Instance)
    }

    #[inline]
    pub fn with_kind(reference: Reference, kind: TermKind) -> Self {
        Self {
            stanza: Stanza::new(reference),
            kind,
        }
    }

    #[inline]
    pub fn kind(&self) -> TermKind {
        self.kind
    }

    #[inline]
    pub fn stanza(&self) -> &Stanza {
        &self.stanza
    }

    #[inline]
    pub fn into_stanza(self) -> Stanza {
        self.stanza
    }
}

impl Deref for Term {
    type Target = Stanza;

    #[inline]
    fn deref(&self) -> &Stanza {
        &self.stanza
    }
}

impl DerefMut for Term {
    #[inline]
    fn deref_mut(&mut self) -> &mut Stanza {
        &mut self.stanza
    }
}

/// A `[Typedef]` stanza, i.e. a relation.
///
/// It dereferences to its [`Stanza`].
#[derive(PartialEq, Debug, Clone)]
pub struct TypeDef {
    stanza: Stanza,
    domain: Option<Reference>,
    range: Option<Reference>,
    inverse: Option<Reference>,
    transitive_over: Vec<Reference>,
    disjoint_over: Vec<Reference>,
    holds_over_chain: Vec<Vec<Reference>>,
    equivalent_to_chain: Vec<Vec<Reference>>,
}

impl TypeDef {
    pub fn new(reference: Reference) -> Self {
        Self {
            stanza: Stanza::new(reference),
            domain: None,
            range: None,
            inverse: None,
            transitive_over: Vec::new(),
            disjoint_over: Vec::new(),
            holds_over_chain: Vec::new(),
            equivalent_to_chain: Vec::new(),
        }
    }

    #[inline]
    pub fn stanza(&self) -> &Stanza {
        &self.stanza
    }

    #[inline]
    pub fn domain(&self) -> Option<&Reference> {
        self.domain.as_ref()
    }

    pub fn set_domain(&mut self, domain: Reference) -> &mut Self {
        self.domain = Some(domain.normalized());
        self
    }

    #[inline]
    pub fn range(&self) -> Option<&Reference> {
        self.range.as_ref()
    }

    pub fn set_range(&mut self, range: Reference) -> &mut Self {
        self.range = Some(range.normalized());
        self
    }

    #[inline]
    pub fn inverse(&self) -> Option<&Reference> {
        self.inverse.as_ref()
    }

    pub fn set_inverse(&mut self, inverse: Reference) -> &mut Self {
        self.inverse = Some(inverse.normalized());
        self
    }

    #[inline]
    pub fn transitive_over(&self) -> &[Reference] {
        &self.transitive_over
    }

    pub fn append_transitive_over(&mut self, reference: Reference) -> &mut Self {
        push_unique(&mut self.transitive_over, reference.normalized());
        self
    }

    #[inline]
    pub fn disjoint_over(&self) -> &[Reference] {
        &self.disjoint_over
    }

    pub fn append_disjoint_over(&mut self, reference: Reference) -> &mut Self {
        push_unique(&mut self.disjoint_over, reference.normalized());
        self
    }

    #[inline]
    pub fn holds_over_chain(&self) -> &[Vec<Reference>] {
        &self.holds_over_chain
    }

    pub fn append_holds_over_chain(&mut self, chain: Vec<Reference>) -> &mut Self {
        push_unique(
            &mut self.holds_over_chain,
            chain.into_iter().map(Reference::normalized).collect(),
        );
        self
    }

    #[inline]
    pub fn equivalent_to_chain(&self) -> &[Vec<Reference>] {
        &self.equivalent_to_chain
    }

    pub fn append_equivalent_to_chain(&mut self, chain: Vec<Reference>) -> &mut Self {
        push_unique(
            &mut self.equivalent_to_chain,
            chain.into_iter().map(Reference::normalized).collect(),
        );
        self
    }
}

impl Deref for TypeDef {
    type Target = Stanza;

    #[inline]
    fn deref(&self) -> &Stanza {
        &self.stanza
    }
}

impl DerefMut for TypeDef {
    #[inline]
    fn deref_mut(&mut self) -> &mut Stanza {
        &mut self.stanza
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::skos;

    fn go(id: &str) -> Reference {
        Reference::new_unchecked("go", id)
    }

    #[test]
    fn sets_are_insertion_ordered_and_unique() {
        let mut stanza = Stanza::new(go("1"));
        let part_of = Reference::default_for("go", "part_of");
        stanza
            .append_relationship(part_of.clone(), go("3"))
            .append_relationship(part_of.clone(), go("2"))
            .append_relationship(part_of.clone(), go("3"));
        assert_eq!(&[go("3"), go("2")], stanza.get_relationships(part_of));
    }

    #[test]
    fn builders_normalize_prefixes() {
        let mut term = Term::new(Reference::new_unchecked("GO", "0050069"));
        let part_of = Reference::new_unchecked("BFO", "0000050");
        term.append_xref(Reference::new_unchecked("CHEBI", "1"))
            .append_parent(Reference::new_unchecked("GO", "0016491"))
            .append_relationship(part_of.clone(), Reference::new_unchecked("GO", "1"))
            .append_synonym(Synonym::new("LDH").with_type(Reference::new_unchecked("OMO", "0003000")))
            .append_intersection_of((part_of.clone(), Reference::new_unchecked("GO", "2")));
        assert_eq!(&go("0050069"), term.reference());
        assert_eq!(&[Reference::new_unchecked("chebi", "1")], term.xrefs());
        assert_eq!(&[go("0016491")], term.parents());
        assert_eq!(&[go("1")], term.get_relationships(part_of.clone()));
        assert_eq!(
            &[go("1")],
            term.get_relationships(Reference::new_unchecked("bfo", "0000050"))
        );
        assert_eq!(
            Some(&Reference::new_unchecked("omo", "0003000")),
            term.synonyms()[0].synonym_type()
        );
        assert_eq!(
            &[IntersectionOf::Restriction {
                predicate: Reference::new_unchecked("bfo", "0000050"),
                target: go("2"),
            }],
            term.intersection_of()
        );
    }

    #[test]
    fn annotating_requires_an_edge() {
        let mut stanza = Stanza::new(go("1"));
        let justification = Annotation::new(
            sssom::MAPPING_JUSTIFICATION,
            semapv::MANUAL_MAPPING_CURATION,
        );
        let xref = Value::Reference(Reference::new_unchecked("ec", "1.1.1.1"));
        let has_dbxref = oboinowl::HAS_DBXREF.into_owned();
        assert!(
            stanza
                .annotate_edge(&has_dbxref, &xref, justification.clone())
                .is_err()
        );
        stanza.append_xref(Reference::new_unchecked("ec", "1.1.1.1"));
        stanza
            .annotate_edge(&has_dbxref, &xref, justification.clone())
            .unwrap();
        assert_eq!(&[justification], stanza.axioms(&has_dbxref, &xref));
    }

    #[test]
    fn mappings_are_sorted_with_context() {
        let mut stanza = Stanza::new(go("1"));
        stanza
            .append_xref(Reference::new_unchecked("mesh", "D1"))
            .append_equivalent(Reference::new_unchecked("chebi", "2"))
            .append_property_annotated(
                skos::EXACT_MATCH.into(),
                Reference::new_unchecked("chebi", "3"),
                [
                    Annotation::new(
                        sssom::MAPPING_JUSTIFICATION,
                        semapv::MANUAL_MAPPING_CURATION,
                    ),
                    Annotation::new(sssom::CONFIDENCE, Literal::from(0.9)),
                    Annotation::new(dcterms::CONTRIBUTOR, Reference::new_unchecked("orcid", "1")),
                ],
            )
            .annotate_literal(skos::EXACT_MATCH, "not a reference");
        let mappings = stanza.get_mappings(true);
        let pairs = mappings
            .iter()
            .map(|m| (m.predicate.to_string(), m.object.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                ("oboinowl:hasDbXref".to_owned(), "mesh:D1".to_owned()),
                ("owl:equivalentClass".to_owned(), "chebi:2".to_owned()),
                ("skos:exactMatch".to_owned(), "chebi:3".to_owned()),
            ],
            pairs
        );
        let context = mappings[2].context.as_ref().unwrap();
        assert_eq!(semapv::MANUAL_MAPPING_CURATION, context.justification);
        assert_eq!(Some(0.9), context.confidence);
        assert_eq!(Some(Reference::new_unchecked("orcid", "1")), context.contributor);
        assert_eq!(
            semapv::UNSPECIFIED_MATCHING,
            mappings[0].context.as_ref().unwrap().justification
        );
    }

    #[test]
    fn specificity_parsing() {
        assert_eq!(Specificity::Exact, "EXACT".parse().unwrap());
        assert!("exact".parse::<Specificity>().is_err());
    }
}
