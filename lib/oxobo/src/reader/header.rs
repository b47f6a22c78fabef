use crate::error::{OboParseError, OboSyntaxError};
use crate::ontology::{OboHeader, parse_date};
use crate::reader::grammar::{split_quoted, split_token, unescape};
use crate::reader::macros::MacroConfig;
use crate::reader::tags::parse_property_value;
use crate::reference::{Annotation, Literal, Value};
use crate::resolver::ParseContext;
use crate::session::ParseSession;
use crate::stanza::{Specificity, SynonymTypeDef};
use crate::tokenizer::TagValues;
use crate::vocab::{dcterms, iao, rdfs};
use time::Date;
use time::macros::format_description;

/// Versions of mostly static resources that need a hand-written rewrite.
const VERSION_REWRITES: [(&str, &str); 3] = [
    ("$Date: 2009/11/15 10:54:12 $", "2009-11-15"),
    ("http://www.w3.org/2006/time#2016", "2016"),
    ("https://purl.org/ontology/modalia#1.0.0", "1.0.0"),
];

/// IRI prefixes followed directly by the version.
const VERSION_PREFIXES: [&str; 9] = [
    "http://www.orpha.net/version",
    "https://www.orphadata.com/data/ontologies/ordo/last_version/ORDO_en_",
    "http://humanbehaviourchange.org/ontology/bcio.owl/",
    "http://purl.org/pav/",
    "http://identifiers.org/combine.specifications/teddy.rel-",
    "https://purl.dataone.org/odo/MOSAIC/",
    "http://purl.dataone.org/odo/SASAP/",
    "http://purl.dataone.org/odo/SENSO/",
    "https://purl.dataone.org/odo/ADCAD/",
];

/// IRI prefixes followed by the version and then by more path segments.
const VERSION_PREFIX_SPLITS: [&str; 4] = [
    "http://www.ebi.ac.uk/efo/releases/v",
    "http://www.ebi.ac.uk/swo/swo.owl/",
    "http://semanticscience.org/ontology/sio/v",
    "http://ontology.neuinfo.org/NIF/ttl/nif/version/",
];

/// Normalizes a `data-version` value.
///
/// Release IRIs are reduced to their version segment:
/// ```
/// use oxobo::clean_version;
///
/// assert_eq!(
///     "2024-01-17",
///     clean_version("http://purl.obolibrary.org/obo/go/releases/2024-01-17/go.owl", "go")
/// );
/// assert_eq!("3.1.2", clean_version("\"3.1.2\"", "efo"));
/// assert_eq!("3.62.0", clean_version("http://www.ebi.ac.uk/efo/releases/v3.62.0/efo.owl", "efo"));
/// ```
pub fn clean_version(data_version: &str, prefix: &str) -> String {
    let data_version = data_version.trim().trim_matches('"');
    if let Some((_, rewrite)) = VERSION_REWRITES.iter().find(|(from, _)| *from == data_version) {
        return (*rewrite).to_owned();
    }
    let mut data_version = data_version.strip_suffix(".owl").unwrap_or(data_version);
    if !prefix.is_empty() {
        data_version = data_version.strip_suffix(prefix).unwrap_or(data_version);
    }
    let data_version = data_version.strip_suffix('/').unwrap_or(data_version);
    let data_version = data_version
        .strip_prefix("releases/")
        .or_else(|| data_version.strip_prefix("release/"))
        .unwrap_or(data_version);

    for version_prefix in VERSION_PREFIXES {
        if let Some(version) = data_version.strip_prefix(version_prefix) {
            return version.to_owned();
        }
    }
    for version_prefix in VERSION_PREFIX_SPLITS {
        if let Some(version) = data_version.strip_prefix(version_prefix) {
            return version.split('/').next().unwrap_or(version).to_owned();
        }
    }

    let digits = data_version.replace('.', "");
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return data_version.to_owned();
    }

    let iso = format_description!("[year]-[month]-[day]");
    if let Some(date) = data_version
        .rsplit('/')
        .map(str::trim)
        .find(|segment| Date::parse(segment, iso).is_ok())
    {
        return date.to_owned();
    }
    tracing::debug!(prefix, data_version, "bizarre version");
    data_version.to_owned()
}

/// Interprets the header directives.
///
/// The ontology prefix given by the caller replaces a missing or non-alphabetic `ontology` directive.
/// An explicit version wins over `data-version`, which wins over the `date`.
pub(crate) fn read_header(
    tags: &TagValues,
    session: &mut ParseSession<'_>,
    ontology_prefix: Option<&str>,
    version: Option<&str>,
) -> Result<OboHeader, OboParseError> {
    let ontology = ontology_id(tags, session, ontology_prefix)?;
    session.set_ontology_prefix(ontology.clone());
    let mut header = OboHeader::new(ontology);
    header.format_version = tags.first("format-version").map(ToOwned::to_owned);
    header.name = tags.first("name").map(unescape);
    header.auto_generated_by = tags.first("auto-generated-by").map(ToOwned::to_owned);
    header.default_namespace = tags.first("default-namespace").map(ToOwned::to_owned);
    header.imports = tags.get("import").to_vec();

    if let Some(date) = tags.first("date") {
        match parse_date(date) {
            Ok(date) => header.date = Some(date),
            Err(e) => session.recover(
                OboSyntaxError::new(format!("could not parse date: {e}"))
                    .with_tag("date")
                    .with_line(date),
            )?,
        }
    }
    header.data_version = data_version(tags, &header, session, version)?;

    for line in tags.get("subsetdef") {
        let (id, rest) = split_token(line);
        let Some((description, _)) = split_quoted(rest) else {
            session.recover(
                OboSyntaxError::new("subsetdef does not have a quoted description")
                    .with_tag("subsetdef")
                    .with_line(line),
            )?;
            continue;
        };
        let context = ParseContext::new().with_tag("subsetdef").with_line(line);
        if let Some(subset) = session.resolve_obo(id, context)? {
            header.subsetdefs.push(subset.with_name(unescape(description)));
        }
    }

    for line in tags.get("synonymtypedef") {
        if let Some(typedef) = synonym_typedef(line, session)? {
            header.synonym_typedefs.push(typedef);
        }
    }

    for line in tags.get("idspace") {
        let (prefix, rest) = split_token(line);
        let (uri_prefix, _) = split_token(rest);
        if uri_prefix.is_empty() {
            session.recover(
                OboSyntaxError::new("idspace is missing a URI prefix")
                    .with_tag("idspace")
                    .with_line(line),
            )?;
            continue;
        }
        header
            .idspaces
            .insert(prefix.to_owned(), uri_prefix.to_owned());
    }

    for remark in tags.get("remark") {
        header.properties.push(Annotation::new(
            rdfs::COMMENT,
            Literal::new_simple_literal(unescape(remark)),
        ));
    }

    for line in tags.get("property_value") {
        let Some((predicate, value, _)) = parse_property_value(line, None, session)? else {
            continue;
        };
        match value {
            Value::Reference(root) if predicate == iao::HAS_ONTOLOGY_ROOT_TERM => {
                if !header.root_terms.contains(&root) {
                    header.root_terms.push(root);
                }
            }
            Value::Literal(title) if predicate == dcterms::TITLE && header.name.is_none() => {
                header.name = Some(title.value().to_owned());
            }
            value => header.properties.push(Annotation::new(predicate, value)),
        }
    }

    header.macros = MacroConfig::from_header(tags, session)?;

    for (tag, _) in tags.iter() {
        if !KNOWN_HEADER_TAGS.contains(&tag) {
            tracing::debug!(ontology = %header.ontology, tag, "ignoring header tag");
        }
    }
    Ok(header)
}

const KNOWN_HEADER_TAGS: [&str; 18] = [
    "format-version",
    "data-version",
    "date",
    "saved-by",
    "auto-generated-by",
    "import",
    "subsetdef",
    "synonymtypedef",
    "default-namespace",
    "idspace",
    "treat-xrefs-as-equivalent",
    "treat-xrefs-as-genus-differentia",
    "treat-xrefs-as-relationship",
    "treat-xrefs-as-is_a",
    "remark",
    "ontology",
    "name",
    "property_value",
];

fn ontology_id(
    tags: &TagValues,
    session: &ParseSession<'_>,
    ontology_prefix: Option<&str>,
) -> Result<String, OboParseError> {
    let normalize = |prefix: &str| {
        session
            .registry()
            .normalize_prefix(prefix)
            .map_or_else(|| prefix.to_lowercase(), ToOwned::to_owned)
    };
    match (tags.first("ontology"), ontology_prefix) {
        (Some(declared), Some(prefix)) if !declared.chars().all(char::is_alphabetic) => {
            tracing::debug!(
                prefix,
                declared,
                "ontology prefix has a strange format, replacing it"
            );
            Ok(normalize(prefix))
        }
        (Some(declared), _) => Ok(normalize(declared)),
        (None, Some(prefix)) => {
            tracing::debug!(prefix, "missing ontology directive");
            Ok(normalize(prefix))
        }
        (None, None) => Err(OboSyntaxError::new(
            "the header has no ontology directive and no ontology prefix was given",
        )
        .with_tag("ontology")
        .into()),
    }
}

fn data_version(
    tags: &TagValues,
    header: &OboHeader,
    session: &mut ParseSession<'_>,
    version: Option<&str>,
) -> Result<Option<String>, OboParseError> {
    let ontology = header.ontology.as_str();
    let declared = tags
        .first("data-version")
        .filter(|v| !v.is_empty())
        .map(|v| clean_version(v, ontology));
    let data_version = if let Some(version) = version {
        let version = clean_version(version, ontology);
        if declared.as_ref().is_some_and(|declared| *declared != version) {
            tracing::debug!(ontology, ?declared, %version, "overriding declared data version");
        }
        Some(version)
    } else if declared.is_some() {
        declared
    } else if let Some(date) = header.date {
        let version = format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        );
        tracing::debug!(ontology, %version, "no data version, falling back to the date");
        Some(version)
    } else {
        None
    };
    match data_version {
        Some(version) if version.contains('/') => {
            session.recover(
                OboSyntaxError::new("data-version can not contain a slash")
                    .with_tag("data-version")
                    .with_line(&version),
            )?;
            Ok(None)
        }
        data_version => Ok(data_version),
    }
}

fn synonym_typedef(
    line: &str,
    session: &mut ParseSession<'_>,
) -> Result<Option<SynonymTypeDef>, OboParseError> {
    let (id, rest) = split_token(line);
    let (name, rest) = match split_quoted(rest) {
        Some((name, rest)) => (Some(unescape(name)), rest),
        None => (None, rest),
    };
    let specificity = match split_token(rest).0 {
        "" => None,
        keyword => match keyword.parse::<Specificity>() {
            Ok(specificity) => Some(specificity),
            Err(e) => {
                session.recover(e.with_tag("synonymtypedef").with_line(line))?;
                None
            }
        },
    };
    let context = ParseContext::new().with_tag("synonymtypedef").with_line(line);
    let Some(mut reference) = session.resolve_obo(id, context)? else {
        return Ok(None);
    };
    if let Some(name) = name {
        reference = reference.with_name(name);
    }
    Ok(Some(SynonymTypeDef::new(reference, specificity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Reference;
    use crate::registry::MemoryRegistry;

    #[test]
    fn versions() {
        assert_eq!("2009-11-15", clean_version("$Date: 2009/11/15 10:54:12 $", "owl"));
        assert_eq!("2024-01-17", clean_version("releases/2024-01-17", "go"));
        assert_eq!("2024-01-17", clean_version("go/releases/2024-01-17/", "cl"));
        assert_eq!("4.0.0", clean_version("http://purl.org/pav/4.0.0", "pav"));
        assert_eq!("45", clean_version("45", "x"));
        assert_eq!("some-version", clean_version("some-version", "x"));
    }

    fn header(tags: &[(&str, &str)], version: Option<&str>) -> Result<OboHeader, OboParseError> {
        let registry = MemoryRegistry::obo_defaults();
        let mut session = ParseSession::new(&registry, "").strict(true);
        read_header(&tags.iter().copied().collect(), &mut session, None, version)
    }

    #[test]
    fn directives() {
        let header = header(
            &[
                ("format-version", "1.4"),
                ("ontology", "GO"),
                ("date", "17:05:2024 10:30"),
                ("subsetdef", "goslim_generic \"Generic GO slim\""),
                ("synonymtypedef", "systematic_synonym \"Systematic synonym\" EXACT"),
                ("idspace", "RO http://purl.obolibrary.org/obo/RO_"),
                ("remark", "a remark"),
                ("property_value", "IAO:0000700 GO:0008150"),
                ("treat-xrefs-as-is_a", "CL"),
            ],
            None,
        )
        .unwrap();
        assert_eq!("go", header.ontology);
        assert_eq!(Some("2024-05-17"), header.data_version.as_deref());
        assert_eq!(
            vec![Reference::default_for("go", "goslim_generic")],
            header.subsetdefs
        );
        assert_eq!(Some("Generic GO slim"), header.subsetdefs[0].name());
        assert_eq!(
            Some(Specificity::Exact),
            header.synonym_typedefs[0].specificity()
        );
        assert_eq!(vec![Reference::new_unchecked("go", "0008150")], header.root_terms);
        assert_eq!(vec!["a remark"], header.remarks().collect::<Vec<_>>());
        assert!(header.macros.treat_xrefs_as_is_a.contains("cl"));
    }

    #[test]
    fn explicit_version_wins() {
        let header = header(
            &[("ontology", "go"), ("data-version", "releases/2020-01-01")],
            Some("2024-01-17"),
        )
        .unwrap();
        assert_eq!(Some("2024-01-17"), header.data_version.as_deref());
        let header = header_default(&[("ontology", "go"), ("data-version", "releases/2020-01-01")]);
        assert_eq!(Some("2020-01-01"), header.data_version.as_deref());
    }

    fn header_default(tags: &[(&str, &str)]) -> OboHeader {
        header(tags, None).unwrap()
    }

    #[test]
    fn slashes_are_rejected() {
        assert!(header(&[("ontology", "go"), ("data-version", "a/b/c")], None).is_err());
    }

    #[test]
    fn missing_ontology() {
        assert!(header(&[("format-version", "1.4")], None).is_err());
    }
}
