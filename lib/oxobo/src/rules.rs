//! Curated blocklists and rewrite rules applied to raw strings before reference resolution.

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Preprocessing rules.
///
/// Resource-scoped entries only apply while parsing the ontology they are keyed on.
///
/// ```
/// use oxobo::Rules;
///
/// let rules = Rules::from_json(
///     r#"{
///         "blocklists": {"prefix": ["http://www.geneontology.org/"]},
///         "rewrites": {"prefix": {"MSH:": "mesh:"}, "resource_full": {"doid": {"ICD9:1": "icd9:001"}}}
///     }"#,
/// )?;
/// assert!(rules.is_blocked("http://www.geneontology.org/formats", None));
/// assert_eq!(Some("mesh:D000001".to_owned()), rules.remap_prefix("MSH:D000001", None));
/// assert_eq!(Some("icd9:001"), rules.remap_full("ICD9:1", Some("doid")));
/// assert_eq!(None, rules.remap_full("ICD9:1", Some("go")));
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rules {
    #[serde(default)]
    blocklists: Blocklist,
    #[serde(default)]
    rewrites: Rewrites,
    /// Bare relation labels grounded to a CURIE, e.g. `part_of` to `BFO:0000050`.
    #[serde(default)]
    relations: FxHashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Blocklist {
    #[serde(default)]
    full: Vec<String>,
    #[serde(default)]
    resource_full: FxHashMap<String, Vec<String>>,
    #[serde(default)]
    prefix: Vec<String>,
    #[serde(default)]
    resource_prefix: FxHashMap<String, Vec<String>>,
    #[serde(default)]
    suffix: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Rewrites {
    #[serde(default)]
    full: FxHashMap<String, String>,
    #[serde(default)]
    resource_full: FxHashMap<String, FxHashMap<String, String>>,
    #[serde(default)]
    prefix: FxHashMap<String, String>,
    #[serde(default)]
    resource_prefix: FxHashMap<String, FxHashMap<String, String>>,
}

impl Rules {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds a grounding for a bare relation label.
    #[must_use]
    pub fn with_relation(mut self, label: impl Into<String>, curie: impl Into<String>) -> Self {
        self.relations.insert(label.into(), curie.into());
        self
    }

    /// Blocks a full string.
    #[must_use]
    pub fn with_blocked(mut self, text: impl Into<String>) -> Self {
        self.blocklists.full.push(text.into());
        self
    }

    pub fn is_blocked(&self, text: &str, ontology_prefix: Option<&str>) -> bool {
        let blocklists = &self.blocklists;
        if blocklists.full.iter().any(|b| b == text)
            || blocklists.prefix.iter().any(|b| text.starts_with(b.as_str()))
            || blocklists.suffix.iter().any(|b| text.ends_with(b.as_str()))
        {
            return true;
        }
        let Some(ontology_prefix) = ontology_prefix else {
            return false;
        };
        blocklists
            .resource_full
            .get(ontology_prefix)
            .is_some_and(|b| b.iter().any(|b| b == text))
            || blocklists
                .resource_prefix
                .get(ontology_prefix)
                .is_some_and(|b| b.iter().any(|b| text.starts_with(b.as_str())))
    }

    /// Returns the replacement of a full string, resource-scoped rules first.
    pub fn remap_full(&self, text: &str, ontology_prefix: Option<&str>) -> Option<&str> {
        ontology_prefix
            .and_then(|p| self.rewrites.resource_full.get(p))
            .and_then(|rewrites| rewrites.get(text))
            .or_else(|| self.rewrites.full.get(text))
            .map(String::as_str)
    }

    /// Rewrites the start of a string using the longest matching prefix rule, resource-scoped rules first.
    pub fn remap_prefix(&self, text: &str, ontology_prefix: Option<&str>) -> Option<String> {
        let scoped = ontology_prefix.and_then(|p| self.rewrites.resource_prefix.get(p));
        scoped
            .and_then(|rewrites| longest_prefix_rewrite(rewrites, text))
            .or_else(|| longest_prefix_rewrite(&self.rewrites.prefix, text))
    }

    pub fn ground_relation(&self, text: &str) -> Option<&str> {
        self.relations.get(text).map(String::as_str)
    }
}

fn longest_prefix_rewrite(rewrites: &FxHashMap<String, String>, text: &str) -> Option<String> {
    rewrites
        .iter()
        .filter(|(old, _)| text.starts_with(old.as_str()))
        .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
        .map(|(old, new)| format!("{new}{}", &text[old.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_wins() {
        let rules = Rules::from_json(
            r#"{"rewrites": {"prefix": {"EC:": "ec:", "EC:EC:": "ec:"}}}"#,
        )
        .unwrap();
        assert_eq!(Some("ec:1.1.1.1".to_owned()), rules.remap_prefix("EC:EC:1.1.1.1", None));
        assert_eq!(Some("ec:1.1.1.1".to_owned()), rules.remap_prefix("EC:1.1.1.1", None));
        assert_eq!(None, rules.remap_prefix("GO:1", None));
    }

    #[test]
    fn blocklist_scopes() {
        let rules = Rules::from_json(
            r#"{"blocklists": {"suffix": ["_"], "resource_prefix": {"chebi": ["Beilstein:"]}}}"#,
        )
        .unwrap();
        assert!(rules.is_blocked("abc_", None));
        assert!(rules.is_blocked("Beilstein:123", Some("chebi")));
        assert!(!rules.is_blocked("Beilstein:123", Some("go")));
        assert!(!rules.is_blocked("Beilstein:123", None));
    }
}
