use oxiri::IriParseError;
use oxrdf::LanguageTagParseError;

/// An error raised while rendering a [`Document`](crate::Document) as RDF.
#[derive(Debug, thiserror::Error)]
pub enum OwlError {
    /// A reference uses a prefix the document prefix map does not expand.
    #[error("the prefix {0} has no URI expansion")]
    UnknownPrefix(String),
    /// An expanded reference is not a valid IRI.
    #[error(transparent)]
    InvalidIri(#[from] IriParseError),
    #[error(transparent)]
    InvalidLanguageTag(#[from] LanguageTagParseError),
}
