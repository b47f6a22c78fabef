//! OxOBO is a parser and serializer for the [OBO flat file format](https://owlcollab.github.io/oboformat/doc/obo-syntax.html).
//!
//! Identifiers are normalized against a prefix [`Registry`] while reading, so that `GO:0050069`,
//! `go:0050069` and `http://purl.obolibrary.org/obo/GO_0050069` all become the same [`Reference`].
//! Each stanza is built into a [`Term`] or a [`TypeDef`] that can be modified with chainable builders
//! and written back with [`OboSerializer`].
//!
//! Usage example:
//! ```
//! use oxobo::{MemoryRegistry, OboParser, OboSerializer, Reference};
//!
//! let registry = MemoryRegistry::obo_defaults();
//! let document = OboParser::new(&registry).parse_str(
//!     "ontology: go\n\n[Term]\nid: GO:0050069\nname: lysine dehydrogenase activity\nxref: EC:1.4.1.15\n",
//! )?;
//! let term = document.term(&Reference::new_unchecked("go", "0050069")).unwrap();
//! assert_eq!(&[Reference::new_unchecked("ec", "1.4.1.15")], term.xrefs());
//!
//! let output = OboSerializer::new()
//!     .with_registry(&registry)
//!     .serialize_document(&document, Vec::new())?;
//! assert!(String::from_utf8(output)?.contains("xref: EC:1.4.1.15\n"));
//! # Result::<_,Box<dyn std::error::Error>>::Ok(())
//! ```

mod error;
mod mappings;
mod ontology;
mod reader;
mod reference;
mod registry;
mod resolver;
mod rules;
mod serializer;
mod session;
mod stanza;
pub mod tokenizer;
pub mod vocab;

pub use crate::error::{OboParseError, OboSyntaxError, ParseError, ParseErrorKind};
pub use crate::mappings::{MappingRow, document_mappings, write_mappings_tsv};
pub use crate::ontology::{OboDocument, OboHeader};
pub use crate::reader::{
    FromReadOboReader, MacroConfig, OboParser, ParsedStanza, StanzaReader, Tag, clean_version,
};
pub use crate::reference::{Annotation, Literal, Reference, ReferenceRef, Value};
pub use crate::registry::{MemoryRegistry, PrefixRecord, Registry, RegistryError};
pub use crate::resolver::{ParseContext, Resolved};
pub use crate::rules::Rules;
pub use crate::serializer::{OboSerializer, ToWriteOboWriter};
pub use crate::session::ParseSession;
pub use crate::stanza::{
    Flag, IntersectionOf, Mapping, MappingContext, MissingEdgeError, Specificity, Stanza, Synonym,
    SynonymTypeDef, Term, TermKind, TypeDef,
};
