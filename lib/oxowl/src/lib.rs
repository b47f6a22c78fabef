//! OxOWL renders OBO ontologies as [OWL 2](https://www.w3.org/TR/owl2-syntax/) documents.
//!
//! An [`OboDocument`](oxobo::OboDocument) is translated into a [`Document`] by [`OboConverter`],
//! which can then be written in the functional-style syntax with [`FunctionalSerializer`]
//! or turned into an [`oxrdf::Graph`] with [`document_to_graph`].
//!
//! Usage example:
//! ```
//! use oxobo::{MemoryRegistry, OboParser};
//! use oxowl::{FunctionalSerializer, OboConverter};
//!
//! let registry = MemoryRegistry::obo_defaults();
//! let obo = OboParser::new(&registry).parse_str(
//!     "ontology: go\n\n[Term]\nid: GO:0050069\nname: lysine dehydrogenase activity\nrelationship: part_of GO:0000001\n\n[Typedef]\nid: part_of\nxref: BFO:0000050\n",
//! )?;
//! let document = OboConverter::new(&registry).convert(&obo)?;
//! let output = String::from_utf8(FunctionalSerializer::new().serialize_document(&document, Vec::new())?)?;
//! assert!(output.starts_with("Prefix("));
//! assert!(output.contains("Ontology(<http://purl.obolibrary.org/obo/go.owl>\n"));
//! assert!(output.contains("AnnotationAssertion(rdfs:label GO:0050069 \"lysine dehydrogenase activity\")\n"));
//! # Result::<_,Box<dyn std::error::Error>>::Ok(())
//! ```

mod axiom;
mod document;
mod entity;
mod error;
mod expression;
mod functional;
mod obo;
mod rdf;

pub use crate::axiom::{AnnotatedAxiom, Axiom};
pub use crate::document::Document;
pub use crate::entity::EntityKind;
pub use crate::error::OwlError;
pub use crate::expression::{ClassExpression, ObjectPropertyExpression};
pub use crate::functional::{FunctionalSerializer, ToWriteFunctionalWriter};
pub use crate::obo::{OboConverter, flag_predicate};
pub use crate::rdf::document_to_graph;
