//! OxXref maps cross-referenced identifiers onto a single canonical identifier.
//!
//! Xrefs harvested from OBO documents form an undirected [`XrefGraph`]. A [`Canonicalizer`]
//! explores the neighborhood of a node and picks the reference whose namespace ranks highest in
//! a priority list, e.g. mapping a MeSH descriptor onto its PubChem compound equivalent.
//!
//! Usage example:
//! ```
//! use oxobo::{MemoryRegistry, OboParser, Reference};
//! use oxxref::{Canonicalizer, XrefGraph};
//!
//! let registry = MemoryRegistry::obo_defaults();
//! let chebi = OboParser::new(&registry).parse_str(
//!     "ontology: chebi\n\n[Term]\nid: CHEBI:2\nxref: pubchem.compound:1\nxref: MESH:D000001\n",
//! )?;
//! let canonicalizer = Canonicalizer::new(XrefGraph::from_documents([&chebi]));
//! assert_eq!(
//!     Reference::new_unchecked("pubchem.compound", "1"),
//!     canonicalizer.canonicalize(&Reference::new_unchecked("mesh", "D000001"))
//! );
//! # Result::<_,Box<dyn std::error::Error>>::Ok(())
//! ```

mod canonicalizer;
mod graph;

pub use crate::canonicalizer::{Canonicalizer, DEFAULT_PRIORITY_LIST, PathStep};
pub use crate::graph::XrefGraph;
