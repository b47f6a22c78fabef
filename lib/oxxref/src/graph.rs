use oxobo::{OboDocument, Reference};
use rustc_hash::FxHashMap;

/// An undirected graph of cross-references.
///
/// Nodes are [`Reference`]s and each edge keeps the labels of the sources it was observed in,
/// so the same pair reported by two ontologies is a single edge with two provenance labels.
///
/// ```
/// use oxobo::Reference;
/// use oxxref::XrefGraph;
///
/// let mut graph = XrefGraph::new();
/// let chebi = Reference::new_unchecked("chebi", "2");
/// let mesh = Reference::new_unchecked("mesh", "3");
/// graph.add_edge(chebi.clone(), mesh.clone(), "chebi");
/// graph.add_edge(mesh.clone(), chebi.clone(), "mesh");
/// assert_eq!(1, graph.edge_count());
/// assert_eq!(["chebi", "mesh"], graph.provenance(&chebi, &mesh));
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct XrefGraph {
    nodes: Vec<Reference>,
    ids: FxHashMap<Reference, usize>,
    adjacency: Vec<Vec<usize>>,
    /// Keyed by `(min id, max id)`
    provenance: FxHashMap<(usize, usize), Vec<String>>,
}

impl XrefGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from the xrefs of the given documents.
    ///
    /// Each edge goes from a stanza to one of its xrefs and is labelled with the ontology prefix.
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a OboDocument>) -> Self {
        let mut graph = Self::new();
        for document in documents {
            graph.add_document(document);
        }
        graph
    }

    pub fn add_document(&mut self, document: &OboDocument) {
        let ontology = document.ontology();
        let stanzas = document
            .typedefs
            .iter()
            .map(|typedef| typedef.stanza())
            .chain(document.terms.iter().map(|term| term.stanza()));
        let mut count = 0;
        for stanza in stanzas {
            for xref in stanza.xrefs() {
                self.add_edge(stanza.reference().clone(), xref.clone(), ontology);
                count += 1;
            }
        }
        tracing::debug!(ontology, count, "loaded xrefs");
    }

    /// Adds a node if it is not already present and returns its id.
    pub fn add_node(&mut self, node: Reference) -> usize {
        if let Some(id) = self.ids.get(&node) {
            return *id;
        }
        let id = self.nodes.len();
        self.ids.insert(node.clone(), id);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        id
    }

    /// Records that `source` and `target` are cross-referenced according to `provenance`.
    pub fn add_edge(&mut self, source: Reference, target: Reference, provenance: impl Into<String>) {
        if source == target {
            tracing::debug!(node = %source, "ignoring a self cross-reference");
            return;
        }
        let source = self.add_node(source);
        let target = self.add_node(target);
        let labels = self
            .provenance
            .entry((source.min(target), source.max(target)))
            .or_default();
        if labels.is_empty() {
            self.adjacency[source].push(target);
            self.adjacency[target].push(source);
        }
        let provenance = provenance.into();
        if !labels.contains(&provenance) {
            labels.push(provenance);
        }
    }

    #[inline]
    pub fn contains(&self, node: &Reference) -> bool {
        self.ids.contains_key(node)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.provenance.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Reference> {
        self.nodes.iter()
    }

    /// The neighbors of a node in the order their edges were added.
    pub fn neighbors(&self, node: &Reference) -> impl Iterator<Item = &Reference> {
        self.id(node)
            .map(|id| self.adjacency[id].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|id| &self.nodes[*id])
    }

    /// The provenance labels of the edge between two nodes, empty if there is no such edge.
    pub fn provenance(&self, source: &Reference, target: &Reference) -> &[String] {
        let (Some(source), Some(target)) = (self.id(source), self.id(target)) else {
            return &[];
        };
        self.edge_provenance(source, target)
    }

    pub(crate) fn id(&self, node: &Reference) -> Option<usize> {
        self.ids.get(node).copied()
    }

    pub(crate) fn node(&self, id: usize) -> &Reference {
        &self.nodes[id]
    }

    pub(crate) fn adjacent(&self, id: usize) -> &[usize] {
        &self.adjacency[id]
    }

    pub(crate) fn edge_provenance(&self, source: usize, target: usize) -> &[String] {
        self.provenance
            .get(&(source.min(target), source.max(target)))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxobo::{OboHeader, Term};

    #[test]
    fn test_edges_are_undirected() {
        let mut graph = XrefGraph::new();
        let a = Reference::new_unchecked("hgnc", "1");
        let b = Reference::new_unchecked("ncbigene", "2");
        graph.add_edge(a.clone(), b.clone(), "x");
        graph.add_edge(b.clone(), a.clone(), "x");
        graph.add_edge(a.clone(), a.clone(), "x");
        assert_eq!(2, graph.node_count());
        assert_eq!(1, graph.edge_count());
        assert_eq!(vec![&b], graph.neighbors(&a).collect::<Vec<_>>());
        assert_eq!(vec![&a], graph.neighbors(&b).collect::<Vec<_>>());
        assert_eq!(["x"], graph.provenance(&b, &a));
        assert!(graph.provenance(&a, &Reference::new_unchecked("go", "1")).is_empty());
    }

    #[test]
    fn test_from_documents() {
        let mut document = OboDocument::new(OboHeader::new("go"));
        let mut term = Term::new(Reference::new_unchecked("go", "0050069"));
        term.append_xref(Reference::new_unchecked("ec", "1.4.1.15"));
        document.terms.push(term);
        let graph = XrefGraph::from_documents([&document]);
        assert_eq!(
            ["go"],
            graph.provenance(
                &Reference::new_unchecked("go", "0050069"),
                &Reference::new_unchecked("ec", "1.4.1.15")
            )
        );
    }
}
