use crate::graph::XrefGraph;
use oxobo::Reference;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::io::{self, Write};

/// The namespaces preferred as canonical targets, best first.
///
/// Genes come first, then chemicals, protein families and complexes, phenotypes and taxa.
/// MeSH and ICD are last resorts.
pub const DEFAULT_PRIORITY_LIST: [&str; 24] = [
    "ncbigene",
    "hgnc",
    "rgd",
    "mgi",
    "ensembl",
    "uniprot",
    "pubchem.compound",
    "chebi",
    "drugbank",
    "chembl.compound",
    "zinc",
    "complexportal",
    "fplx",
    "ec",
    "interpro",
    "pfam",
    "signor",
    "mondo",
    "efo",
    "doid",
    "hp",
    "ncbitaxon",
    "mesh",
    "icd10",
];

const DEFAULT_CUTOFF: usize = 5;

/// One edge of a path in the xref graph.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct PathStep {
    pub source: Reference,
    pub target: Reference,
    pub provenance: Vec<String>,
}

/// Picks the best equivalent reference of a node according to a namespace priority list.
///
/// ```
/// use oxobo::Reference;
/// use oxxref::{Canonicalizer, XrefGraph};
///
/// let mut graph = XrefGraph::new();
/// graph.add_edge(
///     Reference::new_unchecked("pubchem.compound", "1"),
///     Reference::new_unchecked("chebi", "2"),
///     "chebi",
/// );
/// graph.add_edge(
///     Reference::new_unchecked("chebi", "2"),
///     Reference::new_unchecked("mesh", "3"),
///     "mesh",
/// );
/// let canonicalizer = Canonicalizer::new(graph).with_priority(["chebi", "mesh", "pubchem.compound"]);
/// assert_eq!(
///     Reference::new_unchecked("chebi", "2"),
///     canonicalizer.canonicalize(&Reference::new_unchecked("pubchem.compound", "1"))
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Canonicalizer {
    graph: XrefGraph,
    priority: FxHashMap<String, usize>,
    priority_len: usize,
    cutoff: usize,
}

impl Canonicalizer {
    /// Wraps a graph with [`DEFAULT_PRIORITY_LIST`] and a search depth of 5.
    pub fn new(graph: XrefGraph) -> Self {
        Self {
            graph,
            priority: FxHashMap::default(),
            priority_len: 0,
            cutoff: DEFAULT_CUTOFF,
        }
        .with_priority(DEFAULT_PRIORITY_LIST)
    }

    /// Sets the namespace priority list, best first.
    ///
    /// A prefix listed twice keeps its first position.
    pub fn with_priority(mut self, priority: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.priority.clear();
        let mut len = 0;
        for prefix in priority {
            let prefix = prefix.into();
            if self.priority.contains_key(&prefix) {
                tracing::warn!(prefix = prefix.as_str(), "duplicate prefix in the priority list");
                continue;
            }
            self.priority.insert(prefix, len);
            len += 1;
        }
        self.priority_len = len;
        self
    }

    /// Sets the longest path length explored from the queried node.
    #[inline]
    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[inline]
    pub fn graph(&self) -> &XrefGraph {
        &self.graph
    }

    /// The priority score of a namespace: the list length minus its position, `None` if unranked.
    pub fn priority(&self, prefix: &str) -> Option<usize> {
        self.priority
            .get(prefix)
            .map(|position| self.priority_len - position)
    }

    /// Returns the highest-priority reference reachable from `node`.
    ///
    /// Unranked references score below the queried node itself, so a node whose component has no
    /// ranked namespace is its own canonical reference. Ties go to the reference found first.
    /// Nodes absent from the graph are returned unchanged.
    pub fn canonicalize(&self, node: &Reference) -> Reference {
        let Some(start) = self.graph.id(node) else {
            return node.clone();
        };
        let mut best = start;
        let mut best_score = i64::MIN;
        for (id, _) in self.breadth_first(start, self.cutoff) {
            let score = match self.priority(self.graph.node(id).prefix()) {
                Some(priority) => i64::try_from(priority).unwrap_or(i64::MAX),
                None if id == start => 0,
                None => -1,
            };
            if score > best_score {
                best = id;
                best_score = score;
            }
        }
        self.graph.node(best).clone()
    }

    /// Maps every node of the graph to its canonical reference, in node insertion order.
    pub fn get_flat_mapping(&self) -> Vec<(Reference, Reference)> {
        self.graph
            .nodes()
            .map(|node| (node.clone(), self.canonicalize(node)))
            .collect()
    }

    /// Writes [`get_flat_mapping`](Self::get_flat_mapping) as a two column tab separated table.
    pub fn write_flat_mapping_tsv<W: Write>(&self, write: W) -> io::Result<W> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(write);
        writer.write_record(["curie", "canonical_curie"])?;
        for (node, canonical) in self.get_flat_mapping() {
            writer.write_record([node.curie(), canonical.curie()])?;
        }
        writer.into_inner().map_err(|e| e.into_error())
    }

    /// The shortest paths from `node` to every other node at most `cutoff` edges away.
    ///
    /// Paths are listed in breadth-first order. Returns `None` if the node is not in the graph.
    pub fn single_source_shortest_path(
        &self,
        node: &Reference,
        cutoff: Option<usize>,
    ) -> Option<Vec<(Reference, Vec<PathStep>)>> {
        let start = self.graph.id(node)?;
        let mut predecessors = FxHashMap::default();
        let mut paths = Vec::new();
        for (id, predecessor) in self.breadth_first(start, cutoff.unwrap_or(usize::MAX)) {
            let Some(predecessor) = predecessor else {
                continue;
            };
            predecessors.insert(id, predecessor);
            let mut nodes = vec![id];
            let mut current = id;
            while let Some(previous) = predecessors.get(&current) {
                nodes.push(*previous);
                current = *previous;
            }
            nodes.reverse();
            paths.push((self.graph.node(id).clone(), self.steps(&nodes)));
        }
        Some(paths)
    }

    /// All the shortest paths between two nodes, empty if they are not connected.
    pub fn all_shortest_paths(&self, source: &Reference, target: &Reference) -> Vec<Vec<PathStep>> {
        let (Some(source), Some(target)) = (self.graph.id(source), self.graph.id(target)) else {
            return Vec::new();
        };
        if source == target {
            return vec![Vec::new()];
        }

        let mut distances = FxHashMap::default();
        let mut predecessors = FxHashMap::<usize, Vec<usize>>::default();
        let mut queue = VecDeque::from([source]);
        distances.insert(source, 0);
        while let Some(current) = queue.pop_front() {
            let distance = distances[&current];
            if distances.get(&target).is_some_and(|d| *d <= distance) {
                break;
            }
            for &next in self.graph.adjacent(current) {
                match distances.get(&next) {
                    None => {
                        distances.insert(next, distance + 1);
                        predecessors.entry(next).or_default().push(current);
                        queue.push_back(next);
                    }
                    Some(d) if *d == distance + 1 => {
                        predecessors.entry(next).or_default().push(current);
                    }
                    Some(_) => (),
                }
            }
        }
        if !distances.contains_key(&target) {
            return Vec::new();
        }

        let mut paths = Vec::new();
        let mut stack = vec![vec![target]];
        while let Some(partial) = stack.pop() {
            let Some(&head) = partial.last() else {
                continue;
            };
            if head == source {
                let mut nodes = partial;
                nodes.reverse();
                paths.push(self.steps(&nodes));
                continue;
            }
            for &previous in predecessors.get(&head).into_iter().flatten().rev() {
                let mut extended = partial.clone();
                extended.push(previous);
                stack.push(extended);
            }
        }
        paths
    }

    /// Visits the nodes at most `cutoff` edges away from `start`, with their predecessor.
    fn breadth_first(&self, start: usize, cutoff: usize) -> Vec<(usize, Option<usize>)> {
        let mut visited = FxHashMap::default();
        visited.insert(start, 0);
        let mut order = vec![(start, None)];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let depth = visited[&current];
            if depth >= cutoff {
                continue;
            }
            for &next in self.graph.adjacent(current) {
                if !visited.contains_key(&next) {
                    visited.insert(next, depth + 1);
                    order.push((next, Some(current)));
                    queue.push_back(next);
                }
            }
        }
        order
    }

    fn steps(&self, nodes: &[usize]) -> Vec<PathStep> {
        nodes
            .windows(2)
            .map(|pair| PathStep {
                source: self.graph.node(pair[0]).clone(),
                target: self.graph.node(pair[1]).clone(),
                provenance: self.graph.edge_provenance(pair[0], pair[1]).to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curie(value: &str) -> Reference {
        let (prefix, identifier) = value.split_once(':').unwrap_or((value, ""));
        Reference::new_unchecked(prefix, identifier)
    }

    fn chain() -> Canonicalizer {
        let mut graph = XrefGraph::new();
        graph.add_edge(curie("a:1"), curie("b:1"), "x");
        graph.add_edge(curie("b:1"), curie("c:1"), "y");
        graph.add_edge(curie("c:1"), curie("d:1"), "z");
        Canonicalizer::new(graph).with_priority(["d", "c", "b", "a"])
    }

    #[test]
    fn test_priority_scores() {
        let canonicalizer = chain();
        assert_eq!(Some(4), canonicalizer.priority("d"));
        assert_eq!(Some(1), canonicalizer.priority("a"));
        assert_eq!(None, canonicalizer.priority("e"));
    }

    #[test]
    fn test_cutoff_bounds_the_search() {
        let canonicalizer = chain();
        assert_eq!(curie("d:1"), canonicalizer.canonicalize(&curie("a:1")));
        let canonicalizer = canonicalizer.with_cutoff(2);
        assert_eq!(curie("c:1"), canonicalizer.canonicalize(&curie("a:1")));
        let canonicalizer = canonicalizer.with_cutoff(0);
        assert_eq!(curie("a:1"), canonicalizer.canonicalize(&curie("a:1")));
    }

    #[test]
    fn test_single_source_shortest_path() {
        let canonicalizer = chain();
        let paths = canonicalizer
            .single_source_shortest_path(&curie("b:1"), None)
            .unwrap_or_default();
        assert_eq!(
            vec![curie("a:1"), curie("c:1"), curie("d:1")],
            paths.iter().map(|(node, _)| node.clone()).collect::<Vec<_>>()
        );
        assert_eq!(
            vec![
                PathStep {
                    source: curie("b:1"),
                    target: curie("c:1"),
                    provenance: vec!["y".to_owned()],
                },
                PathStep {
                    source: curie("c:1"),
                    target: curie("d:1"),
                    provenance: vec!["z".to_owned()],
                },
            ],
            paths[2].1
        );
        assert_eq!(
            Some(2),
            canonicalizer
                .single_source_shortest_path(&curie("b:1"), Some(1))
                .map(|paths| paths.len())
        );
        assert!(canonicalizer.single_source_shortest_path(&curie("e:1"), None).is_none());
    }

    #[test]
    fn test_all_shortest_paths() {
        let mut graph = XrefGraph::new();
        graph.add_edge(curie("a:1"), curie("b:1"), "x");
        graph.add_edge(curie("a:1"), curie("c:1"), "x");
        graph.add_edge(curie("b:1"), curie("d:1"), "x");
        graph.add_edge(curie("c:1"), curie("d:1"), "x");
        graph.add_edge(curie("d:1"), curie("e:1"), "y");
        let canonicalizer = Canonicalizer::new(graph);

        let paths = canonicalizer.all_shortest_paths(&curie("a:1"), &curie("d:1"));
        assert_eq!(2, paths.len());
        assert_eq!(curie("b:1"), paths[0][0].target);
        assert_eq!(curie("c:1"), paths[1][0].target);
        assert!(paths.iter().all(|path| path.len() == 2));

        let paths = canonicalizer.all_shortest_paths(&curie("a:1"), &curie("e:1"));
        assert_eq!(2, paths.len());
        assert!(paths.iter().all(|path| path.len() == 3));
        assert_eq!(vec!["y".to_owned()], paths[0][2].provenance);

        assert!(
            canonicalizer
                .all_shortest_paths(&curie("a:1"), &curie("z:1"))
                .is_empty()
        );
    }
}
