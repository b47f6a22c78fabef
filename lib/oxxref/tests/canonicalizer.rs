use oxobo::{MemoryRegistry, OboParser, Reference};
use oxxref::{Canonicalizer, XrefGraph};
use std::error::Error;

fn curie(value: &str) -> Reference {
    let (prefix, identifier) = value.split_once(':').unwrap_or((value, ""));
    Reference::new_unchecked(prefix, identifier)
}

fn clusters() -> Canonicalizer {
    let mut graph = XrefGraph::new();
    // fully connected
    graph.add_edge(curie("hgnc:h1"), curie("ensembl:e1"), "example_source");
    graph.add_edge(curie("hgnc:h1"), curie("omim:o1"), "example_source");
    graph.add_edge(curie("omim:o1"), curie("cds:c1"), "example_source");
    // no HGNC
    graph.add_edge(curie("omim:o2"), curie("ensembl:e2"), "example_source");
    // no ranked namespace
    graph.add_edge(curie("y:y1"), curie("z:z1"), "irrelevant_source");
    Canonicalizer::new(graph).with_priority(["hgnc", "omim", "ensembl"])
}

#[test]
fn test_priority() {
    let canonicalizer = clusters();
    assert_eq!(Some(3), canonicalizer.priority("hgnc"));
    assert_eq!(Some(2), canonicalizer.priority("omim"));
    assert_eq!(Some(1), canonicalizer.priority("ensembl"));
    assert_eq!(None, canonicalizer.priority("cds"));
}

#[test]
fn test_canonicalize() {
    let canonicalizer = clusters();
    for node in ["hgnc:h1", "ensembl:e1", "omim:o1", "cds:c1"] {
        assert_eq!(curie("hgnc:h1"), canonicalizer.canonicalize(&curie(node)), "{node}");
    }
    for node in ["omim:o2", "ensembl:e2"] {
        assert_eq!(curie("omim:o2"), canonicalizer.canonicalize(&curie(node)), "{node}");
    }
    assert_eq!(curie("xxx:x1"), canonicalizer.canonicalize(&curie("xxx:x1")));
    assert_eq!(curie("y:y1"), canonicalizer.canonicalize(&curie("y:y1")));
    assert_eq!(curie("z:z1"), canonicalizer.canonicalize(&curie("z:z1")));
}

#[test]
fn test_canonicalize_is_idempotent() {
    let canonicalizer = clusters();
    for node in canonicalizer.graph().nodes() {
        let canonical = canonicalizer.canonicalize(node);
        assert_eq!(canonical, canonicalizer.canonicalize(&canonical), "{node}");
    }
}

#[test]
fn test_prefers_ranked_namespace_over_distance() {
    let mut graph = XrefGraph::new();
    graph.add_edge(curie("pubchem.compound:1"), curie("chebi:2"), "chebi");
    graph.add_edge(curie("chebi:2"), curie("mesh:3"), "mesh");
    let canonicalizer =
        Canonicalizer::new(graph).with_priority(["chebi", "mesh", "pubchem.compound"]);
    assert_eq!(
        curie("chebi:2"),
        canonicalizer.canonicalize(&curie("pubchem.compound:1"))
    );
    assert_eq!(curie("chebi:2"), canonicalizer.canonicalize(&curie("mesh:3")));
}

#[test]
fn test_flat_mapping() -> Result<(), Box<dyn Error>> {
    let mut graph = XrefGraph::new();
    graph.add_edge(curie("mesh:3"), curie("chebi:2"), "mesh");
    let canonicalizer = Canonicalizer::new(graph);
    assert_eq!(
        vec![
            (curie("mesh:3"), curie("chebi:2")),
            (curie("chebi:2"), curie("chebi:2")),
        ],
        canonicalizer.get_flat_mapping()
    );
    assert_eq!(
        "curie\tcanonical_curie\nmesh:3\tchebi:2\nchebi:2\tchebi:2\n",
        String::from_utf8(canonicalizer.write_flat_mapping_tsv(Vec::new())?)?
    );
    Ok(())
}

#[test]
fn test_graph_from_documents() -> Result<(), Box<dyn Error>> {
    let registry = MemoryRegistry::obo_defaults();
    let parser = OboParser::new(&registry);
    let go = parser.parse_str("ontology: go\n\n[Term]\nid: GO:0050069\nxref: EC:1.4.1.15\n")?;
    let ec = parser.parse_str("ontology: ec\n\n[Term]\nid: EC:1.4.1.15\nxref: MESH:D000001\n")?;
    let graph = XrefGraph::from_documents([&go, &ec]);
    assert_eq!(3, graph.node_count());
    assert_eq!(2, graph.edge_count());
    assert_eq!(
        ["ec"],
        graph.provenance(&curie("ec:1.4.1.15"), &curie("mesh:D000001"))
    );

    let canonicalizer = Canonicalizer::new(graph);
    let paths = canonicalizer
        .single_source_shortest_path(&curie("go:0050069"), None)
        .ok_or("go:0050069 is not in the graph")?;
    assert_eq!(2, paths.len());
    let (target, steps) = &paths[1];
    assert_eq!(&curie("mesh:D000001"), target);
    assert_eq!(
        vec!["go", "ec"],
        steps
            .iter()
            .flat_map(|step| step.provenance.iter().map(String::as_str))
            .collect::<Vec<_>>()
    );
    assert_eq!(
        curie("ec:1.4.1.15"),
        canonicalizer.canonicalize(&curie("go:0050069"))
    );
    Ok(())
}
