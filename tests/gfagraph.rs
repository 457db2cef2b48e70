use std::collections::BTreeSet;

use quickcheck::{quickcheck, Arbitrary, Gen};

use gfagraph::{
    algorithms::{dovetail_connected_components, node_connected_component},
    element::{Alignment, EdgeRecord, NodeRecord, Position, Span, SubgraphRecord},
    handle::Side,
    EdgeKey, GfaGraph, GraphError,
};

/// A graph of links between up to a dozen nodes, self-loops and
/// parallel edges included.
#[derive(Debug, Clone)]
struct RandomGraph {
    nodes: usize,
    links: Vec<(usize, bool, usize, bool)>,
}

impl Arbitrary for RandomGraph {
    fn arbitrary<G: Gen>(g: &mut G) -> RandomGraph {
        let nodes = 1 + usize::arbitrary(g) % 12;
        let count = usize::arbitrary(g) % 24;
        let links = (0..count)
            .map(|_| {
                (
                    usize::arbitrary(g) % nodes,
                    bool::arbitrary(g),
                    usize::arbitrary(g) % nodes,
                    bool::arbitrary(g),
                )
            })
            .collect();
        RandomGraph { nodes, links }
    }
}

fn orient(forward: bool) -> char {
    if forward {
        '+'
    } else {
        '-'
    }
}

impl RandomGraph {
    fn build(&self) -> GfaGraph {
        let mut graph = GfaGraph::new();
        for n in 0..self.nodes {
            graph
                .add_node(NodeRecord::new(&format!("n{}", n), "ACGTACGT"))
                .unwrap();
        }
        for &(from, from_fwd, to, to_fwd) in self.links.iter() {
            graph
                .add_edge(EdgeRecord::link(
                    &format!("n{}", from),
                    orient(from_fwd),
                    &format!("n{}", to),
                    orient(to_fwd),
                    Alignment::matches(3),
                ))
                .unwrap();
        }
        graph
    }
}

quickcheck! {
    fn remove_node_removes_its_edges(random: RandomGraph, victim: usize) -> bool {
        let mut graph = random.build();
        let victim = format!("n{}", victim % random.nodes);

        let edges_before = graph.edge_count();
        let incident = graph.incident_edges(&victim).len();

        graph.remove_node(&victim).unwrap();

        !graph.has_node(&victim)
            && graph.node_count() == random.nodes - 1
            && graph.edge_count() == edges_before - incident
            && graph.incident_edges(&victim).is_empty()
            && graph
                .edges()
                .all(|e| e.from().id() != victim && e.to().id() != victim)
    }

    fn virtual_ids_follow_insertion(random: RandomGraph, drop: usize) -> bool {
        let mut graph = random.build();
        let count = random.links.len() as u64;
        if graph.next_virtual_id() != count {
            return false;
        }
        if count == 0 {
            return true;
        }

        // removing any edge but the last keeps the counter where it is
        let dropped = drop as u64 % count;
        graph.remove_edge(EdgeKey::id(&format!("virtual_{}", dropped))).unwrap();
        graph.rederive_virtual_ids();
        let expected = if dropped == count - 1 { count - 1 } else { count };
        graph.next_virtual_id() == expected
    }

    fn dovetail_components_partition_the_dovetail_nodes(random: RandomGraph) -> bool {
        let graph = random.build();
        let components: Vec<BTreeSet<String>> =
            dovetail_connected_components(&graph).collect();

        let total: usize = components.iter().map(|c| c.len()).sum();
        let union: BTreeSet<String> = components.iter().flatten().cloned().collect();
        let same_component = |a: &str, b: &str| {
            components.iter().any(|c| c.contains(a) && c.contains(b))
        };

        total == union.len()
            && union == graph.dovetail_nodes()
            && graph
                .dovetail_edges()
                .all(|e| same_component(e.from().id(), e.to().id()))
    }

    fn side_degrees_count_edge_ends(random: RandomGraph) -> bool {
        let graph = random.build();
        let total: usize = graph
            .nodes()
            .map(|n| graph.left_degree(n.id()) + graph.right_degree(n.id()))
            .sum();
        total == 2 * graph.dovetail_edges().count()
    }
}

fn span(begin: u64, end: u64, is_end: bool) -> Span {
    let end = if is_end {
        Position::end(end)
    } else {
        Position::new(end)
    };
    Span::new(Position::new(begin), end)
}

fn two_dialects() -> GfaGraph {
    let mut graph = GfaGraph::new();
    graph.add_node(NodeRecord::new("1", "CAAATAAG")).unwrap();
    graph.add_node(NodeRecord::new("2", "AGTTG")).unwrap();
    graph.add_node(NodeRecord::new("3", "TTGCC")).unwrap();
    graph.add_node(NodeRecord::unknown("4", Some(100))).unwrap();

    graph
        .add_edge(EdgeRecord::link("1", '+', "2", '+', Alignment::matches(2)).with_id("e12"))
        .unwrap();
    graph
        .add_edge(
            EdgeRecord::positioned(
                "2",
                '+',
                "3",
                '+',
                span(2, 5, true),
                span(0, 3, false),
                Alignment::matches(3),
            )
            .with_id("e23"),
        )
        .unwrap();
    graph
        .add_edge(
            EdgeRecord::containment("4", '+', "3", '-', 40, Alignment::matches(5))
                .with_id("c43"),
        )
        .unwrap();
    graph
        .add_edge(EdgeRecord::gap("3", '+', "4", '+', 120, Some(10)).with_id("g34"))
        .unwrap();
    graph
        .add_subgraph(
            SubgraphRecord::new(Some("p1"))
                .with_member("1", Some('+'))
                .with_member("e12", None)
                .with_member("2", Some('+')),
        )
        .unwrap();
    graph
}

#[test]
fn dovetails_across_dialects() {
    let graph = two_dialects();
    assert_eq!(graph.dovetail_edges().count(), 2);
    assert_eq!(graph.right("1"), vec!["2".to_string()]);
    assert_eq!(graph.left("3"), vec!["2".to_string()]);
    assert_eq!(graph.dovetail_degree("2", Side::Left), 1);
    assert_eq!(graph.dovetail_degree("4", Side::Right), 0);

    let comps: Vec<_> = dovetail_connected_components(&graph).collect();
    assert_eq!(comps.len(), 1);
    assert_eq!(node_connected_component(&graph, "4").unwrap().len(), 4);
}

#[test]
fn views_write_through_and_copies_do_not() {
    let mut graph = two_dialects();

    let copy = graph.induced_subgraph(vec!["1", "2"]);
    assert_eq!(copy.node_count(), 2);
    assert_eq!(copy.edge_count(), 1);

    {
        let mut view = graph.induced_subgraph_mut(vec!["2", "3"]);
        assert_eq!(view.edge_count(), 1);
        view.remove_edge(EdgeKey::id("e23")).unwrap();
        assert!(view.remove_edge(EdgeKey::id("e12")).is_err());
    }
    assert!(graph.edge("e23").is_none());
    assert!(graph.edge("e12").is_some());

    let mut copy = copy;
    copy.remove_node("1").unwrap();
    assert!(graph.has_node("1"));
    assert_eq!(graph.edge("e12").map(|e| e.to().id().to_string()), Some("2".into()));
}

#[test]
fn expanding_a_path() {
    let graph = two_dialects();
    let path = graph.expand_subgraph("p1").unwrap();
    assert_eq!(path.node_count(), 2);
    assert_eq!(path.edge_count(), 1);
    assert!(matches!(
        graph.expand_subgraph("p2"),
        Err(GraphError::NoSuchSubgraph(_))
    ));
}

#[test]
fn remove_edges_between() {
    let mut graph = two_dialects();
    graph
        .add_edge(EdgeRecord::link("1", '+', "2", '+', Alignment::matches(1)))
        .unwrap();
    assert_eq!(graph.edges_matching(&EdgeKey::between("1", "2")).len(), 2);

    let removed = graph.remove_edge(EdgeKey::between("1", "2")).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(graph.edges_matching(&EdgeKey::between("1", "2")).is_empty());
    assert!(matches!(
        graph.remove_edge(EdgeKey::between("1", "2")),
        Err(GraphError::NoSuchEdge(_))
    ));
}
