/*!

The graph store

A [`GfaGraph`] owns every node, edge and subgraph in slot arenas and
keeps its secondary indices (by id, by incident node and by
`(from, to)` pair) in step with each mutation. Mutations validate
their input first and leave the graph untouched when they fail.

*/

use fnv::{FnvHashMap, FnvHashSet};
use std::collections::BTreeSet;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

pub(crate) mod index;
pub mod search;
pub mod view;

pub use search::{ignore_value, value_equality};
pub use view::GraphView;

use crate::config::GraphConfig;
use crate::element::{
    Edge, EdgeEnd, EdgeKind, EdgeRecord, Element, ElementId, Node, NodeRecord,
    Record, Subgraph, SubgraphRecord,
};
use crate::error::{GraphError, GraphResult};

use index::{GraphIndex, Slot};

/// Selects edges by id, by directed node pair, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKey {
    Id(String),
    /// Every edge going from the first node to the second.
    Between(String, String),
    /// The edge with the given id, if it goes between the two nodes.
    Exact(String, String, String),
}

impl EdgeKey {
    pub fn id(id: &str) -> Self {
        EdgeKey::Id(id.to_string())
    }

    pub fn between(from: &str, to: &str) -> Self {
        EdgeKey::Between(from.to_string(), to.to_string())
    }

    pub fn exact(from: &str, to: &str, id: &str) -> Self {
        EdgeKey::Exact(from.to_string(), to.to_string(), id.to_string())
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKey::Id(id) => write!(f, "id `{}`", id),
            EdgeKey::Between(from, to) => write!(f, "`{}` -> `{}`", from, to),
            EdgeKey::Exact(from, to, id) => {
                write!(f, "id `{}` on `{}` -> `{}`", id, from, to)
            }
        }
    }
}

/// An overlap graph of segments, the edges between them and the
/// subgraphs grouping them.
#[derive(Debug, Clone, Default)]
pub struct GfaGraph {
    config: GraphConfig,
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    subgraphs: Vec<Option<Subgraph>>,
    pub(crate) index: GraphIndex,
    next_virtual: u64,
}

impl GfaGraph {
    pub fn new() -> GfaGraph {
        Default::default()
    }

    pub fn with_config(config: GraphConfig) -> GfaGraph {
        GfaGraph {
            config,
            ..Default::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Remove every element and reset the virtual id counter. The
    /// configuration is kept.
    pub fn clear(&mut self) {
        *self = GfaGraph::with_config(self.config);
    }

    /// The number the next virtual id will receive.
    #[inline]
    pub fn next_virtual_id(&self) -> u64 {
        self.next_virtual
    }

    /// Recompute the virtual id counter from the ids in the graph: one
    /// past the largest virtual id among edges and subgraphs.
    pub fn rederive_virtual_ids(&mut self) {
        let edge_ids = self.edges().map(|e| e.id());
        let sub_ids = self.subgraphs().map(|s| s.id());
        self.next_virtual = edge_ids
            .chain(sub_ids)
            .filter_map(ElementId::virtual_number)
            .max()
            .map(|max| max + 1)
            .unwrap_or(0);
    }

    fn bump_virtual(&mut self, id: &ElementId) {
        if let Some(n) = id.virtual_number() {
            self.next_virtual = self.next_virtual.max(n + 1);
        }
    }

    pub fn add_node(&mut self, record: NodeRecord) -> GraphResult<String> {
        let node = Node::from_record(record)?;
        if self.index.contains_key(node.id()) {
            return Err(GraphError::DuplicateId(node.id));
        }
        let id = node.id.clone();
        trace!("adding node {}", id);
        self.insert_node(node);
        Ok(id)
    }

    /// Add an edge and return the id it is indexed by, virtual if the
    /// record did not carry one.
    pub fn add_edge(&mut self, record: EdgeRecord) -> GraphResult<String> {
        let id = ElementId::resolve(record.id.as_deref(), self.next_virtual, "edge")?;
        let edge = Edge::from_record(record, id)?;
        self.check_edge(&edge)?;

        let key = edge.key();
        trace!(
            "adding {} {}: {} -> {}",
            edge.kind().name(),
            key,
            edge.from(),
            edge.to()
        );
        self.insert_edge(edge);
        Ok(key)
    }

    pub fn add_subgraph(&mut self, record: SubgraphRecord) -> GraphResult<String> {
        let id =
            ElementId::resolve(record.id.as_deref(), self.next_virtual, "subgraph")?;
        let subgraph = Subgraph::from_record(record, id)?;

        let key = subgraph.key();
        if self.index.contains_key(&key) {
            return Err(GraphError::DuplicateId(key));
        }
        trace!("adding subgraph {}", key);
        self.insert_subgraph(subgraph);
        Ok(key)
    }

    /// Add a record of any kind.
    pub fn add_element<R: Into<Record>>(&mut self, record: R) -> GraphResult<String> {
        match record.into() {
            Record::Node(r) => self.add_node(r),
            Record::Edge(r) => self.add_edge(r),
            Record::Subgraph(r) => self.add_subgraph(r),
        }
    }

    fn check_edge(&self, edge: &Edge) -> GraphResult<()> {
        let key = edge.key();
        if self.index.contains_key(&key) {
            return Err(GraphError::DuplicateId(key));
        }

        if self.config.strict_references {
            let is_fragment = matches!(edge.kind(), EdgeKind::Fragment { .. });
            // The `to` end of a fragment is an external read.
            let ends: &[EdgeEnd] = if is_fragment {
                &[EdgeEnd::From]
            } else {
                &[EdgeEnd::From, EdgeEnd::To]
            };
            for &end in ends {
                let id = edge.handle(end).id();
                if !self.index.nodes.contains_key(id) {
                    return Err(GraphError::MissingNode {
                        edge: key,
                        node: id.to_string(),
                    });
                }
            }
        }

        if self.config.check_overlap_lengths {
            for &end in [EdgeEnd::From, EdgeEnd::To].iter() {
                let extent = match extent_on(edge, end) {
                    Some(x) => x,
                    None => continue,
                };
                let node_id = edge.handle(end).id();
                let length = match self.node(node_id).and_then(Node::length) {
                    Some(l) => l,
                    None => continue,
                };
                if extent > length {
                    return Err(GraphError::OverlapTooLong {
                        edge: key,
                        node: node_id.to_string(),
                        overlap: extent,
                        length,
                    });
                }
            }
        }

        Ok(())
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> Slot {
        let slot = self.nodes.len();
        self.index.nodes.insert(node.id.clone(), slot);
        self.nodes.push(Some(node));
        slot
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) -> Slot {
        self.bump_virtual(edge.id());
        let slot = self.edges.len();
        self.index.insert_edge(slot, &edge);
        self.edges.push(Some(edge));
        slot
    }

    pub(crate) fn insert_subgraph(&mut self, subgraph: Subgraph) -> Slot {
        self.bump_virtual(subgraph.id());
        let slot = self.subgraphs.len();
        self.index.subgraphs.insert(subgraph.key(), slot);
        self.subgraphs.push(Some(subgraph));
        slot
    }

    pub(crate) fn take_edge(&mut self, slot: Slot) -> Option<Edge> {
        let edge = self.edges.get_mut(slot)?.take()?;
        self.index.remove_edge(slot, &edge);
        Some(edge)
    }

    /// Swap the edge at `slot` for `edge`, keeping the slot.
    pub(crate) fn replace_edge(&mut self, slot: Slot, edge: Edge) -> Option<Edge> {
        let old = self.take_edge(slot)?;
        self.index.insert_edge(slot, &edge);
        self.edges[slot] = Some(edge);
        Some(old)
    }

    pub(crate) fn take_node(&mut self, id: &str) -> Option<Node> {
        let slot = *self.index.nodes.get(id)?;
        let node = self.nodes.get_mut(slot)?.take()?;
        self.index.nodes.remove(id);
        Some(node)
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let slot = *self.index.nodes.get(id)?;
        self.nodes.get_mut(slot)?.as_mut()
    }

    #[inline]
    pub(crate) fn edge_at(&self, slot: Slot) -> Option<&Edge> {
        self.edges.get(slot)?.as_ref()
    }

    pub(crate) fn edge_slot(&self, id: &str) -> Option<Slot> {
        self.index.edges.get(id).copied()
    }

    /// Remove a node together with every edge that has it as an
    /// endpoint.
    pub fn remove_node(&mut self, id: &str) -> GraphResult<Node> {
        if !self.index.nodes.contains_key(id) {
            return Err(GraphError::NoSuchNode(id.to_string()));
        }
        let incident = self.index.incident(id).to_vec();
        for slot in incident {
            self.take_edge(slot);
        }
        let node = self
            .take_node(id)
            .ok_or_else(|| GraphError::NoSuchNode(id.to_string()))?;
        debug!("removed node {} and its edges", id);
        Ok(node)
    }

    /// Remove every edge matching `key`; at least one must match.
    pub fn remove_edge(&mut self, key: EdgeKey) -> GraphResult<Vec<Edge>> {
        let slots = self.edge_slots(&key);
        if slots.is_empty() {
            return Err(GraphError::NoSuchEdge(key.to_string()));
        }
        Ok(slots
            .into_iter()
            .filter_map(|slot| self.take_edge(slot))
            .collect())
    }

    pub fn remove_subgraph(&mut self, id: &str) -> GraphResult<Subgraph> {
        let slot = self
            .index
            .subgraphs
            .remove(id)
            .ok_or_else(|| GraphError::NoSuchSubgraph(id.to_string()))?;
        self.subgraphs
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or_else(|| GraphError::NoSuchSubgraph(id.to_string()))
    }

    pub(crate) fn edge_slots(&self, key: &EdgeKey) -> Vec<Slot> {
        match key {
            EdgeKey::Id(id) => self.edge_slot(id).into_iter().collect(),
            EdgeKey::Between(from, to) => self.index.between(from, to).to_vec(),
            EdgeKey::Exact(from, to, id) => self
                .edge_slot(id)
                .filter(|&slot| {
                    self.edge_at(slot)
                        .map(|e| e.from().id() == from && e.to().id() == to)
                        .unwrap_or(false)
                })
                .into_iter()
                .collect(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        let slot = *self.index.nodes.get(id)?;
        self.nodes.get(slot)?.as_ref()
    }

    #[inline]
    pub fn has_node(&self, id: &str) -> bool {
        self.index.nodes.contains_key(id)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.index.nodes.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter_map(Option::as_ref)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_at(self.edge_slot(id)?)
    }

    pub fn edges_matching(&self, key: &EdgeKey) -> Vec<&Edge> {
        self.edge_slots(key)
            .into_iter()
            .filter_map(|slot| self.edge_at(slot))
            .collect()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.index.edges.len()
    }

    pub fn subgraphs(&self) -> impl Iterator<Item = &Subgraph> {
        self.subgraphs.iter().filter_map(Option::as_ref)
    }

    pub fn subgraph(&self, id: &str) -> Option<&Subgraph> {
        let slot = *self.index.subgraphs.get(id)?;
        self.subgraphs.get(slot)?.as_ref()
    }

    #[inline]
    pub fn subgraph_count(&self) -> usize {
        self.index.subgraphs.len()
    }

    /// Look up any element by id.
    pub fn get(&self, key: &str) -> Option<Element<'_>> {
        if let Some(node) = self.node(key) {
            Some(Element::Node(node))
        } else if let Some(edge) = self.edge(key) {
            Some(Element::Edge(edge))
        } else {
            self.subgraph(key).map(Element::Subgraph)
        }
    }

    /// Every edge having `id` as one of its endpoints, in insertion
    /// order.
    pub fn incident_edges(&self, id: &str) -> Vec<&Edge> {
        self.index
            .incident(id)
            .iter()
            .filter_map(|&slot| self.edge_at(slot))
            .collect()
    }

    /// Ids of the nodes reached by the edges leaving `id`.
    pub fn successors(&self, id: &str) -> BTreeSet<String> {
        self.incident_edges(id)
            .into_iter()
            .filter(|e| e.from().id() == id)
            .map(|e| e.to().id.clone())
            .collect()
    }

    /// Ids of the nodes sharing an edge with `id`, in either direction.
    pub fn neighbors(&self, id: &str) -> BTreeSet<String> {
        self.incident_edges(id)
            .into_iter()
            .filter_map(|e| e.other_end(id))
            .map(|h| h.id.clone())
            .collect()
    }

    /// An independent copy of the nodes in `nodes` and of the edges
    /// between them. Ids not in the graph are ignored.
    pub fn induced_subgraph<I, S>(&self, nodes: I) -> GfaGraph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep: FnvHashSet<String> = nodes
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut copy = GfaGraph::with_config(self.config);
        for node in self.nodes().filter(|n| keep.contains(n.id())) {
            copy.insert_node(node.clone());
        }
        for edge in self.edges() {
            if keep.contains(edge.from().id()) && keep.contains(edge.to().id()) {
                copy.insert_edge(edge.clone());
            }
        }
        copy.rederive_virtual_ids();
        copy
    }

    /// A view on the nodes in `nodes` and the edges between them.
    /// Mutations through the view apply to this graph.
    pub fn induced_subgraph_mut<I, S>(&mut self, nodes: I) -> GraphView<'_>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = nodes
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .filter(|id| self.has_node(id))
            .collect();
        GraphView::new(self, nodes)
    }

    /// Build an independent graph out of the members of the subgraph
    /// `id`. Edge members bring their endpoint nodes along, nested
    /// subgraphs are copied as subgraphs.
    pub fn expand_subgraph(&self, id: &str) -> GraphResult<GfaGraph> {
        let subgraph = self
            .subgraph(id)
            .ok_or_else(|| GraphError::NoSuchSubgraph(id.to_string()))?;

        let mut nodes: Vec<&Node> = Vec::new();
        let mut edges: Vec<&Edge> = Vec::new();
        let mut subgraphs: Vec<&Subgraph> = Vec::new();

        for (member, _) in subgraph.elements() {
            match self.get(member) {
                Some(Element::Node(node)) => nodes.push(node),
                Some(Element::Edge(edge)) => {
                    edges.push(edge);
                    nodes.extend(self.node(edge.from().id()));
                    nodes.extend(self.node(edge.to().id()));
                }
                Some(Element::Subgraph(sub)) => subgraphs.push(sub),
                None => {
                    warn!("subgraph {}: member {} is not in the graph", id, member)
                }
            }
        }

        let mut expanded = GfaGraph::with_config(self.config);
        for node in nodes {
            if !expanded.has_node(node.id()) {
                expanded.insert_node(node.clone());
            }
        }
        for edge in edges {
            expanded.insert_edge(edge.clone());
        }
        for sub in subgraphs {
            expanded.insert_subgraph(sub.clone());
        }
        expanded.rederive_virtual_ids();

        debug!(
            "expanded subgraph {}: {} nodes, {} edges, {} subgraphs",
            id,
            expanded.node_count(),
            expanded.edge_count(),
            expanded.subgraph_count()
        );
        Ok(expanded)
    }
}

/// How far into the `end` node an edge reaches, for the overlap length
/// check.
fn extent_on(edge: &Edge, end: EdgeEnd) -> Option<u64> {
    match edge.kind() {
        EdgeKind::Containment { position, overlap } => match end {
            EdgeEnd::From => Some(position + overlap.reference_length().unwrap_or(0)),
            EdgeEnd::To => overlap.query_length(),
        },
        EdgeKind::Positioned { .. } | EdgeKind::Fragment { .. } => {
            edge.span(end).map(|s| s.end.value)
        }
        EdgeKind::Link { .. } => edge.overlap_on(end),
        EdgeKind::Gap { .. } => None,
    }
}

/// Compares two collections of edges or subgraphs: named elements by
/// id, virtual ones as a multiset.
fn same_elements<T: PartialEq>(
    ours: Vec<&T>,
    theirs: Vec<&T>,
    id: fn(&T) -> &ElementId,
) -> bool {
    if ours.len() != theirs.len() {
        return false;
    }

    let named: FnvHashMap<String, &T> = theirs
        .iter()
        .filter(|t| !id(t).is_virtual())
        .map(|t| (id(t).key(), *t))
        .collect();

    let mut unmatched: Vec<&T> = theirs
        .iter()
        .filter(|t| id(t).is_virtual())
        .copied()
        .collect();

    for t in ours {
        if id(t).is_virtual() {
            match unmatched.iter().position(|u| *u == t) {
                Some(ix) => {
                    unmatched.swap_remove(ix);
                }
                None => return false,
            }
        } else if named.get(&id(t).key()) != Some(&t) {
            return false;
        }
    }

    unmatched.is_empty()
}

impl PartialEq for GfaGraph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.nodes().all(|n| other.node(n.id()) == Some(n))
            && same_elements(self.edges().collect(), other.edges().collect(), Edge::id)
            && same_elements(
                self.subgraphs().collect(),
                other.subgraphs().collect(),
                Subgraph::id,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Alignment, Position, Span};

    fn chain() -> GfaGraph {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("a", "ACGTACGT")).unwrap();
        graph.add_node(NodeRecord::new("b", "TTTT")).unwrap();
        graph.add_node(NodeRecord::new("c", "GGG")).unwrap();
        graph
            .add_edge(
                EdgeRecord::link("a", '+', "b", '+', Alignment::matches(2))
                    .with_id("ab"),
            )
            .unwrap();
        graph
            .add_edge(EdgeRecord::link("b", '+', "c", '-', Alignment::matches(1)))
            .unwrap();
        graph
    }

    #[test]
    fn virtual_ids_increase() {
        let mut graph = chain();
        assert!(graph.edge("virtual_0").is_some());
        let id = graph
            .add_edge(EdgeRecord::link("a", '+', "c", '+', Alignment::Unspecified).with_id("*"))
            .unwrap();
        assert_eq!(id, "virtual_1");
        let id = graph
            .add_subgraph(SubgraphRecord::new(None).with_member("a", None))
            .unwrap();
        assert_eq!(id, "virtual_2");
        assert_eq!(graph.edge(&id), None);
        assert_eq!(graph.next_virtual_id(), 3);

        graph
            .add_edge(
                EdgeRecord::link("b", '+', "a", '+', Alignment::Unspecified)
                    .with_id("virtual_10"),
            )
            .unwrap();
        assert_eq!(graph.next_virtual_id(), 11);

        graph.remove_edge(EdgeKey::id("virtual_10")).unwrap();
        graph.rederive_virtual_ids();
        assert_eq!(graph.next_virtual_id(), 3);
    }

    #[test]
    fn overlap_lengths_unchecked() {
        let config = GraphConfig::default().with_overlap_length_check(false);
        let mut graph = GfaGraph::with_config(config);
        graph.add_node(NodeRecord::new("b", "TTTT")).unwrap();
        graph.add_node(NodeRecord::new("c", "GGG")).unwrap();

        let id = graph
            .add_edge(EdgeRecord::link("b", '+', "c", '+', Alignment::matches(5)))
            .unwrap();
        assert_eq!(graph.edge(&id).and_then(|e| e.overlap_on(EdgeEnd::From)), Some(5));
        assert!(!graph.config().check_overlap_lengths);
    }

    #[test]
    fn failed_insertions_leave_graph_unchanged() {
        let mut graph = chain();
        let before = graph.clone();

        assert!(matches!(
            graph.add_edge(EdgeRecord::link("a", '+', "x", '+', Alignment::Unspecified)),
            Err(GraphError::MissingNode { .. })
        ));
        assert!(matches!(
            graph.add_edge(
                EdgeRecord::link("a", '+', "c", '+', Alignment::Unspecified).with_id("ab")
            ),
            Err(GraphError::DuplicateId(_))
        ));
        assert!(matches!(
            graph.add_edge(EdgeRecord::link("b", '+', "c", '+', Alignment::matches(5))),
            Err(GraphError::OverlapTooLong { length: 4, overlap: 5, .. })
        ));
        assert!(matches!(
            graph.add_node(NodeRecord::new("a", "A")),
            Err(GraphError::DuplicateId(_))
        ));
        assert!(matches!(
            graph.add_node(NodeRecord::new("*", "A")),
            Err(GraphError::Validation(_))
        ));

        assert_eq!(graph, before);
        assert_eq!(graph.next_virtual_id(), 1);
    }

    #[test]
    fn lenient_references() {
        let config = GraphConfig::default().with_strict_references(false);
        let mut graph = GfaGraph::with_config(config);
        graph.add_node(NodeRecord::new("a", "ACGT")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '+', "z", '+', Alignment::Unspecified))
            .unwrap();
        assert_eq!(graph.incident_edges("z").len(), 1);
        assert_eq!(graph.successors("a").into_iter().collect::<Vec<_>>(), vec!["z"]);
    }

    #[test]
    fn fragments_point_outside_the_graph() {
        let mut graph = chain();
        let span = |b, e| Span::new(Position::new(b), Position::new(e));
        graph
            .add_edge(EdgeRecord::fragment(
                "a",
                "read7",
                '-',
                span(0, 4),
                span(10, 14),
                Alignment::Unspecified,
            ))
            .unwrap();
        assert!(!graph.has_node("read7"));
        assert_eq!(graph.edges_matching(&EdgeKey::between("a", "read7")).len(), 1);
    }

    #[test]
    fn remove_by_key() {
        let mut graph = chain();
        graph
            .add_edge(EdgeRecord::gap("a", '+', "b", '+', 10, None).with_id("g"))
            .unwrap();

        assert!(graph.remove_edge(EdgeKey::exact("b", "a", "ab")).is_err());
        let removed = graph.remove_edge(EdgeKey::exact("a", "b", "ab")).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(graph.edge("ab").is_none());

        graph
            .add_edge(
                EdgeRecord::link("a", '+', "b", '+', Alignment::matches(2))
                    .with_id("ab"),
            )
            .unwrap();
        let removed = graph.remove_edge(EdgeKey::between("a", "b")).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(graph.remove_edge(EdgeKey::between("a", "b")).is_err());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_node_cascades() {
        let mut graph = chain();
        graph.remove_node("b").unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.incident_edges("a").is_empty());
        assert!(graph.remove_node("b").is_err());
        assert!(graph.remove_subgraph("p1").is_err());
    }

    #[test]
    fn get_any_element() {
        let mut graph = chain();
        graph
            .add_subgraph(SubgraphRecord::new(Some("p1")).with_member("a", Some('+')))
            .unwrap();
        assert!(matches!(graph.get("a"), Some(Element::Node(_))));
        assert!(matches!(graph.get("ab"), Some(Element::Edge(_))));
        assert!(matches!(graph.get("p1"), Some(Element::Subgraph(_))));
        assert!(graph.get("zz").is_none());
        assert_eq!(
            graph.neighbors("b").into_iter().collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn equality_ignores_virtual_order() {
        let mut g1 = GfaGraph::new();
        let mut g2 = GfaGraph::new();
        for g in [&mut g1, &mut g2].iter_mut() {
            g.add_node(NodeRecord::new("a", "AAAA")).unwrap();
            g.add_node(NodeRecord::new("b", "CCCC")).unwrap();
        }
        let l1 = EdgeRecord::link("a", '+', "b", '+', Alignment::matches(1));
        let l2 = EdgeRecord::link("b", '+', "a", '+', Alignment::matches(2));
        g1.add_edge(l1.clone()).unwrap();
        g1.add_edge(l2.clone()).unwrap();
        g2.add_edge(l2).unwrap();
        g2.add_edge(l1).unwrap();
        assert_eq!(g1, g2);

        g2.add_node(NodeRecord::new("c", "G")).unwrap();
        assert_ne!(g1, g2);
    }

    #[test]
    fn copies_are_independent() {
        let graph = chain();
        let mut copy = graph.induced_subgraph(&["a", "b", "nope"]);
        assert_eq!(copy.node_count(), 2);
        assert_eq!(copy.edge_count(), 1);
        assert_eq!(copy.next_virtual_id(), 0);

        copy.remove_node("a").unwrap();
        assert!(graph.has_node("a"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn expand_members() {
        let mut graph = chain();
        graph
            .add_subgraph(
                SubgraphRecord::new(Some("p1"))
                    .with_member("ab", None)
                    .with_member("c", None)
                    .with_member("missing", None),
            )
            .unwrap();
        graph
            .add_subgraph(SubgraphRecord::new(Some("p2")).with_member("p1", None))
            .unwrap();

        let expanded = graph.expand_subgraph("p1").unwrap();
        assert_eq!(expanded.node_count(), 3);
        assert_eq!(expanded.edge_count(), 1);
        assert!(expanded.edge("ab").is_some());

        let nested = graph.expand_subgraph("p2").unwrap();
        assert_eq!(nested.node_count(), 0);
        assert!(nested.subgraph("p1").is_some());

        assert_eq!(
            graph.expand_subgraph("p3").unwrap_err(),
            GraphError::NoSuchSubgraph("p3".into())
        );
    }

    #[test]
    fn clear_resets_counter() {
        let mut graph = chain();
        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.next_virtual_id(), 0);
        assert_eq!(graph, GfaGraph::new());
    }
}
