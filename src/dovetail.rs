/*!

Dovetail overlap topology

A dovetail overlap is an edge whose alignment touches the right end
of one segment and the left end of the other, once the orientations
are taken into account. Links are always dovetails; positioned edges
are when their spans sit on the right extremities; containments,
gaps and fragments never are.

The queries in this module look at a node's physical sides, in
forward coordinates, and only count edges whose endpoints are both
nodes of the graph.

*/

use std::collections::BTreeSet;

use crate::element::{Edge, EdgeKind, Span};
use crate::gfagraph::GfaGraph;
use crate::handle::{Handle, Side};

/// The extremity of its segment a span covers, if it touches exactly
/// one of them.
fn span_extremity(span: &Span) -> Option<Side> {
    let left = span.begin.value == 0;
    let right = span.end.is_end;
    match (left, right) {
        (true, false) => Some(Side::Left),
        (false, true) => Some(Side::Right),
        _ => None,
    }
}

impl Edge {
    /// The sides of the `from` and `to` segments joined by the edge,
    /// or `None` if the edge is not a dovetail overlap.
    pub fn dovetail_sides(&self) -> Option<(Side, Side)> {
        match self.kind() {
            EdgeKind::Link { .. } => Some((
                Side::Right.oriented(self.from().orient),
                Side::Left.oriented(self.to().orient),
            )),
            EdgeKind::Positioned {
                from_span, to_span, ..
            } => {
                let from_side = span_extremity(from_span)?;
                let to_side = span_extremity(to_span)?;
                // along the strands, one overlap sits on a right end and
                // the other on a left end
                if from_side.oriented(self.from().orient)
                    == to_side.oriented(self.to().orient)
                {
                    return None;
                }
                Some((from_side, to_side))
            }
            EdgeKind::Containment { .. }
            | EdgeKind::Gap { .. }
            | EdgeKind::Fragment { .. } => None,
        }
    }

    #[inline]
    pub fn is_dovetail(&self) -> bool {
        self.dovetail_sides().is_some()
    }

    /// The dovetail as a pair `(a, b)` of oriented segments where the
    /// right end of `a` overlaps the left end of `b`.
    pub fn junction(&self) -> Option<(Handle, Handle)> {
        let (from_side, _) = self.dovetail_sides()?;
        if from_side.oriented(self.from().orient) == Side::Right {
            Some((self.from().clone(), self.to().clone()))
        } else {
            Some((self.to().clone(), self.from().clone()))
        }
    }
}

/// One dovetail edge end seen from a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DovetailEnd {
    pub neighbor: String,
    /// Side of the neighbor touched by the overlap.
    pub neighbor_side: Side,
    pub edge: String,
}

impl GfaGraph {
    fn joins_nodes(&self, edge: &Edge) -> bool {
        self.has_node(edge.from().id()) && self.has_node(edge.to().id())
    }

    /// Dovetail edges whose endpoints are both in the graph.
    pub fn dovetail_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges()
            .filter(move |e| e.is_dovetail() && self.joins_nodes(e))
    }

    /// The dovetail edge ends on the `side` of the node `id`. A
    /// self-loop touching the side twice is listed twice.
    pub fn dovetail_ends(&self, id: &str, side: Side) -> Vec<DovetailEnd> {
        let mut ends = Vec::new();
        for edge in self.incident_edges(id) {
            if !self.joins_nodes(edge) {
                continue;
            }
            let (from_side, to_side) = match edge.dovetail_sides() {
                Some(sides) => sides,
                None => continue,
            };
            if edge.from().id() == id && from_side == side {
                ends.push(DovetailEnd {
                    neighbor: edge.to().id.clone(),
                    neighbor_side: to_side,
                    edge: edge.key(),
                });
            }
            if edge.to().id() == id && to_side == side {
                ends.push(DovetailEnd {
                    neighbor: edge.from().id.clone(),
                    neighbor_side: from_side,
                    edge: edge.key(),
                });
            }
        }
        ends
    }

    /// Neighbors overlapping the right end of `id`, one entry per edge.
    pub fn right(&self, id: &str) -> Vec<String> {
        self.dovetail_ends(id, Side::Right)
            .into_iter()
            .map(|end| end.neighbor)
            .collect()
    }

    /// Neighbors overlapping the left end of `id`, one entry per edge.
    pub fn left(&self, id: &str) -> Vec<String> {
        self.dovetail_ends(id, Side::Left)
            .into_iter()
            .map(|end| end.neighbor)
            .collect()
    }

    #[inline]
    pub fn right_degree(&self, id: &str) -> usize {
        self.dovetail_ends(id, Side::Right).len()
    }

    #[inline]
    pub fn left_degree(&self, id: &str) -> usize {
        self.dovetail_ends(id, Side::Left).len()
    }

    pub fn dovetail_degree(&self, id: &str, side: Side) -> usize {
        self.dovetail_ends(id, side).len()
    }

    /// Nodes sharing a dovetail edge with `id`, on either side.
    pub fn dovetail_neighbors(&self, id: &str) -> BTreeSet<String> {
        let mut neighbors: BTreeSet<String> = self.right(id).into_iter().collect();
        neighbors.extend(self.left(id));
        neighbors
    }

    /// Nodes touched by at least one dovetail edge.
    pub fn dovetail_nodes(&self) -> BTreeSet<String> {
        let mut nodes = BTreeSet::new();
        for edge in self.dovetail_edges() {
            nodes.insert(edge.from().id.clone());
            nodes.insert(edge.to().id.clone());
        }
        nodes
    }

    /// An independent copy holding the given nodes and only the
    /// dovetail edges between them.
    pub fn dovetail_subgraph<I, S>(&self, nodes: I) -> GfaGraph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut copy = self.induced_subgraph(nodes);
        let other: Vec<String> = copy
            .edges()
            .filter(|e| !e.is_dovetail())
            .map(|e| e.key())
            .collect();
        for id in other {
            if let Some(slot) = copy.edge_slot(&id) {
                copy.take_edge(slot);
            }
        }
        copy.rederive_virtual_ids();
        copy
    }
}
