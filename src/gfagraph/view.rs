use fnv::FnvHashSet;

use crate::element::{Edge, EdgeRecord, Node, NodeRecord};
use crate::error::{GraphError, GraphResult};

use super::{EdgeKey, GfaGraph};

/// A mutable window on a set of nodes of a [`GfaGraph`] and the edges
/// between them. Reads only see what is inside the window; mutations
/// are applied to the underlying graph.
#[derive(Debug)]
pub struct GraphView<'a> {
    graph: &'a mut GfaGraph,
    nodes: FnvHashSet<String>,
}

impl<'a> GraphView<'a> {
    pub(crate) fn new(graph: &'a mut GfaGraph, nodes: FnvHashSet<String>) -> Self {
        GraphView { graph, nodes }
    }

    #[inline]
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    fn sees(&self, edge: &Edge) -> bool {
        self.has_node(edge.from().id()) && self.has_node(edge.to().id())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.nodes().filter(move |n| self.nodes.contains(n.id()))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        if self.has_node(id) {
            self.graph.node(id)
        } else {
            None
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.graph.edges().filter(move |e| self.sees(e))
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.graph.edge(id).filter(|e| self.sees(e))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Add a node to the graph and to the view.
    pub fn add_node(&mut self, record: NodeRecord) -> GraphResult<String> {
        let id = self.graph.add_node(record)?;
        self.nodes.insert(id.clone());
        Ok(id)
    }

    /// Add an edge to the graph. Both endpoints must be in the view.
    pub fn add_edge(&mut self, record: EdgeRecord) -> GraphResult<String> {
        for id in [&record.from, &record.to].iter() {
            // the external read of a fragment is not a node
            if record.from_orient.is_none() && *id == &record.to {
                continue;
            }
            if !self.has_node(id) {
                return Err(GraphError::MissingNode {
                    edge: record.id.clone().unwrap_or_else(|| "*".to_string()),
                    node: id.to_string(),
                });
            }
        }
        self.graph.add_edge(record)
    }

    /// Remove a node of the view and its edges from the graph.
    pub fn remove_node(&mut self, id: &str) -> GraphResult<Node> {
        if !self.has_node(id) {
            return Err(GraphError::NoSuchNode(id.to_string()));
        }
        let node = self.graph.remove_node(id)?;
        self.nodes.remove(id);
        Ok(node)
    }

    /// Remove the edges matching `key` that are visible in the view.
    pub fn remove_edge(&mut self, key: EdgeKey) -> GraphResult<Vec<Edge>> {
        let slots: Vec<_> = self
            .graph
            .edge_slots(&key)
            .into_iter()
            .filter(|&slot| self.graph.edge_at(slot).map_or(false, |e| self.sees(e)))
            .collect();
        if slots.is_empty() {
            return Err(GraphError::NoSuchEdge(key.to_string()));
        }
        Ok(slots
            .into_iter()
            .filter_map(|slot| self.graph.take_edge(slot))
            .collect())
    }

    /// An independent copy of what the view sees.
    pub fn to_graph(&self) -> GfaGraph {
        self.graph.induced_subgraph(self.nodes.iter())
    }
}
