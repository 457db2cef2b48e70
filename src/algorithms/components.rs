use fnv::FnvHashSet;
use std::collections::{BTreeSet, VecDeque};

#[allow(unused_imports)]
use log::{debug, error, info, trace};

use crate::error::{GraphError, GraphResult};
use crate::gfagraph::GfaGraph;

/// Breadth-first search from `source` using `neighbors` as adjacency.
fn bfs<F>(source: &str, neighbors: F) -> BTreeSet<String>
where
    F: Fn(&str) -> BTreeSet<String>,
{
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    seen.insert(source.to_string());
    queue.push_back(source.to_string());

    while let Some(id) = queue.pop_front() {
        for next in neighbors(&id) {
            if !seen.contains(&next) {
                seen.insert(next.clone());
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Lazy iterator over the dovetail connected components of a graph.
/// Only nodes touched by at least one dovetail edge are part of a
/// component.
#[derive(Debug, Clone)]
pub struct DovetailComponents<'a> {
    graph: &'a GfaGraph,
    seeds: Vec<String>,
    next_seed: usize,
    seen: FnvHashSet<String>,
}

impl<'a> DovetailComponents<'a> {
    fn new(graph: &'a GfaGraph) -> Self {
        DovetailComponents {
            graph,
            seeds: graph.dovetail_nodes().into_iter().collect(),
            next_seed: 0,
            seen: FnvHashSet::default(),
        }
    }

    /// Start over from the first component.
    pub fn restart(&mut self) {
        self.next_seed = 0;
        self.seen.clear();
    }
}

impl<'a> Iterator for DovetailComponents<'a> {
    type Item = BTreeSet<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(seed) = self.seeds.get(self.next_seed) {
            self.next_seed += 1;
            if self.seen.contains(seed) {
                continue;
            }
            let graph = self.graph;
            let component = bfs(seed, |id| graph.dovetail_neighbors(id));
            self.seen.extend(component.iter().cloned());
            return Some(component);
        }
        None
    }
}

pub fn dovetail_connected_components(graph: &GfaGraph) -> DovetailComponents<'_> {
    DovetailComponents::new(graph)
}

/// The dovetail component `id` belongs to. A node without dovetail
/// edges is a component of its own.
pub fn dovetail_connected_component(
    graph: &GfaGraph,
    id: &str,
) -> GraphResult<BTreeSet<String>> {
    if !graph.has_node(id) {
        return Err(GraphError::NodeNotInGraph(id.to_string()));
    }
    Ok(bfs(id, |n| graph.dovetail_neighbors(n)))
}

/// Each dovetail component as an independent graph, holding only the
/// dovetail edges.
pub fn dovetail_component_subgraphs(graph: &GfaGraph) -> Vec<GfaGraph> {
    dovetail_connected_components(graph)
        .map(|component| graph.dovetail_subgraph(&component))
        .collect()
}

/// The weakly connected component of `id`, following edges of any
/// kind in both directions.
pub fn node_connected_component(
    graph: &GfaGraph,
    id: &str,
) -> GraphResult<BTreeSet<String>> {
    if !graph.has_node(id) {
        return Err(GraphError::NodeNotInGraph(id.to_string()));
    }
    Ok(bfs(id, |n| {
        graph
            .neighbors(n)
            .into_iter()
            .filter(|m| graph.has_node(m))
            .collect()
    }))
}

/// The nodes reachable from `id`, and the edges between them, as an
/// independent graph. Edges are followed from their `from` end only,
/// or in both directions when `weakly` is set.
pub fn reachable_subgraph(graph: &GfaGraph, id: &str, weakly: bool) -> GraphResult<GfaGraph> {
    if !graph.has_node(id) {
        return Err(GraphError::NodeNotInGraph(id.to_string()));
    }
    let reached = bfs(id, |n| {
        let next = if weakly {
            graph.neighbors(n)
        } else {
            graph.successors(n)
        };
        next.into_iter().filter(|m| graph.has_node(m)).collect()
    });
    trace!("{} nodes reachable from {}", reached.len(), id);
    Ok(graph.induced_subgraph(reached))
}

/// All weakly connected components, including isolated nodes.
pub fn connected_components(graph: &GfaGraph) -> Vec<BTreeSet<String>> {
    let t = std::time::Instant::now();
    let mut seen: FnvHashSet<String> = FnvHashSet::default();
    let mut components = Vec::new();

    for node in graph.nodes() {
        if seen.contains(node.id()) {
            continue;
        }
        let component = bfs(node.id(), |n| {
            graph
                .neighbors(n)
                .into_iter()
                .filter(|m| graph.has_node(m))
                .collect()
        });
        seen.extend(component.iter().cloned());
        components.push(component);
    }

    debug!(
        "found {} connected components in {:.3} ms",
        components.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );
    components
}
