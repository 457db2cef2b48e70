use fnv::FnvHashSet;

#[allow(unused_imports)]
use log::{debug, error, info, trace};

use crate::error::{GraphError, GraphResult};
use crate::gfagraph::GfaGraph;
use crate::handle::{Handle, Orientation, Side};

/// The nodes of a linear path in order, each with the id of the edge
/// joining it to the previous node. The first node has no edge.
pub type LinearPath = Vec<(String, Option<String>)>;

/// A node inside a linear path has exactly one dovetail neighbor on
/// each side.
fn is_internal(graph: &GfaGraph, id: &str) -> bool {
    graph.left_degree(id) == 1 && graph.right_degree(id) == 1
}

/// The oriented node following `handle` along the strand, with the
/// edge leading to it, if it is also internal.
fn step(graph: &GfaGraph, handle: &Handle) -> Option<(Handle, String)> {
    let side = Side::Right.oriented(handle.orient);
    let mut ends = graph.dovetail_ends(handle.id(), side);
    if ends.len() != 1 {
        return None;
    }
    let end = ends.pop()?;
    if end.neighbor == handle.id || !is_internal(graph, &end.neighbor) {
        return None;
    }
    let orient = match end.neighbor_side {
        Side::Left => Orientation::Forward,
        Side::Right => Orientation::Backward,
    };
    Some((Handle::new(end.neighbor, orient), end.edge))
}

/// The maximal linear path through `id`. A node that is not inside a
/// linear path yields a path holding only itself.
pub fn linear_path(graph: &GfaGraph, id: &str) -> GraphResult<LinearPath> {
    if !graph.has_node(id) {
        return Err(GraphError::NodeNotInGraph(id.to_string()));
    }
    if !is_internal(graph, id) {
        return Ok(vec![(id.to_string(), None)]);
    }

    // walk back to the start of the path; coming back to `id` means
    // the path is a cycle and may as well start there
    let seed = Handle::forward(id);
    let mut start = seed.clone();
    while let Some((prev, _)) = step(graph, &start.flip()) {
        if prev.id == id {
            start = seed.clone();
            break;
        }
        start = prev.flip();
    }

    let mut path: LinearPath = vec![(start.id.clone(), None)];
    let mut current = start.clone();
    while let Some((next, edge)) = step(graph, &current) {
        if next.id == start.id {
            break;
        }
        path.push((next.id.clone(), Some(edge)));
        current = next;
    }

    trace!("linear path through {}: {} nodes", id, path.len());
    Ok(path)
}

/// Every maximal linear path of at least two nodes, each reported
/// once.
pub fn linear_paths(graph: &GfaGraph) -> GraphResult<Vec<LinearPath>> {
    let t = std::time::Instant::now();
    let mut seen: FnvHashSet<String> = FnvHashSet::default();
    let mut paths = Vec::new();

    for node in graph.nodes() {
        let id = node.id();
        if seen.contains(id) || !is_internal(graph, id) {
            continue;
        }
        let path = linear_path(graph, id)?;
        seen.extend(path.iter().map(|(n, _)| n.clone()));
        if path.len() > 1 {
            paths.push(path);
        }
    }

    debug!(
        "found {} linear paths in {:.3} ms",
        paths.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );
    Ok(paths)
}
