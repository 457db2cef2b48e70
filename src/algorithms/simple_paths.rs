/*!

Enumeration of the simple paths between two nodes

The search is a depth-first search with an explicit stack of
neighbor iterators. Which neighbors a node has is decided by a
selector, so the same search runs over every edge or only over
dovetails.

*/

use std::collections::VecDeque;

use crate::error::{GraphError, GraphResult};
use crate::gfagraph::GfaGraph;

/// A path as the list of its nodes, each with the edge reaching it
/// from the previous node. The source has no edge.
pub type EdgePath = Vec<(String, Option<String>)>;

/// Selector signature: the `(neighbor, edge)` pairs to follow out of
/// a node.
pub type Selector = fn(&GfaGraph, &str) -> Vec<(String, String)>;

/// Follows every edge leaving the node.
pub fn outgoing_edges(graph: &GfaGraph, id: &str) -> Vec<(String, String)> {
    graph
        .incident_edges(id)
        .into_iter()
        .filter(|e| e.from().id() == id)
        .map(|e| (e.to().id.clone(), e.key()))
        .collect()
}

/// Follows the dovetail edges leaving the node.
pub fn outgoing_dovetails(graph: &GfaGraph, id: &str) -> Vec<(String, String)> {
    graph
        .incident_edges(id)
        .into_iter()
        .filter(|e| e.from().id() == id && e.is_dovetail())
        .filter(|e| graph.has_node(e.to().id()))
        .map(|e| (e.to().id.clone(), e.key()))
        .collect()
}

/// Lazy iterator over the simple paths from a source to a target.
pub struct SimplePaths<'a, F> {
    graph: &'a GfaGraph,
    selector: F,
    target: String,
    cutoff: usize,
    visited: EdgePath,
    stack: Vec<std::vec::IntoIter<(String, String)>>,
    pending: VecDeque<EdgePath>,
}

impl<'a, F> SimplePaths<'a, F>
where
    F: Fn(&GfaGraph, &str) -> Vec<(String, String)>,
{
    fn completed(&self, target: (String, String)) -> EdgePath {
        let mut path = self.visited.clone();
        path.push((target.0, Some(target.1)));
        path
    }
}

impl<'a, F> Iterator for SimplePaths<'a, F>
where
    F: Fn(&GfaGraph, &str) -> Vec<(String, String)>,
{
    type Item = EdgePath;

    fn next(&mut self) -> Option<EdgePath> {
        loop {
            if let Some(path) = self.pending.pop_front() {
                return Some(path);
            }

            let children = self.stack.last_mut()?;

            let child = match children.next() {
                Some(child) => child,
                None => {
                    self.stack.pop();
                    self.visited.pop();
                    continue;
                }
            };

            if self.visited.len() < self.cutoff {
                if child.0 == self.target {
                    return Some(self.completed(child));
                }
                if !self.visited.iter().any(|(n, _)| *n == child.0) {
                    let next = (self.selector)(self.graph, &child.0);
                    self.visited.push((child.0, Some(child.1)));
                    self.stack.push(next.into_iter());
                }
            } else {
                // at the cutoff, the target can only be one of the
                // remaining children of the current node
                let rest: Vec<_> = children.collect();
                for candidate in std::iter::once(child).chain(rest) {
                    if candidate.0 == self.target {
                        let path = self.completed(candidate);
                        self.pending.push_back(path);
                    }
                }
                self.stack.pop();
                self.visited.pop();
            }
        }
    }
}

/// Simple paths from `source` to `target` with the edges taken, using
/// at most `cutoff` edges (by default, one less than the node count).
pub fn all_simple_paths_with_edges<'a, F>(
    graph: &'a GfaGraph,
    source: &str,
    target: &str,
    selector: F,
    cutoff: Option<usize>,
) -> GraphResult<SimplePaths<'a, F>>
where
    F: Fn(&GfaGraph, &str) -> Vec<(String, String)>,
{
    for id in [source, target].iter() {
        if !graph.has_node(id) {
            return Err(GraphError::NodeNotInGraph(id.to_string()));
        }
    }

    let cutoff = cutoff.unwrap_or_else(|| graph.node_count().saturating_sub(1));
    let stack = if cutoff < 1 {
        Vec::new()
    } else {
        vec![selector(graph, source).into_iter()]
    };

    Ok(SimplePaths {
        graph,
        selector,
        target: target.to_string(),
        cutoff,
        visited: vec![(source.to_string(), None)],
        stack,
        pending: VecDeque::new(),
    })
}

/// Simple paths from `source` to `target` as lists of node ids.
pub fn all_simple_paths<'a, F>(
    graph: &'a GfaGraph,
    source: &str,
    target: &str,
    selector: F,
    cutoff: Option<usize>,
) -> GraphResult<impl Iterator<Item = Vec<String>> + 'a>
where
    F: Fn(&GfaGraph, &str) -> Vec<(String, String)> + 'a,
{
    let paths = all_simple_paths_with_edges(graph, source, target, selector, cutoff)?;
    Ok(paths.map(|path| path.into_iter().map(|(node, _)| node).collect()))
}

/// Simple paths following dovetail edges in their stated direction.
pub fn dovetail_simple_paths<'a>(
    graph: &'a GfaGraph,
    source: &str,
    target: &str,
    cutoff: Option<usize>,
) -> GraphResult<SimplePaths<'a, Selector>> {
    all_simple_paths_with_edges(graph, source, target, outgoing_dovetails as Selector, cutoff)
}
