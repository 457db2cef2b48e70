#[allow(unused_imports)]
use log::{debug, error, info, trace};

use crate::error::GraphResult;
use crate::gfagraph::GfaGraph;

use super::components::dovetail_connected_components;

/// What [`remove_dead_ends`] does with nodes of unknown length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadEndPolicy {
    /// Treat an unknown length as zero.
    RemoveUnknown,
    KeepUnknown,
}

impl Default for DeadEndPolicy {
    fn default() -> Self {
        DeadEndPolicy::RemoveUnknown
    }
}

/// Remove the nodes shorter than `min_length` that have no dovetail
/// neighbor on at least one side and at most one on the other. Returns
/// the ids of the removed nodes.
pub fn remove_dead_ends(
    graph: &mut GfaGraph,
    min_length: u64,
    policy: DeadEndPolicy,
) -> GraphResult<Vec<String>> {
    let to_remove: Vec<String> = graph
        .nodes()
        .filter(|node| {
            let degrees = (graph.left_degree(node.id()), graph.right_degree(node.id()));
            if !matches!(degrees, (0, 0) | (0, 1) | (1, 0)) {
                return false;
            }
            match (node.length(), policy) {
                (Some(length), _) => length < min_length,
                (None, DeadEndPolicy::RemoveUnknown) => 0 < min_length,
                (None, DeadEndPolicy::KeepUnknown) => false,
            }
        })
        .map(|node| node.id().to_string())
        .collect();

    for id in to_remove.iter() {
        trace!("removing dead end {}", id);
        graph.remove_node(id)?;
    }
    debug!("removed {} dead ends", to_remove.len());
    Ok(to_remove)
}

/// Remove every dovetail component whose known sequence lengths add up
/// to less than `min_length`. Returns the ids of the removed nodes.
pub fn remove_small_components(
    graph: &mut GfaGraph,
    min_length: u64,
) -> GraphResult<Vec<String>> {
    let mut to_remove = Vec::new();
    for component in dovetail_connected_components(graph) {
        let length: u64 = component
            .iter()
            .filter_map(|id| graph.node(id).and_then(|n| n.length()))
            .sum();
        if length < min_length {
            to_remove.extend(component);
        }
    }

    for id in to_remove.iter() {
        graph.remove_node(id)?;
    }
    debug!("removed {} nodes in small components", to_remove.len());
    Ok(to_remove)
}
