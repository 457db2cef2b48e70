/*!

Traversals and transformations built on the dovetail topology

*/

pub mod biconnected;
pub mod cleanup;
pub mod compaction;
pub mod components;
pub mod linear_paths;
pub mod simple_paths;

pub use biconnected::{dovetail_articulation_points, dovetail_biconnected_components};
pub use cleanup::{remove_dead_ends, remove_small_components, DeadEndPolicy};
pub use compaction::{compact, CompactionReport};
pub use components::{
    connected_components, dovetail_component_subgraphs, dovetail_connected_component,
    dovetail_connected_components, node_connected_component, reachable_subgraph,
    DovetailComponents,
};
pub use linear_paths::{linear_path, linear_paths, LinearPath};
pub use simple_paths::{
    all_simple_paths, all_simple_paths_with_edges, dovetail_simple_paths, outgoing_dovetails,
    outgoing_edges, SimplePaths,
};
