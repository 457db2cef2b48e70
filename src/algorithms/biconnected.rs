use fnv::FnvHashMap;
use std::collections::BTreeSet;

#[allow(unused_imports)]
use log::{debug, error, info, trace};

use crate::gfagraph::GfaGraph;

/// The dovetail graph as undirected simple adjacency lists over dense
/// indices.
struct DovetailAdjacency {
    ids: Vec<String>,
    neighbors: Vec<Vec<usize>>,
}

impl DovetailAdjacency {
    fn new(graph: &GfaGraph) -> Self {
        let ids: Vec<String> = graph.dovetail_nodes().into_iter().collect();
        let index: FnvHashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(ix, id)| (id.as_str(), ix))
            .collect();

        let neighbors = ids
            .iter()
            .map(|id| {
                graph
                    .dovetail_neighbors(id)
                    .iter()
                    .filter(|n| *n != id)
                    .filter_map(|n| index.get(n.as_str()).copied())
                    .collect()
            })
            .collect();

        DovetailAdjacency { ids, neighbors }
    }
}

/// Articulation points and biconnected components, computed together
/// by an iterative Hopcroft-Tarjan search.
struct BiconnectedSearch {
    adjacency: DovetailAdjacency,
    dfs_num: Vec<usize>,
    low_point: Vec<usize>,
    parent: Vec<Option<usize>>,
    current_dfs_num: usize,
    articulation_points: BTreeSet<usize>,
    components: Vec<BTreeSet<usize>>,
}

impl BiconnectedSearch {
    fn new(graph: &GfaGraph) -> Self {
        let adjacency = DovetailAdjacency::new(graph);
        let n = adjacency.ids.len();
        BiconnectedSearch {
            adjacency,
            dfs_num: vec![0; n],
            low_point: vec![0; n],
            parent: vec![None; n],
            current_dfs_num: 0,
            articulation_points: BTreeSet::new(),
            components: Vec::new(),
        }
    }

    fn visit(&mut self, u: usize) {
        self.current_dfs_num += 1;
        self.dfs_num[u] = self.current_dfs_num;
        self.low_point[u] = self.current_dfs_num;
    }

    fn compute(mut self) -> Self {
        for root in 0..self.adjacency.ids.len() {
            if self.dfs_num[root] != 0 {
                continue;
            }
            self.visit(root);

            let mut tree_neighbors = 0;
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            let mut edge_stack: Vec<(usize, usize)> = Vec::new();

            while let Some(top) = stack.last_mut() {
                let (u, ix) = *top;
                top.1 += 1;

                if let Some(&v) = self.adjacency.neighbors[u].get(ix) {
                    if self.dfs_num[v] == 0 {
                        // tree edge
                        if u == root {
                            tree_neighbors += 1;
                        }
                        self.parent[v] = Some(u);
                        self.visit(v);
                        edge_stack.push((u, v));
                        stack.push((v, 0));
                    } else if self.parent[u] != Some(v) && self.dfs_num[v] < self.dfs_num[u] {
                        // back edge
                        self.low_point[u] = self.low_point[u].min(self.dfs_num[v]);
                        edge_stack.push((u, v));
                    }
                    continue;
                }

                stack.pop();
                let p = match self.parent[u] {
                    Some(p) => p,
                    None => continue,
                };
                self.low_point[p] = self.low_point[p].min(self.low_point[u]);

                if self.low_point[u] >= self.dfs_num[p] {
                    if p != root {
                        self.articulation_points.insert(p);
                    }
                    let mut component = BTreeSet::new();
                    while let Some((a, b)) = edge_stack.pop() {
                        component.insert(a);
                        component.insert(b);
                        if (a, b) == (p, u) {
                            break;
                        }
                    }
                    self.components.push(component);
                }
            }

            if tree_neighbors > 1 {
                self.articulation_points.insert(root);
            }
        }
        self
    }

    fn names(&self, ixs: &BTreeSet<usize>) -> BTreeSet<String> {
        ixs.iter().map(|&ix| self.adjacency.ids[ix].clone()).collect()
    }
}

/// Nodes whose removal disconnects their dovetail component.
pub fn dovetail_articulation_points(graph: &GfaGraph) -> BTreeSet<String> {
    let t = std::time::Instant::now();
    let search = BiconnectedSearch::new(graph).compute();
    let points = search.names(&search.articulation_points);
    debug!(
        "found {} articulation points in {:.3} ms",
        points.len(),
        t.elapsed().as_secs_f64() * 1000.0
    );
    points
}

/// The node sets of the biconnected components of the dovetail graph.
pub fn dovetail_biconnected_components(graph: &GfaGraph) -> Vec<BTreeSet<String>> {
    let search = BiconnectedSearch::new(graph).compute();
    search
        .components
        .iter()
        .map(|component| search.names(component))
        .collect()
}
