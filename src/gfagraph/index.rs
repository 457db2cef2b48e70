/*!

Secondary indices of a `GfaGraph`

Elements live in slot arenas; the indices map ids and node pairs to
slots and are updated on every insertion and removal.

*/

use fnv::FnvHashMap;

use crate::element::Edge;

pub(crate) type Slot = usize;

#[derive(Debug, Clone, Default)]
pub(crate) struct GraphIndex {
    pub(crate) nodes: FnvHashMap<String, Slot>,
    pub(crate) edges: FnvHashMap<String, Slot>,
    pub(crate) subgraphs: FnvHashMap<String, Slot>,
    /// Edge slots touching each node id, self-loops listed once.
    pub(crate) incidence: FnvHashMap<String, Vec<Slot>>,
    /// Edge slots for each directed `(from, to)` pair.
    pub(crate) pairs: FnvHashMap<(String, String), Vec<Slot>>,
}

fn remove_slot(slots: &mut Vec<Slot>, slot: Slot) -> bool {
    match slots.iter().position(|&s| s == slot) {
        Some(ix) => {
            slots.remove(ix);
            true
        }
        None => false,
    }
}

impl GraphIndex {
    /// True if `id` names a node, an edge or a subgraph.
    pub(crate) fn contains_key(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
            || self.edges.contains_key(id)
            || self.subgraphs.contains_key(id)
    }

    pub(crate) fn insert_edge(&mut self, slot: Slot, edge: &Edge) {
        self.edges.insert(edge.key(), slot);

        let from = edge.from().id.clone();
        let to = edge.to().id.clone();

        self.incidence.entry(from.clone()).or_default().push(slot);
        if from != to {
            self.incidence.entry(to.clone()).or_default().push(slot);
        }
        self.pairs.entry((from, to)).or_default().push(slot);
    }

    pub(crate) fn remove_edge(&mut self, slot: Slot, edge: &Edge) {
        self.edges.remove(&edge.key());

        for id in [edge.from().id(), edge.to().id()].iter() {
            let emptied = match self.incidence.get_mut(*id) {
                Some(slots) => {
                    remove_slot(slots, slot);
                    slots.is_empty()
                }
                None => false,
            };
            if emptied {
                self.incidence.remove(*id);
            }
        }

        let pair = (edge.from().id.clone(), edge.to().id.clone());
        let emptied = match self.pairs.get_mut(&pair) {
            Some(slots) => {
                remove_slot(slots, slot);
                slots.is_empty()
            }
            None => false,
        };
        if emptied {
            self.pairs.remove(&pair);
        }
    }

    pub(crate) fn incident(&self, id: &str) -> &[Slot] {
        self.incidence.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn between(&self, from: &str, to: &str) -> &[Slot] {
        self.pairs
            .get(&(from.to_string(), to.to_string()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
