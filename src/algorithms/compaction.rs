/*!

Compaction of dovetail junctions

Repeatedly picks a dovetail edge whose two ends are used by no other
dovetail, merges the two segments it joins into one, and rewires
every other edge of the removed segment onto the merged one. Stops
when no such edge is left or the configured limit is reached.

Each contraction is first planned against the unchanged graph; a plan
that cannot be completed aborts the whole run without touching the
graph.

*/

use fnv::FnvHashMap;
use std::collections::VecDeque;

#[allow(unused_imports)]
use log::{debug, error, info, trace};

use crate::config::CompactionConfig;
use crate::element::{Edge, EdgeEnd, EdgeKind, Position, Span};
use crate::error::{CompactionError, StepError};
use crate::gfagraph::GfaGraph;
use crate::handle::{Handle, Orientation};
use crate::util::dna;

/// What a compaction run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactionReport {
    pub contractions: usize,
    /// The contracted edges, in order, each with the node it removed.
    pub contracted: Vec<(String, String)>,
}

/// The junction of every dovetail edge of the graph, with how many
/// times each oriented segment appears on either side of a junction.
#[derive(Debug, Default)]
struct JunctionIndex {
    junctions: FnvHashMap<String, (Handle, Handle)>,
    from_count: FnvHashMap<Handle, usize>,
    to_count: FnvHashMap<Handle, usize>,
}

fn count(counts: &FnvHashMap<Handle, usize>, handle: &Handle) -> usize {
    counts.get(handle).copied().unwrap_or(0)
}

fn decrement(counts: &mut FnvHashMap<Handle, usize>, handle: &Handle) {
    let emptied = match counts.get_mut(handle) {
        Some(n) => {
            *n -= 1;
            *n == 0
        }
        None => false,
    };
    if emptied {
        counts.remove(handle);
    }
}

impl JunctionIndex {
    fn new(graph: &GfaGraph) -> Self {
        let mut index = JunctionIndex::default();
        for edge in graph.dovetail_edges() {
            if let Some(junction) = edge.junction() {
                index.insert(edge.key(), junction);
            }
        }
        index
    }

    fn insert(&mut self, key: String, junction: (Handle, Handle)) {
        *self.from_count.entry(junction.0.clone()).or_insert(0) += 1;
        *self.to_count.entry(junction.1.clone()).or_insert(0) += 1;
        self.junctions.insert(key, junction);
    }

    fn remove(&mut self, key: &str) {
        if let Some((a, b)) = self.junctions.remove(key) {
            decrement(&mut self.from_count, &a);
            decrement(&mut self.to_count, &b);
        }
    }

    /// The junction `(a, b)` of the edge, if the right end of `a` and
    /// the left end of `b` take part in no other dovetail.
    fn contractible(&self, key: &str) -> Option<(Handle, Handle)> {
        let (a, b) = self.junctions.get(key)?;
        let unique = count(&self.from_count, a) == 1
            && count(&self.to_count, b) == 1
            && count(&self.to_count, &a.flip()) == 0
            && count(&self.from_count, &b.flip()) == 0;
        if unique && a.id != b.id {
            Some((a.clone(), b.clone()))
        } else {
            None
        }
    }
}

/// Where the coordinates of one of the merged segments land on the
/// merged segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordMap {
    Shift(u64),
    /// Reverse strand, position `p` goes to `anchor - p`.
    Reverse(u64),
}

impl CoordMap {
    fn position(self, value: u64) -> Option<u64> {
        match self {
            CoordMap::Shift(d) => value.checked_add(d),
            CoordMap::Reverse(anchor) => anchor.checked_sub(value),
        }
    }
}

/// One contraction, computed without touching the graph.
struct Merge<'a> {
    graph: &'a GfaGraph,
    edge: String,
    keep: Handle,
    remove: Handle,
    overlap: u64,
    keep_len: Option<u64>,
    remove_len: Option<u64>,
    merged_len: Option<u64>,
}

impl<'a> Merge<'a> {
    fn new(
        graph: &'a GfaGraph,
        edge: &Edge,
        keep: Handle,
        remove: Handle,
    ) -> Result<Self, StepError> {
        let key = edge.key();
        let invalid = || StepError::InvalidJunction { edge: key.clone() };
        let keep_len = graph.node(keep.id()).ok_or_else(invalid)?.length();
        let remove_len = graph.node(remove.id()).ok_or_else(invalid)?.length();

        // the overlap is cut from the segment that comes second on the
        // merged forward strand
        let (trimmed, trimmed_len) = match (keep.orient, remove.orient) {
            (Orientation::Backward, Orientation::Backward) => (&keep, keep_len),
            _ => (&remove, remove_len),
        };
        let end = if edge.from().id == trimmed.id {
            EdgeEnd::From
        } else {
            EdgeEnd::To
        };
        let overlap = edge.overlap_on(end).unwrap_or(0);

        let out_of_range = || StepError::PositionOutOfRange {
            node: trimmed.id.clone(),
            edge: key.clone(),
        };
        if trimmed_len.map_or(false, |l| overlap > l) {
            return Err(out_of_range());
        }
        let merged_len = match (keep_len, remove_len) {
            (Some(a), Some(b)) => Some((a + b).checked_sub(overlap).ok_or_else(out_of_range)?),
            _ => None,
        };

        Ok(Merge {
            graph,
            edge: key,
            keep,
            remove,
            overlap,
            keep_len,
            remove_len,
            merged_len,
        })
    }

    fn is_merged(&self, id: &str) -> bool {
        id == self.keep.id || id == self.remove.id
    }

    /// True if the segment `id` ends up on the opposite strand of the
    /// merged segment.
    fn reverses(&self, id: &str) -> bool {
        id == self.remove.id && self.keep.orient != self.remove.orient
    }

    fn coord_map(&self, id: &str, edge: &str) -> Result<CoordMap, StepError> {
        use Orientation::{Backward as Rev, Forward as Fwd};

        let length = |node: &Handle, len: Option<u64>| {
            len.ok_or_else(|| StepError::MissingLength {
                node: node.id.clone(),
                edge: edge.to_string(),
            })
        };
        let la = || length(&self.keep, self.keep_len);
        let lb = || length(&self.remove, self.remove_len);
        let minus_overlap = |l: u64, node: &Handle| {
            l.checked_sub(self.overlap)
                .ok_or_else(|| StepError::PositionOutOfRange {
                    node: node.id.clone(),
                    edge: edge.to_string(),
                })
        };

        let on_keep = id == self.keep.id;
        let map = match (self.keep.orient, self.remove.orient, on_keep) {
            (Fwd, _, true) | (Rev, Rev, false) => CoordMap::Shift(0),
            (Fwd, Fwd, false) => CoordMap::Shift(minus_overlap(la()?, &self.keep)?),
            (Rev, _, true) => CoordMap::Shift(minus_overlap(lb()?, &self.remove)?),
            (Rev, Fwd, false) => CoordMap::Reverse(lb()?),
            (Fwd, Rev, false) => {
                CoordMap::Reverse(minus_overlap(la()?, &self.keep)? + lb()?)
            }
        };
        Ok(map)
    }

    /// The segment whose outer end is the right end of the merged
    /// segment, with its length.
    fn last(&self) -> (&Handle, Option<u64>) {
        match self.keep.orient {
            Orientation::Backward => (&self.keep, self.keep_len),
            Orientation::Forward => (&self.remove, self.remove_len),
        }
    }

    /// Whether `source` on segment `id` lands on the right end of the
    /// merged segment, when the merged length is not known.
    fn lands_on_end(&self, id: &str, source: Position, edge: &str) -> Result<bool, StepError> {
        let len = if id == self.keep.id {
            self.keep_len
        } else {
            self.remove_len
        };
        // the extremity of `id` that ends up rightmost in its image
        let rightmost = if self.reverses(id) {
            source.value == 0
        } else {
            source.is_end || len == Some(source.value)
        };
        if !rightmost {
            return Ok(false);
        }

        let (last, last_len) = self.last();
        if id == last.id {
            return Ok(true);
        }
        // the first segment reaches the end only when nothing of the
        // last one is left past the overlap
        let last_len = last_len.ok_or_else(|| StepError::MissingLength {
            node: last.id.clone(),
            edge: edge.to_string(),
        })?;
        Ok(last_len == self.overlap)
    }

    /// `source` on segment `id`, moved through `map` onto the merged
    /// segment.
    fn mark(
        &self,
        id: &str,
        map: CoordMap,
        source: Position,
        edge: &str,
    ) -> Result<Position, StepError> {
        let out_of_range = |node: &str| StepError::PositionOutOfRange {
            node: node.to_string(),
            edge: edge.to_string(),
        };
        let value = map.position(source.value).ok_or_else(|| out_of_range(id))?;
        let is_end = match self.merged_len {
            Some(l) if value > l => return Err(out_of_range(self.keep.id())),
            Some(l) => value == l,
            None => self.lands_on_end(id, source, edge)?,
        };
        Ok(Position { value, is_end })
    }

    /// `span` on segment `id`, moved onto the merged segment.
    fn move_span(&self, id: &str, span: &Span, edge: &str) -> Result<Span, StepError> {
        if !self.is_merged(id) {
            return Ok(*span);
        }
        let map = self.coord_map(id, edge)?;
        let (begin, end) = match map {
            CoordMap::Shift(_) => (span.begin, span.end),
            CoordMap::Reverse(_) => (span.end, span.begin),
        };
        Ok(Span::new(
            self.mark(id, map, begin, edge)?,
            self.mark(id, map, end, edge)?,
        ))
    }

    /// Containment position on the container `id`, moved onto the
    /// merged segment.
    fn move_position(
        &self,
        id: &str,
        position: u64,
        contained: &Edge,
    ) -> Result<u64, StepError> {
        let key = contained.key();
        if !self.is_merged(id) {
            return Ok(position);
        }
        let out_of_range = || StepError::PositionOutOfRange {
            node: id.to_string(),
            edge: key.clone(),
        };
        match self.coord_map(id, &key)? {
            map @ CoordMap::Shift(_) => map.position(position).ok_or_else(out_of_range),
            map @ CoordMap::Reverse(_) => {
                let inner = contained.to();
                let len = contained
                    .overlap_on(EdgeEnd::From)
                    .or_else(|| self.graph.node(inner.id()).and_then(|n| n.length()))
                    .ok_or_else(|| StepError::MissingLength {
                        node: inner.id.clone(),
                        edge: key.clone(),
                    })?;
                let end = position.checked_add(len).ok_or_else(out_of_range)?;
                map.position(end).ok_or_else(out_of_range)
            }
        }
    }

    fn rename(&self, handle: &mut Handle, flip: bool) {
        handle.id = self.keep.id.clone();
        if flip {
            handle.orient = handle.orient.flip();
        }
    }

    /// `edge` as it reads once the segments are merged.
    fn rewrite(&self, edge: &Edge) -> Result<Edge, StepError> {
        let key = edge.key();
        let from = edge.from().id();
        let to = edge.to().id();

        let kind = match edge.kind() {
            EdgeKind::Link { .. } | EdgeKind::Gap { .. } => edge.kind().clone(),
            EdgeKind::Containment { position, overlap } => EdgeKind::Containment {
                position: self.move_position(from, *position, edge)?,
                overlap: overlap.clone(),
            },
            EdgeKind::Positioned {
                from_span,
                to_span,
                alignment,
            } => EdgeKind::Positioned {
                from_span: self.move_span(from, from_span, &key)?,
                to_span: self.move_span(to, to_span, &key)?,
                alignment: alignment.clone(),
            },
            EdgeKind::Fragment {
                from_span,
                to_span,
                alignment,
            } => EdgeKind::Fragment {
                from_span: self.move_span(from, from_span, &key)?,
                to_span: *to_span,
                alignment: alignment.clone(),
            },
        };

        let mut rewritten = edge.clone();
        rewritten.kind = kind;

        if let EdgeKind::Fragment { .. } = edge.kind() {
            // the segment side of a fragment has no orientation, the
            // read flips instead
            if self.is_merged(from) {
                let flip = self.reverses(from);
                rewritten.from.id = self.keep.id.clone();
                if flip {
                    rewritten.to.orient = rewritten.to.orient.flip();
                }
            }
        } else {
            if self.is_merged(from) {
                self.rename(&mut rewritten.from, self.reverses(from));
            }
            if self.is_merged(to) {
                self.rename(&mut rewritten.to, self.reverses(to));
            }
        }
        Ok(rewritten)
    }

    fn sequence(&self) -> Option<Vec<u8>> {
        let a = self.graph.node(self.keep.id())?.sequence()?;
        let b = self.graph.node(self.remove.id())?.sequence()?;
        let ov = self.overlap as usize;

        let mut merged = Vec::with_capacity(a.len() + b.len());
        match (self.keep.orient, self.remove.orient) {
            (Orientation::Forward, Orientation::Forward) => {
                merged.extend_from_slice(a);
                merged.extend_from_slice(b.get(ov..)?);
            }
            (Orientation::Backward, Orientation::Backward) => {
                merged.extend_from_slice(b);
                merged.extend_from_slice(a.get(ov..)?);
            }
            (Orientation::Backward, Orientation::Forward) => {
                let rc = dna::rev_comp(b);
                merged.extend_from_slice(rc.get(..rc.len().checked_sub(ov)?)?);
                merged.extend_from_slice(a);
            }
            (Orientation::Forward, Orientation::Backward) => {
                merged.extend_from_slice(a);
                merged.extend_from_slice(dna::rev_comp(b).get(ov..)?);
            }
        }
        Some(merged)
    }

    /// Original ids in the order they appear on the merged forward
    /// strand.
    fn provenance(&self) -> Option<Vec<String>> {
        let owned = |id: &str| -> Option<Vec<String>> {
            let node = self.graph.node(id)?;
            Some(node.provenance().into_iter().map(String::from).collect())
        };
        let mut a = owned(self.keep.id())?;
        let mut b = owned(self.remove.id())?;
        match (self.keep.orient, self.remove.orient) {
            (Orientation::Forward, Orientation::Forward) => a.extend(b),
            (Orientation::Forward, Orientation::Backward) => a.extend(b.into_iter().rev()),
            (Orientation::Backward, Orientation::Forward) => {
                b.reverse();
                b.extend(a);
                a = b;
            }
            (Orientation::Backward, Orientation::Backward) => {
                b.extend(a);
                a = b;
            }
        }
        Some(a)
    }

    fn plan(self) -> Result<Plan, StepError> {
        let invalid = || StepError::InvalidJunction {
            edge: self.edge.clone(),
        };
        let contracted = self.graph.edge_slot(&self.edge).ok_or_else(invalid)?;

        let mut slots: Vec<usize> = self
            .graph
            .index
            .incident(self.keep.id())
            .iter()
            .chain(self.graph.index.incident(self.remove.id()))
            .copied()
            .filter(|&s| s != contracted)
            .collect();
        slots.sort_unstable();
        slots.dedup();

        let mut rewrites = Vec::with_capacity(slots.len());
        for slot in slots {
            if let Some(edge) = self.graph.edge_at(slot) {
                rewrites.push((slot, self.rewrite(edge)?));
            }
        }

        let sequence = match self.sequence() {
            Some(seq) => Some(seq),
            None if self.has_sequences() => {
                return Err(StepError::PositionOutOfRange {
                    node: self.remove.id.clone(),
                    edge: self.edge.clone(),
                })
            }
            None => None,
        };
        let provenance = self.provenance().ok_or_else(invalid)?;

        Ok(Plan {
            contracted,
            edge: self.edge.clone(),
            keep: self.keep.id.clone(),
            remove: self.remove.id.clone(),
            sequence,
            length: self.merged_len,
            provenance,
            rewrites,
        })
    }

    fn has_sequences(&self) -> bool {
        [self.keep.id(), self.remove.id()].iter().all(|id| {
            self.graph
                .node(id)
                .map_or(false, |n| n.sequence().is_some())
        })
    }
}

/// The mutations of one contraction.
struct Plan {
    contracted: usize,
    edge: String,
    keep: String,
    remove: String,
    sequence: Option<Vec<u8>>,
    length: Option<u64>,
    provenance: Vec<String>,
    rewrites: Vec<(usize, Edge)>,
}

impl Plan {
    /// Apply the contraction, returning the dovetail edges whose
    /// junction changed.
    fn apply(self, graph: &mut GfaGraph, junctions: &mut JunctionIndex) -> Vec<String> {
        junctions.remove(&self.edge);
        graph.take_edge(self.contracted);

        let mut rewritten = Vec::with_capacity(self.rewrites.len());
        for (slot, edge) in self.rewrites {
            let key = edge.key();
            junctions.remove(&key);
            graph.replace_edge(slot, edge);
            rewritten.push(key);
        }

        graph.take_node(&self.remove);
        if let Some(node) = graph.node_mut(&self.keep) {
            node.set_merged(self.sequence, self.length, self.provenance);
        }

        let mut touched = Vec::new();
        for key in rewritten {
            let junction = graph
                .edge(&key)
                .filter(|e| graph.has_node(e.from().id()) && graph.has_node(e.to().id()))
                .and_then(Edge::junction);
            if let Some(junction) = junction {
                junctions.insert(key.clone(), junction);
                touched.push(key);
            }
        }
        touched
    }
}

/// Contract dovetail junctions until none is left, or until
/// `config.max_contractions` contractions have been made.
///
/// A contraction that cannot be carried out stops the run with
/// [`CompactionError::Step`]; the graph then holds the contractions
/// made before it and nothing of the failed one.
pub fn compact(
    graph: &mut GfaGraph,
    config: &CompactionConfig,
) -> Result<CompactionReport, CompactionError> {
    let t = std::time::Instant::now();

    let mut junctions = JunctionIndex::new(graph);
    let mut worklist: VecDeque<String> = graph.dovetail_edges().map(|e| e.key()).collect();
    debug!("{} dovetail junctions to consider", worklist.len());

    let mut report = CompactionReport::default();

    while let Some(key) = worklist.pop_front() {
        if config
            .max_contractions
            .map_or(false, |max| report.contractions >= max)
        {
            debug!("stopping after {} contractions", report.contractions);
            break;
        }

        let (keep, remove) = match junctions.contractible(&key) {
            Some(junction) => junction,
            None => continue,
        };

        let step = |source| CompactionError::Step {
            contracted: report.contractions,
            edge: key.clone(),
            source,
        };
        let edge = graph
            .edge(&key)
            .ok_or_else(|| step(StepError::InvalidJunction { edge: key.clone() }))?;
        let plan = Merge::new(graph, edge, keep, remove)
            .and_then(Merge::plan)
            .map_err(step)?;

        trace!("contracting {}: {} into {}", key, plan.remove, plan.keep);
        let removed = plan.remove.clone();
        worklist.extend(plan.apply(graph, &mut junctions));

        report.contractions += 1;
        report.contracted.push((key, removed));
    }

    debug!(
        "made {} contractions in {:.3} ms",
        report.contractions,
        t.elapsed().as_secs_f64() * 1000.0
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Alignment, EdgeRecord, NodeRecord};
    use crate::util::test::{chain_graph, span};

    use bstr::B;

    fn merge_two(a: char, b: char) -> GfaGraph {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("a", "ACGTTT")).unwrap();
        graph.add_node(NodeRecord::new("b", "TTGCA")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", a, "b", b, Alignment::matches(2)).with_id("ab"))
            .unwrap();
        compact(&mut graph, &CompactionConfig::default()).unwrap();
        graph
    }

    #[test]
    fn same_strand_overlap() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("s1", "AAAA")).unwrap();
        graph.add_node(NodeRecord::new("s2", "CCCCAAAA")).unwrap();
        graph
            .add_edge(EdgeRecord::link("s1", '+', "s2", '+', Alignment::matches(4)))
            .unwrap();

        let report = compact(&mut graph, &CompactionConfig::default()).unwrap();
        assert_eq!(report.contractions, 1);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);

        let node = graph.node("s1").unwrap();
        assert_eq!(node.sequence(), Some(B("AAAAAAAA")));
        assert_eq!(node.length(), Some(8));
        assert_eq!(node.provenance(), vec!["s1", "s2"]);
    }

    #[test]
    fn orientation_cases() {
        let cases = [
            ('+', '+', "ACGTTTGCA", vec!["a", "b"]),
            ('-', '-', "TTGCAGTTT", vec!["b", "a"]),
            ('-', '+', "TGCACGTTT", vec!["b", "a"]),
            ('+', '-', "ACGTTTCAA", vec!["a", "b"]),
        ];
        for (a, b, merged, provenance) in cases.iter() {
            let graph = merge_two(*a, *b);
            assert_eq!(graph.node_count(), 1);
            let node = graph.node("a").unwrap();
            assert_eq!(node.sequence(), Some(B(merged)), "case {}{}", a, b);
            assert_eq!(node.length(), Some(9));
            assert_eq!(&node.provenance(), provenance);
        }
    }

    #[test]
    fn positions_follow_the_merge() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("a", "ACGTTT")).unwrap();
        graph.add_node(NodeRecord::new("b", "TTGCA")).unwrap();
        graph.add_node(NodeRecord::new("c", "GGTTG")).unwrap();
        graph.add_node(NodeRecord::new("d", "TG")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '+', "b", '-', Alignment::matches(2)).with_id("ab"))
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "b",
                    '+',
                    "c",
                    '+',
                    span(0, 3, false),
                    span(2, 5, true),
                    Alignment::Unspecified,
                )
                .with_id("bc"),
            )
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::containment("b", '+', "d", '+', 1, Alignment::matches(2))
                    .with_id("bd"),
            )
            .unwrap();

        let config = CompactionConfig::default().with_max_contractions(1);
        let report = compact(&mut graph, &config).unwrap();
        assert_eq!(report.contracted, vec![("ab".to_string(), "b".to_string())]);
        assert_eq!(graph.node("a").unwrap().sequence(), Some(B("ACGTTTCAA")));

        // b sits reversed at the end of the merged segment
        let bc = graph.edge("bc").unwrap();
        assert_eq!(bc.from(), &Handle::new("a", Orientation::Backward));
        assert_eq!(bc.span(EdgeEnd::From), Some(&span(6, 9, true)));
        assert_eq!(bc.span(EdgeEnd::To), Some(&span(2, 5, true)));
        assert!(bc.is_dovetail());

        let bd = graph.edge("bd").unwrap();
        assert_eq!(bd.from(), &Handle::new("a", Orientation::Backward));
        match bd.kind() {
            EdgeKind::Containment { position, .. } => assert_eq!(*position, 6),
            other => panic!("expected a containment, got {:?}", other),
        }
    }

    #[test]
    fn fragments_flip_the_read() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("a", "ACGTTT")).unwrap();
        graph.add_node(NodeRecord::new("b", "TTGCA")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '-', "b", '+', Alignment::matches(2)))
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::fragment(
                    "b",
                    "read1",
                    '+',
                    span(1, 4, false),
                    span(0, 3, false),
                    Alignment::Unspecified,
                )
                .with_id("f1"),
            )
            .unwrap();

        compact(&mut graph, &CompactionConfig::default()).unwrap();

        // rc(b) is placed first: [1, 4) on b is [1, 4) on the merged
        // segment, read on the other strand
        let f1 = graph.edge("f1").unwrap();
        assert_eq!(f1.from(), &Handle::forward("a"));
        assert_eq!(f1.to(), &Handle::new("read1", Orientation::Backward));
        assert_eq!(f1.span(EdgeEnd::From), Some(&span(1, 4, false)));
        assert_eq!(f1.span(EdgeEnd::To), Some(&span(0, 3, false)));
    }

    #[test]
    fn chain_lengths_and_provenance() {
        let mut graph = chain_graph();
        let report = compact(&mut graph, &CompactionConfig::default()).unwrap();
        assert_eq!(report.contractions, 2);
        assert_eq!(graph.node_count(), 1);

        let node = graph.node("s1").unwrap();
        assert_eq!(node.length(), Some(50));
        assert_eq!(node.sequence(), None);
        assert_eq!(node.provenance(), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn contraction_limit() {
        let mut graph = chain_graph();
        let config = CompactionConfig::default().with_max_contractions(1);
        let report = compact(&mut graph, &config).unwrap();
        assert_eq!(report.contractions, 1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("s1").unwrap().length(), Some(42));

        let edge = graph.edge("l23").unwrap();
        assert_eq!(edge.from(), &Handle::forward("s1"));

        let report = compact(&mut graph, &CompactionConfig::default()).unwrap();
        assert_eq!(report.contractions, 1);
        assert_eq!(graph.node("s1").unwrap().length(), Some(50));
    }

    #[test]
    fn branching_blocks_contraction() {
        let mut graph = chain_graph();
        graph.add_node(NodeRecord::unknown("s4", Some(10))).unwrap();
        graph
            .add_edge(EdgeRecord::link("s2", '+', "s4", '+', Alignment::matches(2)))
            .unwrap();

        let report = compact(&mut graph, &CompactionConfig::default()).unwrap();
        assert_eq!(report.contracted, vec![("l12".to_string(), "s2".to_string())]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.right_degree("s1"), 2);
    }

    #[test]
    fn missing_length_leaves_graph_unchanged() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::unknown("a", None)).unwrap();
        graph.add_node(NodeRecord::new("b", "ACGTA")).unwrap();
        graph.add_node(NodeRecord::new("c", "ACGTA")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '+', "b", '+', Alignment::Unspecified).with_id("ab"))
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "b",
                    '+',
                    "c",
                    '+',
                    span(3, 5, true),
                    span(0, 2, false),
                    Alignment::Unspecified,
                )
                .with_id("bc"),
            )
            .unwrap();
        let before = graph.clone();

        let err = compact(&mut graph, &CompactionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CompactionError::Step {
                contracted: 0,
                edge: "ab".to_string(),
                source: StepError::MissingLength {
                    node: "a".to_string(),
                    edge: "bc".to_string(),
                },
            }
        );
        assert_eq!(err.contracted(), 0);
        assert_eq!(graph, before);
        assert_eq!(graph.node("b").unwrap().provenance(), vec!["b"]);
    }

    #[test]
    fn reversed_keep_moves_its_free_end() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("a", "ACGTTT")).unwrap();
        graph.add_node(NodeRecord::new("b", "TTGCA")).unwrap();
        graph.add_node(NodeRecord::new("c", "GGTTG")).unwrap();
        graph.add_node(NodeRecord::new("d", "TGCA")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '-', "b", '-', Alignment::matches(2)).with_id("ab"))
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "a",
                    '+',
                    "c",
                    '+',
                    span(4, 6, true),
                    span(0, 2, false),
                    Alignment::Unspecified,
                )
                .with_id("ac"),
            )
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "d",
                    '+',
                    "b",
                    '+',
                    span(2, 4, true),
                    span(0, 2, false),
                    Alignment::Unspecified,
                )
                .with_id("db"),
            )
            .unwrap();

        let config = CompactionConfig::default().with_max_contractions(1);
        compact(&mut graph, &config).unwrap();
        assert_eq!(graph.node("a").unwrap().sequence(), Some(B("TTGCAGTTT")));

        // b comes first on the merged strand, a is shifted past it
        let ac = graph.edge("ac").unwrap();
        assert_eq!(ac.from(), &Handle::new("a", Orientation::Forward));
        assert_eq!(ac.span(EdgeEnd::From), Some(&span(7, 9, true)));

        let db = graph.edge("db").unwrap();
        assert_eq!(db.to(), &Handle::new("a", Orientation::Forward));
        assert_eq!(db.span(EdgeEnd::To), Some(&span(0, 2, false)));

        assert_eq!(graph.right("a"), vec!["c".to_string()]);
        assert_eq!(graph.left("a"), vec!["d".to_string()]);
    }

    #[test]
    fn unknown_lengths_keep_end_markers() {
        // the reversed keep comes last on the merged strand
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::unknown("a", None)).unwrap();
        graph.add_node(NodeRecord::unknown("b", Some(10))).unwrap();
        graph.add_node(NodeRecord::unknown("c", Some(10))).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '-', "b", '+', Alignment::matches(2)).with_id("ab"))
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "a",
                    '+',
                    "c",
                    '+',
                    span(5, 8, true),
                    span(0, 3, false),
                    Alignment::Unspecified,
                )
                .with_id("ac"),
            )
            .unwrap();

        let config = CompactionConfig::default().with_max_contractions(1);
        assert_eq!(compact(&mut graph, &config).unwrap().contractions, 1);
        assert_eq!(graph.node("a").unwrap().length(), None);
        let ac = graph.edge("ac").unwrap();
        assert_eq!(ac.span(EdgeEnd::From), Some(&span(13, 16, true)));
        assert!(ac.is_dovetail());
        assert_eq!(graph.right("a"), vec!["c".to_string()]);

        // the removed segment of unknown length comes last
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::unknown("a", Some(10))).unwrap();
        graph.add_node(NodeRecord::unknown("b", None)).unwrap();
        graph.add_node(NodeRecord::unknown("c", Some(10))).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '+', "b", '+', Alignment::matches(2)).with_id("ab"))
            .unwrap();
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "b",
                    '+',
                    "c",
                    '+',
                    span(5, 8, true),
                    span(0, 3, false),
                    Alignment::Unspecified,
                )
                .with_id("bc"),
            )
            .unwrap();

        compact(&mut graph, &config).unwrap();
        let bc = graph.edge("bc").unwrap();
        assert_eq!(bc.from(), &Handle::new("a", Orientation::Forward));
        assert_eq!(bc.span(EdgeEnd::From), Some(&span(13, 16, true)));
        assert_eq!(graph.right("a"), vec!["c".to_string()]);
    }

    #[test]
    fn first_segment_end_needs_the_last_length() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::unknown("a", Some(10))).unwrap();
        graph.add_node(NodeRecord::unknown("b", None)).unwrap();
        graph.add_node(NodeRecord::unknown("c", Some(6))).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '+', "b", '+', Alignment::matches(2)).with_id("ab"))
            .unwrap();
        // c lies within a, up to its right end
        graph
            .add_edge(
                EdgeRecord::positioned(
                    "c",
                    '+',
                    "a",
                    '+',
                    span(0, 6, true),
                    span(4, 10, true),
                    Alignment::Unspecified,
                )
                .with_id("ca"),
            )
            .unwrap();
        let before = graph.clone();

        let err = compact(&mut graph, &CompactionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            CompactionError::Step {
                contracted: 0,
                edge: "ab".to_string(),
                source: StepError::MissingLength {
                    node: "b".to_string(),
                    edge: "ca".to_string(),
                },
            }
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn self_loops_are_not_contracted() {
        let mut graph = GfaGraph::new();
        graph.add_node(NodeRecord::new("a", "ACGT")).unwrap();
        graph
            .add_edge(EdgeRecord::link("a", '+', "a", '+', Alignment::matches(1)))
            .unwrap();
        let report = compact(&mut graph, &CompactionConfig::default()).unwrap();
        assert_eq!(report.contractions, 0);
        assert_eq!(graph.edge_count(), 1);
    }
}
