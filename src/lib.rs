/*!
An in-memory store for
[GFA](https://github.com/GFA-spec/GFA-spec) assembly graphs, with the
overlap topology, traversals and compaction that assembly tools build
on top of it.

# Overview

A [`GfaGraph`](gfagraph::GfaGraph) holds three kinds of elements:

* [`Node`](element::Node)s are the segments, with an optional
  sequence and length.
* [`Edge`](element::Edge)s join two segments; their
  [`EdgeKind`](element::EdgeKind) tells links, containments,
  positioned edges, gaps and fragments apart.
* [`Subgraph`](element::Subgraph)s are named groups of elements, the
  paths and sets of both GFA dialects.

Elements are added from typed records (what a parser produces), which
are validated before anything is stored. Parsing and writing the text
formats is left to other crates.

# Dovetails

Most of the algorithms only look at dovetail overlaps, the edges that
join the end of one segment to the start of another. [`dovetail`]
classifies edges and answers the oriented neighbor queries (left and
right neighbors, degrees, dovetail components).

# Algorithms

* [`algorithms::components`] for connected components
* [`algorithms::linear_paths`] for unbranched paths (unitigs)
* [`algorithms::simple_paths`] for path enumeration between two nodes
* [`algorithms::biconnected`] for articulation points
* [`algorithms::cleanup`] for dead end and small component removal
* [`algorithms::compaction`] merges segments across dovetails until
  no more junctions can be contracted

# Misc.

* [`handle`] has the [`Orientation`](handle::Orientation),
  [`Side`](handle::Side) and [`Handle`](handle::Handle) types
* [`util::dna`] has reverse complement helpers

*/

pub mod handle;

pub mod config;
pub mod element;
pub mod error;

pub mod dovetail;
pub mod gfagraph;

pub mod algorithms;
pub mod util;

pub use config::{CompactionConfig, GraphConfig};
pub use error::{CompactionError, GraphError, GraphResult, StepError, ValidationError};
pub use gfagraph::{EdgeKey, GfaGraph, GraphView};
