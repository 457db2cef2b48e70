/*!
Error types for element validation, store mutation and compaction.

Every error returned by a mutating operation means the graph was left
exactly as it was before the call.
*/

use thiserror::Error;

/// Rejections raised while turning a record into a graph element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} id must not be empty")]
    EmptyId(&'static str),
    #[error("the wildcard `*` cannot be used as a {0} id")]
    WildcardId(&'static str),
    #[error("sequence length must be >= 0, given {0}")]
    NegativeLength(i64),
    #[error("node {id} declares length {declared} but its sequence has {actual} residues")]
    LengthMismatch {
        id: String,
        declared: u64,
        actual: u64,
    },
    #[error("invalid orientation `{0}`, expected `+` or `-`")]
    InvalidOrientation(char),
    #[error("only fragments may omit the segment orientation")]
    MissingOrientation,
    #[error("invalid edge record: {0}")]
    InconsistentEdge(&'static str),
    #[error("invalid span {begin}..{end}: begin is past end")]
    InvalidSpan { begin: u64, end: u64 },
    #[error("containment position must be >= 0, given {0}")]
    NegativePosition(i64),
    #[error("gap variance must be >= 0, given {0}")]
    NegativeVariance(i64),
    #[error("invalid CIGAR operation `{0}`")]
    InvalidCigarOp(char),
    #[error("CIGAR operation lengths must be > 0")]
    EmptyCigarOp,
    #[error("optional field `{0}` shadows a required field")]
    ReservedField(String),
    #[error("subgraph member `{0}` is listed more than once")]
    DuplicateMember(String),
}

/// Errors raised by the graph store and by the algorithms that query it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("an element with id `{0}` already exists")]
    DuplicateId(String),
    #[error("edge `{edge}` refers to node `{node}`, which is not in the graph")]
    MissingNode { edge: String, node: String },
    #[error("edge `{edge}` overlaps {overlap} residues of node `{node}`, which has length {length}")]
    OverlapTooLong {
        edge: String,
        node: String,
        overlap: u64,
        length: u64,
    },
    #[error("no node with id `{0}`")]
    NoSuchNode(String),
    #[error("no edge matches {0}")]
    NoSuchEdge(String),
    #[error("no subgraph with id `{0}`")]
    NoSuchSubgraph(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("node `{0}` is not in the graph")]
    NodeNotInGraph(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Why a single contraction could not be planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("node `{node}` has no known length, cannot move the positions of edge `{edge}`")]
    MissingLength { node: String, edge: String },
    #[error("edge `{edge}` has a position past the end of node `{node}`")]
    PositionOutOfRange { node: String, edge: String },
    #[error("edge `{edge}` no longer joins two distinct nodes")]
    InvalidJunction { edge: String },
}

/// Compaction stopped on a step it could not resolve. The graph holds
/// the `contracted` successful contractions made before the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompactionError {
    #[error("contraction of edge `{edge}` aborted after {contracted} successful contractions: {source}")]
    Step {
        contracted: usize,
        edge: String,
        #[source]
        source: StepError,
    },
}

impl CompactionError {
    pub fn contracted(&self) -> usize {
        match self {
            CompactionError::Step { contracted, .. } => *contracted,
        }
    }
}
