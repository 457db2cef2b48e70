/*!
The typed elements held by a [`GfaGraph`](crate::gfagraph::GfaGraph).

Records are what a parser produces from either GFA dialect; elements
are the validated values the graph stores. Each element type has a
`from_record` constructor that performs all field validation, so the
graph only ever holds well-formed values.

Equality is by value. Two edges or subgraphs with virtual ids are
considered to have the same identity regardless of the number they
were assigned, since that number only reflects insertion order.
*/

use serde::{Deserialize, Serialize};

pub mod edge;
pub mod fields;
pub mod node;
pub mod subgraph;

pub use edge::{Alignment, Edge, EdgeEnd, EdgeKind, EdgeRecord, Position, Span};
pub use fields::{FieldValue, OptionalFields};
pub use node::{Node, NodeRecord};
pub use subgraph::{Subgraph, SubgraphRecord};

use crate::error::ValidationError;

/// Marker for "no id" in the GFA dialects.
pub const WILDCARD: &str = "*";

pub(crate) const VIRTUAL_PREFIX: &str = "virtual_";

/// Identifier of an edge or a subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Named(String),
    /// Synthesized by the graph; `wildcard` records whether the input
    /// used `*` rather than leaving the id out.
    Virtual { number: u64, wildcard: bool },
}

impl ElementId {
    /// Resolve the id declared by a record, using `next_virtual` if the
    /// record has no usable id.
    pub(crate) fn resolve(
        declared: Option<&str>,
        next_virtual: u64,
        element: &'static str,
    ) -> Result<ElementId, ValidationError> {
        match declared {
            None => Ok(ElementId::Virtual {
                number: next_virtual,
                wildcard: false,
            }),
            Some(WILDCARD) => Ok(ElementId::Virtual {
                number: next_virtual,
                wildcard: true,
            }),
            Some("") => Err(ValidationError::EmptyId(element)),
            Some(name) => Ok(ElementId::Named(name.to_string())),
        }
    }

    /// The string the element is indexed by.
    pub fn key(&self) -> String {
        match self {
            ElementId::Named(name) => name.clone(),
            ElementId::Virtual { number, .. } => {
                format!("{}{}", VIRTUAL_PREFIX, number)
            }
        }
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        matches!(self, ElementId::Virtual { .. })
    }

    /// The id as it appeared in the input, if any.
    pub fn declared(&self) -> Option<&str> {
        match self {
            ElementId::Named(name) => Some(name),
            ElementId::Virtual { wildcard: true, .. } => Some(WILDCARD),
            ElementId::Virtual { wildcard: false, .. } => None,
        }
    }

    /// The virtual id number this id occupies. Named ids that happen
    /// to follow the `virtual_N` pattern count as well, so that fresh
    /// virtual ids never collide with them.
    pub fn virtual_number(&self) -> Option<u64> {
        match self {
            ElementId::Virtual { number, .. } => Some(*number),
            ElementId::Named(name) => parse_virtual_key(name),
        }
    }

    /// Identity comparison used by element equality: virtual ids match
    /// each other whatever their number.
    #[inline]
    pub fn same_identity(&self, other: &ElementId) -> bool {
        match (self, other) {
            (ElementId::Named(a), ElementId::Named(b)) => a == b,
            (ElementId::Virtual { .. }, ElementId::Virtual { .. }) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

pub(crate) fn parse_virtual_key(key: &str) -> Option<u64> {
    let digits = key.strip_prefix(VIRTUAL_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub(crate) fn check_reference(
    id: &str,
    element: &'static str,
) -> Result<(), ValidationError> {
    if id.is_empty() {
        Err(ValidationError::EmptyId(element))
    } else if id == WILDCARD {
        Err(ValidationError::WildcardId(element))
    } else {
        Ok(())
    }
}

/// Which element indices an operation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Node,
    Edge,
    Subgraph,
    All,
}

/// Any record a parser can hand to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Node(NodeRecord),
    Edge(EdgeRecord),
    Subgraph(SubgraphRecord),
}

impl From<NodeRecord> for Record {
    fn from(record: NodeRecord) -> Self {
        Record::Node(record)
    }
}

impl From<EdgeRecord> for Record {
    fn from(record: EdgeRecord) -> Self {
        Record::Edge(record)
    }
}

impl From<SubgraphRecord> for Record {
    fn from(record: SubgraphRecord) -> Self {
        Record::Subgraph(record)
    }
}

/// Borrowed view of any element stored in a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
    Subgraph(&'a Subgraph),
}

impl<'a> Element<'a> {
    pub fn key(&self) -> String {
        match self {
            Element::Node(node) => node.id().to_string(),
            Element::Edge(edge) => edge.key(),
            Element::Subgraph(sub) => sub.key(),
        }
    }

    /// Look up a required or optional field by name.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            Element::Node(node) => node.field(name),
            Element::Edge(edge) => edge.field(name),
            Element::Subgraph(sub) => sub.field(name),
        }
    }
}
