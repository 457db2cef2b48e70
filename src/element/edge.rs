/*!

Edge records and the validated `Edge` stored by the graph

Both GFA dialects describe the relation between two segments with
a handful of line types. Here they all become an [`Edge`], and the
structural kind of the relation is decided once, when the record is
validated, by which of the record's optional fields are populated.

*/

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::handle::{Handle, Orientation};

use super::fields::{check_reserved, FieldValue, OptionalFields};
use super::{check_reference, ElementId};

/// Field names an edge answers to in [`Edge::field`].
pub const EDGE_FIELDS: &[&str] = &[
    "id",
    "from",
    "from_orient",
    "to",
    "to_orient",
    "kind",
    "alignment",
    "position",
    "from_span",
    "to_span",
    "distance",
    "variance",
];

const CIGAR_OPS: &[char] = &['M', 'I', 'D', 'N', 'S', 'H', 'P', '=', 'X'];

/// A coordinate on a segment. `is_end` is the `$` marker telling that
/// the position is the last one of the sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub value: u64,
    pub is_end: bool,
}

impl Position {
    #[inline]
    pub fn new(value: u64) -> Position {
        Position {
            value,
            is_end: false,
        }
    }

    #[inline]
    pub fn end(value: u64) -> Position {
        Position {
            value,
            is_end: true,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_end {
            write!(f, "{}$", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Half-open interval `[begin, end)` on a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub fn new(begin: Position, end: Position) -> Span {
        Span { begin, end }
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end.value.saturating_sub(self.begin.value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.begin.value > self.end.value {
            Err(ValidationError::InvalidSpan {
                begin: self.begin.value,
                end: self.end.value,
            })
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

/// Description of how the two sequences of an edge align.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Cigar(Vec<(u64, char)>),
    Trace(Vec<u64>),
    Unspecified,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Unspecified
    }
}

impl Alignment {
    /// Shorthand for a CIGAR alignment made of a single match block.
    pub fn matches(len: u64) -> Alignment {
        Alignment::Cigar(vec![(len, 'M')])
    }

    #[inline]
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Alignment::Unspecified)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Alignment::Cigar(ops) = self {
            for &(len, op) in ops {
                if !CIGAR_OPS.contains(&op) {
                    return Err(ValidationError::InvalidCigarOp(op));
                }
                if len == 0 {
                    return Err(ValidationError::EmptyCigarOp);
                }
            }
        }
        Ok(())
    }

    fn cigar_sum(&self, counted: &[char]) -> Option<u64> {
        match self {
            Alignment::Cigar(ops) => Some(
                ops.iter()
                    .filter(|(_, op)| counted.contains(op))
                    .map(|(len, _)| len)
                    .sum(),
            ),
            _ => None,
        }
    }

    /// Residues of the reference (the `from` segment) covered by the
    /// alignment.
    pub fn reference_length(&self) -> Option<u64> {
        self.cigar_sum(&['M', 'D', 'N', '=', 'X'])
    }

    /// Residues of the query (the `to` segment) covered by the
    /// alignment.
    pub fn query_length(&self) -> Option<u64> {
        self.cigar_sum(&['M', 'I', 'S', '=', 'X'])
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Cigar(ops) => {
                for (len, op) in ops {
                    write!(f, "{}{}", len, op)?;
                }
                Ok(())
            }
            Alignment::Trace(trace) => {
                let mut first = true;
                for x in trace {
                    if !first {
                        write!(f, ",")?;
                    }
                    first = false;
                    write!(f, "{}", x)?;
                }
                Ok(())
            }
            Alignment::Unspecified => write!(f, "*"),
        }
    }
}

/// Structural kind of an edge, with the data only that kind carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Overlap between the ends of two segments, without coordinates.
    Link { overlap: Alignment },
    /// `to` lies inside `from`, starting at `position`.
    Containment { position: u64, overlap: Alignment },
    /// Overlap with explicit coordinates on both segments.
    Positioned {
        from_span: Span,
        to_span: Span,
        alignment: Alignment,
    },
    /// No overlap, the segments are `distance` residues apart.
    Gap { distance: i64, variance: Option<u64> },
    /// Placement of an external read (`to`) on the `from` segment.
    Fragment {
        from_span: Span,
        to_span: Span,
        alignment: Alignment,
    },
}

impl EdgeKind {
    pub fn name(&self) -> &'static str {
        match self {
            EdgeKind::Link { .. } => "link",
            EdgeKind::Containment { .. } => "containment",
            EdgeKind::Positioned { .. } => "edge",
            EdgeKind::Gap { .. } => "gap",
            EdgeKind::Fragment { .. } => "fragment",
        }
    }

    pub fn alignment(&self) -> Option<&Alignment> {
        match self {
            EdgeKind::Link { overlap } | EdgeKind::Containment { overlap, .. } => {
                Some(overlap)
            }
            EdgeKind::Positioned { alignment, .. }
            | EdgeKind::Fragment { alignment, .. } => Some(alignment),
            EdgeKind::Gap { .. } => None,
        }
    }

    pub fn spans(&self) -> Option<(&Span, &Span)> {
        match self {
            EdgeKind::Positioned {
                from_span, to_span, ..
            }
            | EdgeKind::Fragment {
                from_span, to_span, ..
            } => Some((from_span, to_span)),
            _ => None,
        }
    }
}

/// One of the two endpoints of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    From,
    To,
}

/// An edge as produced by a parser, from any of the `L`, `C`, `E`,
/// `G` or `F` lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// `None` or `*` to let the graph assign a virtual id.
    pub id: Option<String>,
    pub from: String,
    /// Absent only for fragments.
    pub from_orient: Option<char>,
    pub to: String,
    pub to_orient: char,
    pub alignment: Alignment,
    pub from_span: Option<Span>,
    pub to_span: Option<Span>,
    pub position: Option<i64>,
    pub distance: Option<i64>,
    pub variance: Option<i64>,
    pub optional: OptionalFields,
}

impl EdgeRecord {
    fn bare(from: &str, from_orient: Option<char>, to: &str, to_orient: char) -> Self {
        EdgeRecord {
            id: None,
            from: from.to_string(),
            from_orient,
            to: to.to_string(),
            to_orient,
            alignment: Alignment::Unspecified,
            from_span: None,
            to_span: None,
            position: None,
            distance: None,
            variance: None,
            optional: OptionalFields::new(),
        }
    }

    pub fn link(
        from: &str,
        from_orient: char,
        to: &str,
        to_orient: char,
        overlap: Alignment,
    ) -> Self {
        EdgeRecord {
            alignment: overlap,
            ..Self::bare(from, Some(from_orient), to, to_orient)
        }
    }

    pub fn containment(
        container: &str,
        container_orient: char,
        contained: &str,
        contained_orient: char,
        position: i64,
        overlap: Alignment,
    ) -> Self {
        EdgeRecord {
            alignment: overlap,
            position: Some(position),
            ..Self::bare(container, Some(container_orient), contained, contained_orient)
        }
    }

    pub fn positioned(
        from: &str,
        from_orient: char,
        to: &str,
        to_orient: char,
        from_span: Span,
        to_span: Span,
        alignment: Alignment,
    ) -> Self {
        EdgeRecord {
            alignment,
            from_span: Some(from_span),
            to_span: Some(to_span),
            ..Self::bare(from, Some(from_orient), to, to_orient)
        }
    }

    pub fn gap(
        from: &str,
        from_orient: char,
        to: &str,
        to_orient: char,
        distance: i64,
        variance: Option<i64>,
    ) -> Self {
        EdgeRecord {
            distance: Some(distance),
            variance,
            ..Self::bare(from, Some(from_orient), to, to_orient)
        }
    }

    pub fn fragment(
        segment: &str,
        external: &str,
        external_orient: char,
        segment_span: Span,
        external_span: Span,
        alignment: Alignment,
    ) -> Self {
        EdgeRecord {
            alignment,
            from_span: Some(segment_span),
            to_span: Some(external_span),
            ..Self::bare(segment, None, external, external_orient)
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_field<V: Into<FieldValue>>(mut self, name: &str, value: V) -> Self {
        self.optional.insert(name.to_string(), value.into());
        self
    }
}

fn orientation(c: char) -> Result<Orientation, ValidationError> {
    Orientation::from_char(c).ok_or(ValidationError::InvalidOrientation(c))
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) id: ElementId,
    pub(crate) from: Handle,
    pub(crate) to: Handle,
    pub(crate) kind: EdgeKind,
    pub(crate) optional: OptionalFields,
}

impl Edge {
    /// Validate `record` and build the edge it describes, under the
    /// already resolved `id`.
    pub fn from_record(record: EdgeRecord, id: ElementId) -> Result<Edge, ValidationError> {
        use ValidationError as VE;

        check_reference(&record.from, "edge endpoint")?;
        check_reference(&record.to, "edge endpoint")?;
        check_reserved(&record.optional, EDGE_FIELDS)?;
        record.alignment.validate()?;

        let to_orient = orientation(record.to_orient)?;
        let from_orient = record.from_orient.map(orientation).transpose()?;

        if record.variance.is_some() && record.distance.is_none() {
            return Err(VE::InconsistentEdge("a variance needs a distance"));
        }

        let has_spans = record.from_span.is_some() || record.to_span.is_some();

        let kind = if let Some(distance) = record.distance {
            if has_spans || record.position.is_some() {
                return Err(VE::InconsistentEdge("gaps carry no positions"));
            }
            if !record.alignment.is_unspecified() {
                return Err(VE::InconsistentEdge("gaps carry no alignment"));
            }
            let variance = match record.variance {
                Some(v) if v < 0 => return Err(VE::NegativeVariance(v)),
                Some(v) => Some(v as u64),
                None => None,
            };
            EdgeKind::Gap { distance, variance }
        } else if has_spans {
            let (from_span, to_span) = match (record.from_span, record.to_span) {
                (Some(f), Some(t)) => (f, t),
                _ => return Err(VE::InconsistentEdge("both spans are required")),
            };
            if record.position.is_some() {
                return Err(VE::InconsistentEdge(
                    "spans and a containment position are exclusive",
                ));
            }
            from_span.validate()?;
            to_span.validate()?;
            let alignment = record.alignment;
            if from_orient.is_some() {
                EdgeKind::Positioned {
                    from_span,
                    to_span,
                    alignment,
                }
            } else {
                EdgeKind::Fragment {
                    from_span,
                    to_span,
                    alignment,
                }
            }
        } else if let Alignment::Trace(_) = record.alignment {
            return Err(VE::InconsistentEdge("trace alignments need positions"));
        } else if let Some(position) = record.position {
            if position < 0 {
                return Err(VE::NegativePosition(position));
            }
            EdgeKind::Containment {
                position: position as u64,
                overlap: record.alignment,
            }
        } else {
            EdgeKind::Link {
                overlap: record.alignment,
            }
        };

        let from_orient = match (&kind, from_orient) {
            (_, Some(o)) => o,
            (EdgeKind::Fragment { .. }, None) => Orientation::Forward,
            (_, None) => return Err(VE::MissingOrientation),
        };

        Ok(Edge {
            id,
            from: Handle::new(record.from, from_orient),
            to: Handle::new(record.to, to_orient),
            kind,
            optional: record.optional,
        })
    }

    #[inline]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    #[inline]
    pub fn key(&self) -> String {
        self.id.key()
    }

    #[inline]
    pub fn from(&self) -> &Handle {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &Handle {
        &self.to
    }

    #[inline]
    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    #[inline]
    pub fn optional(&self) -> &OptionalFields {
        &self.optional
    }

    #[inline]
    pub fn handle(&self, end: EdgeEnd) -> &Handle {
        match end {
            EdgeEnd::From => &self.from,
            EdgeEnd::To => &self.to,
        }
    }

    /// The endpoint opposite to the node `id`, if the edge touches it.
    pub fn other_end(&self, id: &str) -> Option<&Handle> {
        if self.from.id == id {
            Some(&self.to)
        } else if self.to.id == id {
            Some(&self.from)
        } else {
            None
        }
    }

    pub fn span(&self, end: EdgeEnd) -> Option<&Span> {
        let (from_span, to_span) = self.kind.spans()?;
        match end {
            EdgeEnd::From => Some(from_span),
            EdgeEnd::To => Some(to_span),
        }
    }

    /// Number of residues of the `end` segment the edge covers, if it
    /// can be told from the edge alone.
    pub fn overlap_on(&self, end: EdgeEnd) -> Option<u64> {
        match &self.kind {
            EdgeKind::Link { overlap } | EdgeKind::Containment { overlap, .. } => {
                match end {
                    EdgeEnd::From => overlap.reference_length(),
                    EdgeEnd::To => overlap.query_length(),
                }
            }
            EdgeKind::Positioned { .. } | EdgeKind::Fragment { .. } => {
                self.span(end).map(Span::len)
            }
            EdgeKind::Gap { .. } => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let text = |s: String| Some(FieldValue::Text(s));
        match name {
            "id" => text(self.key()),
            "from" => text(self.from.id.clone()),
            "from_orient" => Some(FieldValue::Char(self.from.orient.as_char())),
            "to" => text(self.to.id.clone()),
            "to_orient" => Some(FieldValue::Char(self.to.orient.as_char())),
            "kind" => text(self.kind.name().to_string()),
            "alignment" => self.kind.alignment().and_then(|a| text(a.to_string())),
            "position" => match &self.kind {
                EdgeKind::Containment { position, .. } => {
                    Some(FieldValue::Int(*position as i64))
                }
                _ => None,
            },
            "from_span" => self.span(EdgeEnd::From).and_then(|s| text(s.to_string())),
            "to_span" => self.span(EdgeEnd::To).and_then(|s| text(s.to_string())),
            "distance" => match &self.kind {
                EdgeKind::Gap { distance, .. } => Some(FieldValue::Int(*distance)),
                _ => None,
            },
            "variance" => match &self.kind {
                EdgeKind::Gap {
                    variance: Some(v), ..
                } => Some(FieldValue::Int(*v as i64)),
                _ => None,
            },
            _ => self.optional.get(name).cloned(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id.same_identity(&other.id)
            && self.from == other.from
            && self.to == other.to
            && self.kind == other.kind
            && self.optional == other.optional
    }
}
