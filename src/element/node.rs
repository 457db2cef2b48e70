/*!

Segment records and the validated `Node` stored by the graph

*/

use bstr::ByteSlice;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::fields::{check_reserved, FieldValue, OptionalFields};
use super::{check_reference, WILDCARD};

/// Field names a node answers to in [`Node::field`].
pub const NODE_FIELDS: &[&str] = &["id", "sequence", "length"];

/// A segment as produced by a parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    /// `None` or `*` when the sequence is unknown.
    pub sequence: Option<String>,
    pub length: Option<i64>,
    pub optional: OptionalFields,
}

impl NodeRecord {
    pub fn new(id: &str, sequence: &str) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            sequence: Some(sequence.to_string()),
            length: None,
            optional: OptionalFields::new(),
        }
    }

    /// A segment whose sequence is unknown.
    pub fn unknown(id: &str, length: Option<i64>) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            sequence: None,
            length,
            optional: OptionalFields::new(),
        }
    }

    pub fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_field<V: Into<FieldValue>>(mut self, name: &str, value: V) -> Self {
        self.optional.insert(name.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) sequence: Option<Vec<u8>>,
    pub(crate) length: Option<u64>,
    pub(crate) optional: OptionalFields,
    pub(crate) provenance: Vec<String>,
}

impl Node {
    pub fn from_record(record: NodeRecord) -> Result<Node, ValidationError> {
        check_reference(&record.id, "node")?;
        check_reserved(&record.optional, NODE_FIELDS)?;

        let sequence = match record.sequence {
            Some(seq) if seq != WILDCARD => Some(seq.into_bytes()),
            _ => None,
        };

        let declared = match record.length {
            Some(l) if l < 0 => return Err(ValidationError::NegativeLength(l)),
            Some(l) => Some(l as u64),
            None => None,
        };

        let length = match (&sequence, declared) {
            (Some(seq), Some(declared)) if seq.len() as u64 != declared => {
                return Err(ValidationError::LengthMismatch {
                    id: record.id,
                    declared,
                    actual: seq.len() as u64,
                });
            }
            (Some(seq), None) => Some(seq.len() as u64),
            (_, declared) => declared,
        };

        Ok(Node {
            id: record.id,
            sequence,
            length,
            optional: record.optional,
            provenance: Vec::new(),
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn sequence(&self) -> Option<&[u8]> {
        self.sequence.as_deref()
    }

    #[inline]
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    #[inline]
    pub fn optional(&self) -> &OptionalFields {
        &self.optional
    }

    /// Ids of the original nodes this node was assembled from. A node
    /// that was never merged reports only itself.
    pub fn provenance(&self) -> Vec<&str> {
        if self.provenance.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.provenance.iter().map(|s| s.as_str()).collect()
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.clone())),
            "sequence" => Some(FieldValue::Text(match &self.sequence {
                Some(seq) => seq.to_str_lossy().into_owned(),
                None => WILDCARD.to_string(),
            })),
            "length" => self.length.map(|l| FieldValue::Int(l as i64)),
            _ => self.optional.get(name).cloned(),
        }
    }

    /// Replace the content of this node with the result of a merge.
    pub(crate) fn set_merged(
        &mut self,
        sequence: Option<Vec<u8>>,
        length: Option<u64>,
        provenance: Vec<String>,
    ) {
        self.sequence = sequence;
        self.length = length;
        self.provenance = provenance;
    }
}
