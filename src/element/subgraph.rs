use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::handle::Orientation;

use super::fields::{check_reserved, FieldValue, OptionalFields};
use super::{check_reference, ElementId};

/// Field names a subgraph answers to in [`Subgraph::field`].
pub const SUBGRAPH_FIELDS: &[&str] = &["id", "elements"];

/// A path (`P`, `O`) or set (`U`) line as produced by a parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgraphRecord {
    pub id: Option<String>,
    /// Member ids in order, with the orientation of ordered groups.
    pub elements: Vec<(String, Option<char>)>,
    pub optional: OptionalFields,
}

impl SubgraphRecord {
    pub fn new(id: Option<&str>) -> SubgraphRecord {
        SubgraphRecord {
            id: id.map(|s| s.to_string()),
            elements: Vec::new(),
            optional: OptionalFields::new(),
        }
    }

    pub fn with_member(mut self, id: &str, orient: Option<char>) -> Self {
        self.elements.push((id.to_string(), orient));
        self
    }

    pub fn with_field<V: Into<FieldValue>>(mut self, name: &str, value: V) -> Self {
        self.optional.insert(name.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Subgraph {
    pub(crate) id: ElementId,
    pub(crate) elements: Vec<(String, Option<Orientation>)>,
    pub(crate) optional: OptionalFields,
}

impl Subgraph {
    pub fn from_record(
        record: SubgraphRecord,
        id: ElementId,
    ) -> Result<Subgraph, ValidationError> {
        check_reserved(&record.optional, SUBGRAPH_FIELDS)?;

        let mut seen: FnvHashSet<&str> = FnvHashSet::default();
        for (member, _) in record.elements.iter() {
            check_reference(member, "subgraph member")?;
            if !seen.insert(member) {
                return Err(ValidationError::DuplicateMember(member.clone()));
            }
        }

        let elements = record
            .elements
            .iter()
            .map(|(member, orient)| {
                let orient = match orient {
                    Some(c) => Some(
                        Orientation::from_char(*c)
                            .ok_or(ValidationError::InvalidOrientation(*c))?,
                    ),
                    None => None,
                };
                Ok((member.clone(), orient))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Subgraph {
            id,
            elements,
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
    pub fn elements(&self) -> &[(String, Option<Orientation>)] {
        &self.elements
    }

    #[inline]
    pub fn optional(&self) -> &OptionalFields {
        &self.optional
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.key())),
            "elements" => {
                let members = self
                    .elements
                    .iter()
                    .map(|(id, orient)| match orient {
                        Some(o) => format!("{}{}", id, o),
                        None => id.clone(),
                    })
                    .collect::<Vec<_>>();
                Some(FieldValue::Text(members.join(" ")))
            }
            _ => self.optional.get(name).cloned(),
        }
    }
}

impl PartialEq for Subgraph {
    fn eq(&self, other: &Self) -> bool {
        self.id.same_identity(&other.id)
            && self.elements == other.elements
            && self.optional == other.optional
    }
}
