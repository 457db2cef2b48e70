use crate::element::{Element, FieldValue, Scope};
use crate::error::GraphResult;

use super::GfaGraph;

/// Matches when the element's field equals the searched value.
pub fn value_equality(field: &FieldValue, value: &FieldValue) -> GraphResult<bool> {
    Ok(field == value)
}

/// Matches every element that has the field, whatever its value.
pub fn ignore_value(_field: &FieldValue, _value: &FieldValue) -> GraphResult<bool> {
    Ok(true)
}

impl GfaGraph {
    /// Every element within `scope`, nodes first, then edges and
    /// subgraphs.
    pub fn elements(&self, scope: Scope) -> Vec<Element<'_>> {
        let mut elements = Vec::new();
        if let Scope::Node | Scope::All = scope {
            elements.extend(self.nodes().map(Element::Node));
        }
        if let Scope::Edge | Scope::All = scope {
            elements.extend(self.edges().map(Element::Edge));
        }
        if let Scope::Subgraph | Scope::All = scope {
            elements.extend(self.subgraphs().map(Element::Subgraph));
        }
        elements
    }

    /// Ids of the elements within `scope` that have `field` and for
    /// which `comparator(field value, value)` holds. Elements without
    /// the field never match; an error from the comparator aborts the
    /// search.
    pub fn search<F>(
        &self,
        field: &str,
        value: &FieldValue,
        comparator: F,
        scope: Scope,
    ) -> GraphResult<Vec<String>>
    where
        F: Fn(&FieldValue, &FieldValue) -> GraphResult<bool>,
    {
        let mut found = Vec::new();
        for element in self.elements(scope) {
            if let Some(field_value) = element.field(field) {
                if comparator(&field_value, value)? {
                    found.push(element.key());
                }
            }
        }
        Ok(found)
    }
}
