use serde::{Deserialize, Serialize};

use super::operator::ComparisonOperator;

/// A decoded property assertion, without widget identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub operator: ComparisonOperator,
    pub values: Vec<String>,
}

impl Property {
    pub fn new(
        key: impl Into<String>,
        operator: ComparisonOperator,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            key: key.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Declarative summary of a note's widgets. Recomputed wholesale from the
/// note's HTML, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteSemantics {
    /// Unique tags in order of first occurrence.
    pub tags: Vec<String>,
    /// Every property in document order; duplicates are separate assertions.
    pub properties: Vec<Property>,
    /// True when any property uses an operator other than `is`.
    pub is_imaginary: bool,
}
