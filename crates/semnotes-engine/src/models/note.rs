use serde::Serialize;

use super::semantics::Property;
use crate::semantics::extract_semantics;

/// A note with its HTML content and the semantics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Content stored as an HTML string
    pub content: String,
    pub tags: Vec<String>,
    pub properties: Vec<Property>,
    pub is_imaginary: bool,
}

impl Note {
    pub fn from_html(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut note = Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            properties: Vec::new(),
            is_imaginary: false,
        };
        note.set_content(content);
        note
    }

    /// Replace the content and re-derive tags, properties and the
    /// imaginary flag from it.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        let semantics = extract_semantics(&self.content);
        self.tags = semantics.tags;
        self.properties = semantics.properties;
        self.is_imaginary = semantics.is_imaginary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComparisonOperator;

    #[test]
    fn semantics_follow_content_changes() {
        let mut note = Note::from_html(
            "n1",
            "Groceries",
            r#"<p><span class="widget tag" data-tag="shopping">#shopping</span></p>"#,
        );
        assert_eq!(note.tags, vec!["shopping"]);
        assert!(!note.is_imaginary);

        note.set_content(
            r#"<p><span class="widget property" data-key="price" data-operator="<" data-values='["10"]'>price</span></p>"#,
        );
        assert!(note.tags.is_empty());
        assert_eq!(
            note.properties,
            vec![Property::new("price", ComparisonOperator::LessThan, ["10"])]
        );
        assert!(note.is_imaginary);
    }
}
