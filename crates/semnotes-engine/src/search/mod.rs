//! Free-text note filtering for list views.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Note;
use crate::parsing::text_content;

/// One parsed part of a search term, already lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPart {
    /// `#x`: some tag contains `x`
    Tag(String),
    /// `k:v`: a property keyed `k` has a value containing `v`
    Property { key: String, value: String },
    /// Anything else: title or plain content contains it
    Text(String),
}

/// Splits a search term into parts. Whitespace separates parts except
/// inside double quotes; quotes are removed from text and property values.
pub fn parse_search(term: &str) -> Vec<SearchPart> {
    static PART_REGEX: OnceLock<Regex> = OnceLock::new();
    let part_regex = PART_REGEX
        .get_or_init(|| Regex::new(r#"(?:[^\s"]+|"[^"]*")+"#).expect("Invalid search regex"));

    let lower = term.to_lowercase();
    part_regex
        .find_iter(&lower)
        .map(|m| m.as_str())
        .map(|part| {
            if let Some(tag) = part.strip_prefix('#') {
                SearchPart::Tag(tag.to_string())
            } else if let Some((key, value)) = part.split_once(':') {
                SearchPart::Property {
                    key: key.to_string(),
                    value: value.replace('"', ""),
                }
            } else {
                SearchPart::Text(part.replace('"', ""))
            }
        })
        .collect()
}

/// Notes matching every part of `term`, in their original order.
/// A blank term returns every note.
pub fn filter_notes<'n>(notes: &'n [Note], term: &str) -> Vec<&'n Note> {
    let parts = parse_search(term);
    if parts.is_empty() {
        return notes.iter().collect();
    }
    notes
        .iter()
        .filter(|note| {
            let title = note.title.to_lowercase();
            let text = text_content(&note.content).to_lowercase();
            parts.iter().all(|part| match part {
                SearchPart::Tag(wanted) => note
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(wanted.as_str())),
                SearchPart::Property { key, value } => note.properties.iter().any(|prop| {
                    prop.key.to_lowercase() == *key
                        && prop
                            .values
                            .iter()
                            .any(|v| v.to_lowercase().contains(value.as_str()))
                }),
                SearchPart::Text(wanted) => {
                    title.contains(wanted.as_str()) || text.contains(wanted.as_str())
                }
            })
        })
        .collect()
}
