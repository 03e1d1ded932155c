//! # Semantic extraction
//!
//! Derives a [`NoteSemantics`] summary from a note's full HTML: the tags it
//! carries, the property assertions it makes, and whether it is an
//! "imaginary" note (a saved query) rather than a record.

pub mod query;

pub use query::match_notes;

use crate::models::{NoteSemantics, Property, WidgetNode};
use crate::parsing::html::{HtmlTree, NodeData, NodeId};
use crate::parsing::marker::{Marker, classify};

/// Scans every widget marker in document order.
///
/// Tags are deduplicated keeping first occurrence; properties are kept
/// as-is, duplicates included. Malformed markers contribute nothing.
/// Never fails.
pub fn extract_semantics(html: &str) -> NoteSemantics {
    let tree = HtmlTree::parse(html);
    let mut semantics = NoteSemantics::default();
    collect(&tree, tree.root(), &mut semantics);
    semantics.is_imaginary = semantics
        .properties
        .iter()
        .any(|p| !p.operator.is_equality());
    semantics
}

fn collect(tree: &HtmlTree, id: NodeId, out: &mut NoteSemantics) {
    for &child in tree.children(id) {
        let NodeData::Element(el) = tree.data(child) else {
            continue;
        };
        match classify(el) {
            Marker::Widget(WidgetNode::Tag(tag)) => {
                if !out.tags.contains(&tag.tag) {
                    out.tags.push(tag.tag);
                }
            }
            Marker::Widget(WidgetNode::Property(prop)) => {
                out.properties
                    .push(Property::new(prop.key, prop.operator, prop.values));
            }
            Marker::Malformed(reason) => {
                log::debug!("skipping malformed widget: {reason}");
                collect(tree, child, out);
            }
            Marker::Plain => collect(tree, child, out),
        }
    }
}
