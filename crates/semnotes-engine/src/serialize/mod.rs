//! # Content model → canonical HTML
//!
//! Output is deterministic: attribute order is fixed and every value is
//! escaped the same way, so `serialize_to_html(parse_html(html)) == html`
//! for anything this module produced.

use html_escape::{encode_double_quoted_attribute, encode_single_quoted_attribute, encode_text};

use crate::models::{Block, ComparisonOperator, InlineNode, PropertyWidget, TagWidget, WidgetNode};
use crate::parsing::marker::WidgetMarker;

/// Serializes one block's inline nodes.
pub fn serialize_to_html(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_inline(&mut out, node);
    }
    out
}

/// Serializes a whole note. Each block becomes a `<p>`; empty blocks carry
/// a zero-width space so the host surface renders them.
pub fn serialize_document(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str("<p>");
        if block.is_empty() {
            out.push_str("&#8203;");
        } else {
            for node in &block.content {
                write_inline(&mut out, node);
            }
        }
        out.push_str("</p>");
    }
    out
}

fn write_inline(out: &mut String, node: &InlineNode) {
    match node {
        InlineNode::Text(text) => out.push_str(&encode_text(text)),
        InlineNode::Widget(WidgetNode::Tag(tag)) => write_tag(out, tag),
        InlineNode::Widget(WidgetNode::Property(prop)) => write_property(out, prop),
    }
}

fn write_tag(out: &mut String, tag: &TagWidget) {
    out.push_str(&format!(
        r#"<span class="{} {}" contenteditable="false" {}="{}">#{}</span>"#,
        WidgetMarker::CLASS,
        WidgetMarker::TAG_CLASS,
        WidgetMarker::TAG_ATTR,
        encode_double_quoted_attribute(&tag.tag),
        encode_text(&tag.tag),
    ));
}

fn write_property(out: &mut String, prop: &PropertyWidget) {
    out.push_str("<span ");
    if let Some(id) = &prop.id {
        out.push_str(&format!(
            r#"{}="{}" "#,
            WidgetMarker::ID_ATTR,
            encode_double_quoted_attribute(id)
        ));
    }
    // Vec<String> always serializes
    let values_json = serde_json::to_string(&prop.values).unwrap_or_else(|_| "[]".to_string());
    out.push_str(&format!(
        r#"class="{} {}" contenteditable="false" {}="{}" {}="{}" {}='{}'>"#,
        WidgetMarker::CLASS,
        WidgetMarker::PROPERTY_CLASS,
        WidgetMarker::KEY_ATTR,
        encode_double_quoted_attribute(&prop.key),
        WidgetMarker::OPERATOR_ATTR,
        encode_double_quoted_attribute(prop.operator.as_str()),
        WidgetMarker::VALUES_ATTR,
        encode_single_quoted_attribute(&values_json),
    ));
    write_property_label(out, prop);
    out.push_str("</span>");
}

/// Human-readable body of a property widget: key, operator symbol, then
/// one segment per value. A range reads `low & high`.
fn write_property_label(out: &mut String, prop: &PropertyWidget) {
    out.push_str(&format!(
        r#"<span class="property-key">{}</span><span class="property-operator">{}</span>"#,
        encode_text(&prop.key),
        encode_text(prop.operator.symbol()),
    ));
    if let (ComparisonOperator::Between, [low, high, ..]) =
        (&prop.operator, prop.values.as_slice())
    {
        out.push_str(&format!(
            r#"<span class="property-value">{}</span><span class="property-operator">&amp;</span><span class="property-value">{}</span>"#,
            encode_text(low),
            encode_text(high),
        ));
        return;
    }
    for (i, value) in prop.values.iter().enumerate() {
        if i > 0 {
            out.push_str(r#"<span class="property-separator">, </span>"#);
        }
        out.push_str(&format!(
            r#"<span class="property-value">{}</span>"#,
            encode_text(value)
        ));
    }
}
