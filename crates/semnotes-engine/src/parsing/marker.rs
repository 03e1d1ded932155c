use serde_json::Value;

use super::html::Element;
use crate::models::{PropertyWidget, TagWidget, WidgetNode};

/// Markup conventions shared with the rendering layer.
///
/// Every widget is an element carrying [`WidgetMarker::CLASS`] plus a kind
/// class, marked non-editable, with its data in fixed attributes. These
/// names are a contract with the host surface and must not change.
pub struct WidgetMarker;

impl WidgetMarker {
    pub const CLASS: &'static str = "widget";
    pub const TAG_CLASS: &'static str = "tag";
    pub const PROPERTY_CLASS: &'static str = "property";
    pub const ID_ATTR: &'static str = "id";
    pub const TAG_ATTR: &'static str = "data-tag";
    pub const KEY_ATTR: &'static str = "data-key";
    pub const OPERATOR_ATTR: &'static str = "data-operator";
    pub const VALUES_ATTR: &'static str = "data-values";
}

/// What an element means to the content model.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// Ordinary markup; only its text counts.
    Plain,
    Widget(WidgetNode),
    /// Looks like a widget but lacks required data.
    Malformed(&'static str),
}

pub fn classify(el: &Element) -> Marker {
    if !el.has_class(WidgetMarker::CLASS) {
        return Marker::Plain;
    }
    if el.has_class(WidgetMarker::TAG_CLASS) {
        return decode_tag(el);
    }
    if el.has_class(WidgetMarker::PROPERTY_CLASS) {
        return decode_property(el);
    }
    Marker::Plain
}

fn decode_tag(el: &Element) -> Marker {
    match el.attr(WidgetMarker::TAG_ATTR) {
        Some(tag) if !tag.is_empty() => Marker::Widget(WidgetNode::Tag(TagWidget {
            tag: tag.to_string(),
        })),
        _ => Marker::Malformed("tag widget without data-tag"),
    }
}

fn decode_property(el: &Element) -> Marker {
    let key = match el.attr(WidgetMarker::KEY_ATTR) {
        Some(key) if !key.is_empty() => key,
        _ => return Marker::Malformed("property widget without data-key"),
    };
    let Some(operator) = el.attr(WidgetMarker::OPERATOR_ATTR) else {
        return Marker::Malformed("property widget without data-operator");
    };
    let Some(raw_values) = el.attr(WidgetMarker::VALUES_ATTR) else {
        return Marker::Malformed("property widget without data-values");
    };
    let Some(values) = decode_values(raw_values) else {
        return Marker::Malformed("property widget with unreadable data-values");
    };
    let id = el
        .attr(WidgetMarker::ID_ATTR)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Marker::Widget(WidgetNode::Property(PropertyWidget {
        id,
        key: key.to_string(),
        operator: operator.into(),
        values,
    }))
}

/// Decodes the JSON array held in `data-values`.
///
/// Strings are taken as-is; numbers and booleans are accepted in their
/// JSON spelling. Anything else (objects, nested arrays, null, a non-array
/// document) makes the whole value unreadable.
pub fn decode_values(raw: &str) -> Option<Vec<String>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComparisonOperator;
    use crate::parsing::html::HtmlTree;
    use rstest::rstest;

    fn first_element(html: &str) -> Element {
        let tree = HtmlTree::parse(html);
        let id = tree.children(tree.root())[0];
        tree.element(id).unwrap().clone()
    }

    #[test]
    fn plain_span_is_not_a_widget() {
        assert_eq!(classify(&first_element("<span class=\"tag\">x</span>")), Marker::Plain);
    }

    #[test]
    fn widget_without_known_kind_is_plain() {
        assert_eq!(
            classify(&first_element("<span class=\"widget mention\">x</span>")),
            Marker::Plain
        );
    }

    #[test]
    fn tag_widget_keeps_tag_verbatim() {
        let el = first_element(r#"<span class="widget tag" data-tag="Q3-Plans!">#Q3-Plans!</span>"#);
        assert_eq!(
            classify(&el),
            Marker::Widget(WidgetNode::Tag(TagWidget {
                tag: "Q3-Plans!".to_string()
            }))
        );
    }

    #[test]
    fn property_widget_without_id_stays_unset() {
        let el = first_element(
            r#"<span class="widget property" data-key="status" data-operator="is" data-values='["done"]'>x</span>"#,
        );
        match classify(&el) {
            Marker::Widget(WidgetNode::Property(p)) => {
                assert_eq!(p.id, None);
                assert_eq!(p.key, "status");
                assert_eq!(p.operator, ComparisonOperator::Is);
                assert_eq!(p.values, vec!["done"]);
            }
            other => panic!("expected property widget, got {other:?}"),
        }
    }

    #[rstest]
    #[case(r#"<span class="widget tag">#x</span>"#)]
    #[case(r#"<span class="widget tag" data-tag="">#</span>"#)]
    #[case(r#"<span class="widget property" data-operator="is" data-values='[]'>x</span>"#)]
    #[case(r#"<span class="widget property" data-key="" data-operator="is" data-values='[]'>x</span>"#)]
    #[case(r#"<span class="widget property" data-key="k" data-values='[]'>x</span>"#)]
    #[case(r#"<span class="widget property" data-key="k" data-operator="is">x</span>"#)]
    #[case(r#"<span class="widget property" data-key="k" data-operator="is" data-values="not-json">x</span>"#)]
    fn malformed_widgets_are_reported(#[case] html: &str) {
        assert!(matches!(classify(&first_element(html)), Marker::Malformed(_)));
    }

    #[rstest]
    #[case(r#"["a","b"]"#, Some(vec!["a", "b"]))]
    #[case("[100, true]", Some(vec!["100", "true"]))]
    #[case("[]", Some(vec![]))]
    #[case(r#"{"a":1}"#, None)]
    #[case("[null]", None)]
    #[case("[[1]]", None)]
    #[case("oops", None)]
    fn values_decoding(#[case] raw: &str, #[case] expected: Option<Vec<&str>>) {
        let expected = expected.map(|v| v.into_iter().map(String::from).collect::<Vec<_>>());
        assert_eq!(decode_values(raw), expected);
    }
}
