use uuid::Uuid;

use super::operator::ComparisonOperator;

/// A unit of inline content inside a [`Block`].
///
/// Text runs are plain characters with no embedded markup. Widgets are
/// atomic: the only cursor positions they expose are "before" (offset 0)
/// and "after" (offset 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(String),
    Widget(WidgetNode),
}

/// The closed set of widget kinds. Every consumer matches exhaustively,
/// so adding a kind is a compile-time checked change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetNode {
    Tag(TagWidget),
    Property(PropertyWidget),
}

/// Hashtag-style widget rendered as `#tag`. The tag string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWidget {
    pub tag: String,
}

/// Structured `key <operator> value[,value...]` assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyWidget {
    /// Stable widget identity. `None` until the inserting caller assigns one.
    pub id: Option<String>,
    pub key: String,
    pub operator: ComparisonOperator,
    pub values: Vec<String>,
}

impl PropertyWidget {
    pub fn new(
        key: impl Into<String>,
        operator: ComparisonOperator,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: None,
            key: key.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Give the widget a fresh `widget-<uuid>` identity, replacing any existing one.
    pub fn with_fresh_id(mut self) -> Self {
        self.id = Some(fresh_widget_id());
        self
    }
}

pub(crate) fn fresh_widget_id() -> String {
    format!("widget-{}", Uuid::new_v4())
}

impl InlineNode {
    pub fn text(content: impl Into<String>) -> Self {
        InlineNode::Text(content.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        InlineNode::Widget(WidgetNode::Tag(TagWidget { tag: tag.into() }))
    }

    pub fn property(
        key: impl Into<String>,
        operator: ComparisonOperator,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        InlineNode::Widget(WidgetNode::Property(PropertyWidget::new(
            key, operator, values,
        )))
    }

    pub fn is_widget(&self) -> bool {
        matches!(self, InlineNode::Widget(_))
    }

    /// Length in flat units: characters for text, exactly one for a widget.
    pub fn flat_len(&self) -> usize {
        match self {
            InlineNode::Text(text) => text.chars().count(),
            InlineNode::Widget(_) => 1,
        }
    }
}

impl From<WidgetNode> for InlineNode {
    fn from(widget: WidgetNode) -> Self {
        InlineNode::Widget(widget)
    }
}

/// One top-level editable unit of a note. Block-level formatting lives in
/// the host surface; the model only tracks the inline sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub content: Vec<InlineNode>,
}

impl Block {
    pub fn new(content: Vec<InlineNode>) -> Self {
        Self { content }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|node| node.flat_len() == 0)
    }

    pub fn flat_len(&self) -> usize {
        self.content.iter().map(InlineNode::flat_len).sum()
    }
}

/// Assign identities to property widgets that have none. Existing ids are
/// left alone. Returns how many ids were assigned.
pub fn assign_missing_ids(blocks: &mut [Block]) -> usize {
    let mut assigned = 0;
    for node in blocks.iter_mut().flat_map(|b| b.content.iter_mut()) {
        if let InlineNode::Widget(WidgetNode::Property(prop)) = node
            && prop.id.is_none()
        {
            prop.id = Some(fresh_widget_id());
            assigned += 1;
        }
    }
    assigned
}
