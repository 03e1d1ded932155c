//! # HTML → content model
//!
//! Parsing is tolerant by contract: unknown markup contributes only its
//! text, malformed widget markers degrade to their visible text, and no
//! input makes the parser fail.
//!
//! - **`html`**: lexer and arena tree shared with selection mapping and
//!   semantic extraction
//! - **`marker`**: widget markup conventions and widget decoding

pub mod html;
pub mod marker;

use html::{BlockSpan, HtmlTree, NodeData, NodeId};
use marker::{Marker, classify};

use crate::models::{Block, InlineNode};

/// Rendered content of an otherwise empty block, so the host gives it height.
pub const EMPTY_BLOCK_PLACEHOLDER: &str = "\u{200B}";

/// Parses the inner markup of a single block into inline nodes.
///
/// Text is concatenated across non-widget markup into one run per
/// contiguous segment. The only way to get an empty text node is to pass
/// an empty string.
pub fn parse_html(html: &str) -> Vec<InlineNode> {
    if html.is_empty() {
        return vec![InlineNode::text("")];
    }
    let tree = HtmlTree::parse(html);
    collect_inline(&tree, tree.children(tree.root()))
}

/// Parses a whole note into blocks. Always yields at least one block.
pub fn parse_document(html: &str) -> Vec<Block> {
    let tree = HtmlTree::parse(html);
    let blocks: Vec<Block> = tree
        .blocks()
        .iter()
        .map(|span| parse_block(&tree, span))
        .collect();
    if blocks.is_empty() {
        return vec![Block::empty()];
    }
    blocks
}

/// Plain text of an HTML fragment, widget labels included.
pub fn text_content(html: &str) -> String {
    let tree = HtmlTree::parse(html);
    tree.text_content(tree.root())
}

/// Builds the model block for one span of an already parsed tree.
pub(crate) fn parse_block(tree: &HtmlTree, span: &BlockSpan) -> Block {
    let content = collect_inline(tree, span.content_nodes(tree));
    match content.as_slice() {
        [InlineNode::Text(t)] if t == EMPTY_BLOCK_PLACEHOLDER => Block::empty(),
        _ => Block::new(content),
    }
}

fn collect_inline(tree: &HtmlTree, nodes: &[NodeId]) -> Vec<InlineNode> {
    let mut collector = InlineCollector::default();
    for &id in nodes {
        collector.visit(tree, id);
    }
    collector.finish()
}

#[derive(Default)]
struct InlineCollector {
    nodes: Vec<InlineNode>,
    run: String,
}

impl InlineCollector {
    fn visit(&mut self, tree: &HtmlTree, id: NodeId) {
        match tree.data(id) {
            NodeData::Text(text) => self.run.push_str(text),
            NodeData::Element(el) => match classify(el) {
                Marker::Widget(widget) => {
                    self.flush_run();
                    self.nodes.push(InlineNode::Widget(widget));
                }
                Marker::Malformed(reason) => {
                    log::debug!("degrading malformed widget to text: {reason}");
                    self.visit_children(tree, id);
                }
                Marker::Plain => self.visit_children(tree, id),
            },
            NodeData::Root => self.visit_children(tree, id),
        }
    }

    fn visit_children(&mut self, tree: &HtmlTree, id: NodeId) {
        for &child in tree.children(id) {
            self.visit(tree, child);
        }
    }

    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            self.nodes
                .push(InlineNode::Text(std::mem::take(&mut self.run)));
        }
    }

    fn finish(mut self) -> Vec<InlineNode> {
        self.flush_run();
        self.nodes
    }
}
