use super::lexer::{Attribute, Token, decode, tokenize};

/// Elements that hold one block of a note when they contain no other block
/// container.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "blockquote",
    "pre",
];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn is_block(&self) -> bool {
        BLOCK_ELEMENTS.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root,
    Element(Element),
    /// Decoded character data
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// How one block of a note is laid out in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSpan {
    /// A block container element with no block container inside it.
    Element(NodeId),
    /// A run of consecutive siblings outside any block container.
    Floating(Vec<NodeId>),
}

impl BlockSpan {
    /// The nodes whose content makes up the block, in order.
    pub fn content_nodes<'t>(&'t self, tree: &'t HtmlTree) -> &'t [NodeId] {
        match self {
            BlockSpan::Element(id) => tree.children(*id),
            BlockSpan::Floating(ids) => ids,
        }
    }

    /// Whether `id` lies in this block (is one of its nodes or below one).
    pub fn contains(&self, tree: &HtmlTree, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(tree.ancestors(id))
            .any(|n| match self {
                BlockSpan::Element(el) => *el == n,
                BlockSpan::Floating(ids) => ids.contains(&n),
            })
    }
}

/// A small arena DOM built from tolerant HTML parsing.
///
/// This is the "rendered surface" the selection mapper reads and the
/// structure the codec and semantic extraction walk. Node ids are only
/// meaningful for the tree that produced them.
#[derive(Debug, Clone)]
pub struct HtmlTree {
    nodes: Vec<Node>,
}

impl HtmlTree {
    /// Builds a tree from arbitrary HTML. Never fails.
    ///
    /// Stray end tags are ignored, unclosed elements close at end of input,
    /// and opening a block container implicitly closes an open `<p>`.
    pub fn parse(html: &str) -> Self {
        let mut tree = Self {
            nodes: vec![Node {
                parent: None,
                children: vec![],
                data: NodeData::Root,
            }],
        };
        let mut open: Vec<NodeId> = vec![tree.root()];

        for token in tokenize(html) {
            let current = *open.last().unwrap_or(&NodeId(0));
            match token {
                Token::Text(raw) => {
                    let text = decode(raw);
                    tree.append_text(current, &text);
                }
                Token::StartTag(tag) => {
                    if BLOCK_ELEMENTS.contains(&tag.name.as_str())
                        && let Some(p_depth) = open
                            .iter()
                            .rposition(|id| tree.element(*id).is_some_and(|el| el.name == "p"))
                    {
                        open.truncate(p_depth);
                    }
                    let parent = *open.last().unwrap_or(&NodeId(0));
                    let void = tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str());
                    let id = tree.append(
                        parent,
                        NodeData::Element(Element {
                            name: tag.name,
                            attrs: tag.attrs,
                        }),
                    );
                    if !void {
                        open.push(id);
                    }
                }
                Token::EndTag(name) => {
                    if let Some(depth) = open
                        .iter()
                        .rposition(|id| tree.element(*id).is_some_and(|el| el.name == name))
                    {
                        open.truncate(depth);
                    }
                }
            }
        }

        tree
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Whether `id` belongs to this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |n| self.parent(*n))
    }

    /// All nodes below `id` in document order (pre-order), excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![];
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Concatenated text of `id` and everything below it.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(t) = self.text(id) {
            out.push_str(t);
        }
        for d in self.descendants(id) {
            if let Some(t) = self.text(d) {
                out.push_str(t);
            }
        }
        out
    }

    /// Groups the tree into note blocks, in document order.
    ///
    /// A block container holding no other block container is one block.
    /// Any node that wraps block containers (`ul`, `blockquote`, a `div` of
    /// paragraphs) is descended into, so each inner container is its own
    /// block. Each run of other siblings is one floating block, unless the
    /// run is nothing but whitespace text (formatting between blocks).
    pub fn blocks(&self) -> Vec<BlockSpan> {
        let mut spans = vec![];
        self.collect_blocks(self.root(), &mut spans);
        spans
    }

    fn collect_blocks(&self, parent: NodeId, spans: &mut Vec<BlockSpan>) {
        let mut run: Vec<NodeId> = vec![];

        for &child in self.children(parent) {
            if self.wraps_blocks(child) {
                self.flush_floating(&mut run, spans);
                self.collect_blocks(child, spans);
            } else if self.element(child).is_some_and(Element::is_block) {
                self.flush_floating(&mut run, spans);
                spans.push(BlockSpan::Element(child));
            } else {
                run.push(child);
            }
        }
        self.flush_floating(&mut run, spans);
    }

    fn wraps_blocks(&self, id: NodeId) -> bool {
        self.children(id).iter().any(|&c| {
            self.element(c).is_some_and(Element::is_block) || self.wraps_blocks(c)
        })
    }

    fn flush_floating(&self, run: &mut Vec<NodeId>, spans: &mut Vec<BlockSpan>) {
        let meaningful = run.iter().any(|id| match self.data(*id) {
            NodeData::Text(t) => !t.trim().is_empty(),
            _ => true,
        });
        if meaningful {
            spans.push(BlockSpan::Floating(std::mem::take(run)));
        } else {
            run.clear();
        }
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: vec![],
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends text, merging with a directly preceding text sibling.
    fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent.0].children.last()
            && let NodeData::Text(existing) = &mut self.nodes[last.0].data
        {
            existing.push_str(text);
            return;
        }
        self.append(parent, NodeData::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_names(tree: &HtmlTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .filter_map(|c| tree.element(*c).map(|el| el.name.clone()))
            .collect()
    }

    #[test]
    fn builds_nested_structure() {
        let tree = HtmlTree::parse("<p>a<b>b</b>c</p>");
        let p = tree.children(tree.root())[0];
        assert_eq!(tree.element(p).unwrap().name, "p");
        assert_eq!(tree.children(p).len(), 3);
        assert_eq!(tree.text_content(p), "abc");
    }

    #[test]
    fn text_is_decoded() {
        let tree = HtmlTree::parse("a &lt;&amp;&gt; &#8203;");
        let text = tree.children(tree.root())[0];
        assert_eq!(tree.text(text), Some("a <&> \u{200B}"));
    }

    #[test]
    fn unclosed_paragraph_closes_at_next_block() {
        let tree = HtmlTree::parse("<p>one<p>two");
        assert_eq!(element_names(&tree, tree.root()), vec!["p", "p"]);
    }

    #[test]
    fn stray_end_tag_is_ignored() {
        let tree = HtmlTree::parse("<p>a</span>b</p>");
        let p = tree.children(tree.root())[0];
        assert_eq!(tree.children(p).len(), 1);
        assert_eq!(tree.text_content(p), "ab");
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let tree = HtmlTree::parse("<p>a<br>b</p>");
        let p = tree.children(tree.root())[0];
        assert_eq!(tree.children(p).len(), 3);
    }

    #[test]
    fn class_queries() {
        let tree = HtmlTree::parse(r#"<span class=" widget  tag ">x</span>"#);
        let el = tree.element(tree.children(tree.root())[0]).unwrap();
        assert!(el.has_class("widget"));
        assert!(el.has_class("tag"));
        assert!(!el.has_class("property"));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let tree = HtmlTree::parse("<p>a<b>b<i>c</i></b>d</p>");
        let texts: Vec<&str> = tree
            .descendants(tree.root())
            .into_iter()
            .filter_map(|id| tree.text(id))
            .collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn blocks_group_floating_runs() {
        let tree = HtmlTree::parse("loose <b>text</b><p>para</p>\n<div>div</div>tail");
        let spans = tree.blocks();
        assert_eq!(spans.len(), 4);
        assert!(matches!(&spans[0], BlockSpan::Floating(ids) if ids.len() == 2));
        assert!(matches!(spans[1], BlockSpan::Element(_)));
        assert!(matches!(spans[2], BlockSpan::Element(_)));
        assert!(matches!(&spans[3], BlockSpan::Floating(ids) if ids.len() == 1));
    }

    #[test]
    fn ancestors_and_index() {
        let tree = HtmlTree::parse("<p>x</p><p>a<b>b</b></p>");
        let second = tree.children(tree.root())[1];
        let b = tree.children(second)[1];
        let b_text = tree.children(b)[0];
        assert_eq!(tree.index_in_parent(b), Some(1));
        assert_eq!(tree.ancestors(b_text).collect::<Vec<_>>(), vec![b, second, tree.root()]);
    }

    #[test]
    fn list_items_are_separate_blocks() {
        let tree = HtmlTree::parse("<ul>\n<li>first</li>\n<li>second</li>\n</ul>");
        let spans = tree.blocks();
        assert_eq!(spans.len(), 2);
        let texts: Vec<String> = spans
            .iter()
            .map(|s| match s {
                BlockSpan::Element(id) => tree.text_content(*id),
                BlockSpan::Floating(_) => panic!("unexpected floating block"),
            })
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn wrapper_of_paragraphs_is_descended_into() {
        let tree = HtmlTree::parse("<div><p>a</p>loose<p>b</p></div><p>c</p>");
        let spans = tree.blocks();
        assert_eq!(spans.len(), 4);
        assert!(matches!(spans[0], BlockSpan::Element(_)));
        assert!(matches!(&spans[1], BlockSpan::Floating(ids) if ids.len() == 1));
        assert!(matches!(spans[2], BlockSpan::Element(_)));
        assert!(matches!(spans[3], BlockSpan::Element(_)));
    }

    #[test]
    fn nested_list_item_text_is_its_own_block() {
        let tree = HtmlTree::parse("<ul><li>outer<ul><li>inner</li></ul></li></ul>");
        let spans = tree.blocks();
        assert_eq!(spans.len(), 2);
        assert!(matches!(&spans[0], BlockSpan::Floating(ids) if ids.len() == 1));
        let inner = tree.descendants(tree.root())[4];
        assert_eq!(spans[1], BlockSpan::Element(inner));
        assert!(spans[1].contains(&tree, tree.children(inner)[0]));
        assert!(!spans[0].contains(&tree, inner));
    }
}
