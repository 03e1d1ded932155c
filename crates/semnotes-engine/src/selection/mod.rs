//! # Host selection ↔ model coordinates
//!
//! The host reports its caret as a DOM-style point: a container node and an
//! offset, where the offset counts characters inside a text node and
//! children inside an element. This module resolves such points against an
//! [`HtmlTree`] of the rendered note and back again.
//!
//! Resolution works in flat offsets: text counts its characters, a widget
//! counts as one unit however much markup it renders. A point anywhere
//! inside a widget snaps to just before it (when no widget text precedes
//! the point) or just after it.

use crate::models::ModelPosition;
use crate::parsing::html::{BlockSpan, HtmlTree, NodeData, NodeId};
use crate::parsing::marker::{Marker, classify};
use crate::parsing::parse_block;

/// A caret in the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl HostPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A host selection. Only its start is ever resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostRange {
    pub start: HostPoint,
    pub end: HostPoint,
}

impl HostRange {
    pub fn collapsed(point: HostPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }
}

/// Resolves a host selection to a model position.
///
/// `None` means the selection is outside every block (empty document,
/// whitespace between blocks, a node from another tree); callers treat it
/// as "nothing to do".
pub fn map_position(tree: &HtmlTree, range: &HostRange) -> Option<ModelPosition> {
    map_point(tree, range.start)
}

pub fn map_point(tree: &HtmlTree, point: HostPoint) -> Option<ModelPosition> {
    if !tree.contains(point.node) {
        return None;
    }
    let spans = tree.blocks();
    let point = snap_out_of_widget(tree, point);
    let (block_index, flat) = match spans.iter().position(|s| s.contains(tree, point.node)) {
        Some(block_index) => (block_index, offset_in_span(tree, &spans[block_index], point)?),
        None => container_point_offset(tree, &spans, point)?,
    };

    let block = parse_block(tree, &spans[block_index]);
    Some(ModelPosition::from_flat_offset(block_index, &block, flat))
}

/// Inverse of [`map_point`]: where to put the host caret for `position`.
/// `None` when the position does not exist in the rendered note.
pub fn locate(tree: &HtmlTree, position: &ModelPosition) -> Option<HostPoint> {
    let spans = tree.blocks();
    let span = spans.get(position.block_index)?;
    let block = parse_block(tree, span);
    let mut remaining = position.to_flat_offset(&block)?;

    if let Some(point) = find_flat(tree, span.content_nodes(tree), &mut remaining) {
        return Some(point);
    }
    match span {
        BlockSpan::Element(id) => Some(HostPoint::new(*id, tree.children(*id).len())),
        BlockSpan::Floating(ids) => {
            let last = *ids.last()?;
            Some(HostPoint::new(tree.parent(last)?, tree.index_in_parent(last)? + 1))
        }
    }
}

fn is_widget(tree: &HtmlTree, id: NodeId) -> bool {
    tree.element(id)
        .is_some_and(|el| matches!(classify(el), Marker::Widget(_)))
}

/// The widget a parser would see for `id`: the outermost well-formed
/// widget among `id` and its ancestors.
fn enclosing_widget(tree: &HtmlTree, id: NodeId) -> Option<NodeId> {
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .filter(|n| is_widget(tree, *n))
        .last()
}

fn snap_out_of_widget(tree: &HtmlTree, point: HostPoint) -> HostPoint {
    let Some(widget) = enclosing_widget(tree, point.node) else {
        return point;
    };
    let (Some(parent), Some(index)) = (tree.parent(widget), tree.index_in_parent(widget)) else {
        return point;
    };
    let walker = Walker {
        tree,
        point,
        atomic_widgets: false,
    };
    let before = if point.node == widget {
        walker.units_of(&tree.children(widget)[..point.offset.min(tree.children(widget).len())])
    } else {
        walker.find(tree.children(widget), 0).unwrap_or(0)
    };
    if before == 0 {
        HostPoint::new(parent, index)
    } else {
        HostPoint::new(parent, index + 1)
    }
}

/// Block and flat offset for a point whose container holds blocks rather
/// than lying in one (the root, a list, a wrapping `div`). Only a point
/// touching a floating run resolves.
fn container_point_offset(
    tree: &HtmlTree,
    spans: &[BlockSpan],
    point: HostPoint,
) -> Option<(usize, usize)> {
    let siblings = tree.children(point.node);
    let offset = point.offset.min(siblings.len());
    let walker = Walker {
        tree,
        point: HostPoint::new(point.node, offset),
        atomic_widgets: true,
    };
    spans.iter().enumerate().find_map(|(i, span)| {
        let BlockSpan::Floating(ids) = span else {
            return None;
        };
        if tree.parent(*ids.first()?)? != point.node {
            return None;
        }
        let first = tree.index_in_parent(*ids.first()?)?;
        let last = tree.index_in_parent(*ids.last()?)?;
        if offset < first || offset > last + 1 {
            return None;
        }
        Some((i, walker.units_of(&siblings[first..offset])))
    })
}

fn offset_in_span(tree: &HtmlTree, span: &BlockSpan, point: HostPoint) -> Option<usize> {
    let walker = Walker {
        tree,
        point,
        atomic_widgets: true,
    };
    let nodes = span.content_nodes(tree);
    match span {
        BlockSpan::Element(id) if *id == point.node => {
            Some(walker.units_of(&nodes[..point.offset.min(nodes.len())]))
        }
        _ => walker.find(nodes, 0),
    }
}

struct Walker<'t> {
    tree: &'t HtmlTree,
    point: HostPoint,
    atomic_widgets: bool,
}

impl Walker<'_> {
    /// Walks `nodes` in document order and returns the flat offset of the
    /// point once it is reached.
    fn find(&self, nodes: &[NodeId], mut acc: usize) -> Option<usize> {
        for &id in nodes {
            match self.tree.data(id) {
                NodeData::Text(text) => {
                    let len = text.chars().count();
                    if id == self.point.node {
                        return Some(acc + self.point.offset.min(len));
                    }
                    acc += len;
                }
                NodeData::Element(_) if self.atomic_widgets && is_widget(self.tree, id) => {
                    acc += 1;
                }
                NodeData::Element(_) => {
                    let children = self.tree.children(id);
                    if id == self.point.node {
                        let end = self.point.offset.min(children.len());
                        return Some(acc + self.units_of(&children[..end]));
                    }
                    if let Some(found) = self.find(children, acc) {
                        return Some(found);
                    }
                    acc += self.units_of(children);
                }
                NodeData::Root => {}
            }
        }
        None
    }

    /// Total flat length of `nodes`.
    fn units_of(&self, nodes: &[NodeId]) -> usize {
        nodes
            .iter()
            .map(|&id| match self.tree.data(id) {
                NodeData::Text(text) => text.chars().count(),
                NodeData::Element(_) if self.atomic_widgets && is_widget(self.tree, id) => 1,
                NodeData::Element(_) => self.units_of(self.tree.children(id)),
                NodeData::Root => 0,
            })
            .sum()
    }
}

/// Finds the host point `remaining` flat units into `nodes`, preferring the
/// end of a text node over the start of whatever follows it.
fn find_flat(tree: &HtmlTree, nodes: &[NodeId], remaining: &mut usize) -> Option<HostPoint> {
    for &id in nodes {
        match tree.data(id) {
            NodeData::Text(text) => {
                let len = text.chars().count();
                if *remaining <= len {
                    return Some(HostPoint::new(id, *remaining));
                }
                *remaining -= len;
            }
            NodeData::Element(el) => match classify(el) {
                Marker::Widget(_) => {
                    if *remaining == 0 {
                        let parent = tree.parent(id)?;
                        return Some(HostPoint::new(parent, tree.index_in_parent(id)?));
                    }
                    *remaining -= 1;
                }
                Marker::Plain | Marker::Malformed(_) => {
                    if let Some(point) = find_flat(tree, tree.children(id), remaining) {
                        return Some(point);
                    }
                }
            },
            NodeData::Root => {}
        }
    }
    None
}
