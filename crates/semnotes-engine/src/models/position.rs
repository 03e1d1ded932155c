use super::content::{Block, InlineNode};

/// A point in the content model, independent of any rendering surface.
///
/// `offset` is a character offset inside a text node, or 0/1 ("before"/
/// "after") for a widget. `inline_index == content.len()` with offset 0
/// means end of block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModelPosition {
    pub block_index: usize,
    pub inline_index: usize,
    pub offset: usize,
}

impl ModelPosition {
    pub fn new(block_index: usize, inline_index: usize, offset: usize) -> Self {
        Self {
            block_index,
            inline_index,
            offset,
        }
    }

    pub fn start_of(block_index: usize) -> Self {
        Self::new(block_index, 0, 0)
    }

    /// Whether this position addresses a real point inside `block`.
    /// The block index is not checked here.
    pub fn is_valid_in(&self, block: &Block) -> bool {
        match block.content.get(self.inline_index) {
            Some(node) => self.offset <= node.flat_len(),
            None => self.inline_index == block.content.len() && self.offset == 0,
        }
    }

    /// Convert to a flat offset in which every widget counts as one unit.
    pub fn to_flat_offset(&self, block: &Block) -> Option<usize> {
        if !self.is_valid_in(block) {
            return None;
        }
        let before: usize = block.content[..self.inline_index]
            .iter()
            .map(InlineNode::flat_len)
            .sum();
        Some(before + self.offset)
    }

    /// Resolve a flat offset back into a position. At a boundary between a
    /// text run and the following node the end of the text run wins.
    /// Offsets past the end clamp to end of block.
    pub fn from_flat_offset(block_index: usize, block: &Block, offset: usize) -> Self {
        let mut remaining = offset;
        for (i, node) in block.content.iter().enumerate() {
            match node {
                InlineNode::Text(text) => {
                    let len = text.chars().count();
                    if remaining <= len {
                        return Self::new(block_index, i, remaining);
                    }
                    remaining -= len;
                }
                InlineNode::Widget(_) => {
                    if remaining == 0 {
                        return Self::new(block_index, i, 0);
                    }
                    remaining -= 1;
                }
            }
        }
        Self::new(block_index, block.content.len(), 0)
    }
}
