use super::error::StepError;
use crate::models::{Block, InlineNode, ModelPosition};

/// One atomic structural edit.
///
/// Steps never look at the model they were built from: positions are
/// interpreted against whatever document `apply` receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Remove everything between `from` and `to` (same block) and put
    /// `insert` in its place.
    Replace {
        from: ModelPosition,
        to: ModelPosition,
        insert: Vec<InlineNode>,
    },
    /// Split a block in two; content from `at` onwards moves into a new
    /// block right after it.
    SplitBlock { at: ModelPosition },
    /// Append block `block_index` to block `block_index - 1` and remove it.
    MergeBlock { block_index: usize },
}

impl Step {
    pub fn replace(from: ModelPosition, to: ModelPosition, insert: Vec<InlineNode>) -> Self {
        Step::Replace { from, to, insert }
    }

    pub fn insert(at: ModelPosition, insert: Vec<InlineNode>) -> Self {
        Step::Replace {
            from: at,
            to: at,
            insert,
        }
    }

    pub fn delete(from: ModelPosition, to: ModelPosition) -> Self {
        Step::Replace {
            from,
            to,
            insert: vec![],
        }
    }

    pub fn split_block(at: ModelPosition) -> Self {
        Step::SplitBlock { at }
    }

    pub fn merge_block(block_index: usize) -> Self {
        Step::MergeBlock { block_index }
    }

    /// Applies the step, returning a new document. `doc` is never modified.
    pub fn apply(&self, doc: &[Block]) -> Result<Vec<Block>, StepError> {
        match self {
            Step::Replace { from, to, insert } => {
                if from.block_index != to.block_index {
                    return Err(StepError::InvalidRange(format!(
                        "replace spans blocks {} and {}",
                        from.block_index, to.block_index
                    )));
                }
                let block = block_at(doc, from.block_index)?;
                if from == to && insert.is_empty() {
                    check_position(block, from)?;
                    return Ok(doc.to_vec());
                }
                let content = replace_content(block, from, to, insert)?;
                let mut blocks = doc.to_vec();
                blocks[from.block_index] = Block::new(content);
                Ok(blocks)
            }
            Step::SplitBlock { at } => {
                let block = block_at(doc, at.block_index)?;
                check_position(block, at)?;
                let (before, after) = split_content(&block.content, at);
                let mut blocks = doc.to_vec();
                blocks[at.block_index] = Block::new(before);
                blocks.insert(at.block_index + 1, Block::new(after));
                Ok(blocks)
            }
            Step::MergeBlock { block_index } => {
                let index = *block_index;
                if index == 0 || index >= doc.len() {
                    return Err(StepError::InvalidBlockIndex {
                        index,
                        len: doc.len(),
                    });
                }
                let mut blocks = doc.to_vec();
                let merged = blocks.remove(index);
                blocks[index - 1].content.extend(merged.content);
                Ok(blocks)
            }
        }
    }
}

fn block_at(doc: &[Block], index: usize) -> Result<&Block, StepError> {
    doc.get(index).ok_or(StepError::InvalidBlockIndex {
        index,
        len: doc.len(),
    })
}

fn check_position(block: &Block, pos: &ModelPosition) -> Result<(), StepError> {
    if pos.is_valid_in(block) {
        Ok(())
    } else {
        Err(StepError::InvalidRange(format!(
            "position {}:{}:{} is outside the block",
            pos.block_index, pos.inline_index, pos.offset
        )))
    }
}

/// Content of `block` after replacing `from..to` with `insert`, normalized.
///
/// Shared with intent compilation, which needs to know where the caret
/// lands before the transaction runs.
pub(crate) fn replace_content(
    block: &Block,
    from: &ModelPosition,
    to: &ModelPosition,
    insert: &[InlineNode],
) -> Result<Vec<InlineNode>, StepError> {
    check_position(block, from)?;
    check_position(block, to)?;
    // Both positions were just validated
    let start = from.to_flat_offset(block).unwrap_or(0);
    let end = to.to_flat_offset(block).unwrap_or(0);
    if start > end {
        return Err(StepError::InvalidRange(format!(
            "range start {start} is after its end {end}"
        )));
    }

    let (mut content, _) = split_content(&block.content, from);
    let (_, after) = split_content(&block.content, to);
    content.extend_from_slice(insert);
    content.extend(after);
    Ok(normalize(content))
}

/// Cuts inline content at `at`. Text is split at the character offset;
/// a widget lands wholly on one side, so widgets can never be torn apart.
/// Text pieces left empty by the cut are dropped.
fn split_content(
    content: &[InlineNode],
    at: &ModelPosition,
) -> (Vec<InlineNode>, Vec<InlineNode>) {
    let i = at.inline_index;
    let Some(node) = content.get(i) else {
        return (content.to_vec(), vec![]);
    };

    let mut before = content[..i].to_vec();
    let mut after = vec![];
    match node {
        InlineNode::Text(text) => {
            let (head, tail) = split_at_char(text, at.offset);
            if !head.is_empty() {
                before.push(InlineNode::text(head));
            }
            if !tail.is_empty() {
                after.push(InlineNode::text(tail));
            }
        }
        InlineNode::Widget(_) if at.offset == 0 => after.push(node.clone()),
        InlineNode::Widget(_) => before.push(node.clone()),
    }
    after.extend_from_slice(&content[i + 1..]);
    (before, after)
}

fn split_at_char(s: &str, chars: usize) -> (&str, &str) {
    let byte = s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i);
    s.split_at(byte)
}

/// Merges adjacent text nodes and drops empty ones.
fn normalize(content: Vec<InlineNode>) -> Vec<InlineNode> {
    let mut out: Vec<InlineNode> = Vec::with_capacity(content.len());
    for node in content {
        match (out.last_mut(), node) {
            (_, InlineNode::Text(text)) if text.is_empty() => {}
            (Some(InlineNode::Text(last)), InlineNode::Text(text)) => last.push_str(&text),
            (_, node) => out.push(node),
        }
    }
    out
}
