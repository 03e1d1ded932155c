use super::step::replace_content;
use super::{Step, Transaction};
use crate::models::{Block, InlineNode, ModelPosition, WidgetNode};

/// An edit the host asked for, already mapped into model coordinates.
///
/// Intents are the only way host input reaches the model: the host sends
/// one, the core compiles it into a [`Transaction`] and answers with the
/// resulting patch.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    InsertText { at: ModelPosition, text: String },
    /// Property widgets without an id get a fresh one here.
    InsertWidget { at: ModelPosition, widget: WidgetNode },
    DeleteBackward { at: ModelPosition },
    DeleteForward { at: ModelPosition },
    SplitBlock { at: ModelPosition },
    /// Only the first line of `text` is inserted.
    PasteLine { at: ModelPosition, text: String },
}

impl Intent {
    /// Compiles the intent against `doc`.
    ///
    /// The transaction's selection is the caret after the edit. Edits at
    /// document edges (backspace at the very start, delete at the very end)
    /// compile to a transaction without steps. An `at` that does not fit
    /// `doc` still yields a step, so the error surfaces from `apply`.
    pub fn into_transaction(self, doc: &[Block]) -> Transaction<'_> {
        match self {
            Intent::InsertText { at, text } => insert(doc, at, text),
            Intent::PasteLine { at, text } => {
                let line = text.lines().next().unwrap_or("").to_string();
                insert(doc, at, line)
            }
            Intent::InsertWidget { at, widget } => {
                let widget = match widget {
                    WidgetNode::Property(prop) if prop.id.is_none() => {
                        WidgetNode::Property(prop.with_fresh_id())
                    }
                    other => other,
                };
                insert_nodes(doc, at, vec![InlineNode::Widget(widget)])
            }
            Intent::DeleteBackward { at } => delete_backward(doc, at),
            Intent::DeleteForward { at } => delete_forward(doc, at),
            Intent::SplitBlock { at } => Transaction::new(doc)
                .step(Step::split_block(at))
                .with_selection(ModelPosition::start_of(at.block_index + 1)),
        }
    }
}

fn insert(doc: &[Block], at: ModelPosition, text: String) -> Transaction<'_> {
    if text.is_empty() {
        return Transaction::new(doc).with_selection(at);
    }
    insert_nodes(doc, at, vec![InlineNode::Text(text)])
}

fn insert_nodes(doc: &[Block], at: ModelPosition, nodes: Vec<InlineNode>) -> Transaction<'_> {
    let inserted: usize = nodes.iter().map(InlineNode::flat_len).sum();
    let caret = caret_after_replace(doc, at, at, &nodes, inserted);
    let tx = Transaction::new(doc).step(Step::insert(at, nodes));
    match caret {
        Some(caret) => tx.with_selection(caret),
        None => tx,
    }
}

fn delete_backward(doc: &[Block], at: ModelPosition) -> Transaction<'_> {
    let Some(flat) = doc.get(at.block_index).and_then(|b| at.to_flat_offset(b)) else {
        return Transaction::new(doc).step(Step::delete(at, at));
    };

    if flat > 0 {
        let block = &doc[at.block_index];
        let from = ModelPosition::from_flat_offset(at.block_index, block, flat - 1);
        return delete_range(doc, from, at);
    }
    if at.block_index == 0 {
        return Transaction::new(doc).with_selection(at);
    }
    merge_into_previous(doc, at.block_index)
}

fn delete_forward(doc: &[Block], at: ModelPosition) -> Transaction<'_> {
    let Some(block) = doc.get(at.block_index) else {
        return Transaction::new(doc).step(Step::delete(at, at));
    };
    let Some(flat) = at.to_flat_offset(block) else {
        return Transaction::new(doc).step(Step::delete(at, at));
    };

    if flat < block.flat_len() {
        let to = ModelPosition::from_flat_offset(at.block_index, block, flat + 1);
        let from = ModelPosition::from_flat_offset(at.block_index, block, flat);
        return delete_range(doc, from, to);
    }
    if at.block_index + 1 < doc.len() {
        return merge_into_previous(doc, at.block_index + 1);
    }
    Transaction::new(doc).with_selection(at)
}

fn delete_range(doc: &[Block], from: ModelPosition, to: ModelPosition) -> Transaction<'_> {
    let caret = caret_after_replace(doc, from, to, &[], 0);
    let tx = Transaction::new(doc).step(Step::delete(from, to));
    match caret {
        Some(caret) => tx.with_selection(caret),
        None => tx,
    }
}

/// Merges `block_index` into the block before it, caret at the seam.
fn merge_into_previous(doc: &[Block], block_index: usize) -> Transaction<'_> {
    let previous = &doc[block_index - 1];
    let mut merged = previous.clone();
    merged.content.extend(doc[block_index].content.iter().cloned());
    let caret = ModelPosition::from_flat_offset(block_index - 1, &merged, previous.flat_len());
    Transaction::new(doc)
        .step(Step::merge_block(block_index))
        .with_selection(caret)
}

/// Where the caret lands once `from..to` is replaced by `insert`, measured
/// against the block as it will be after the step.
fn caret_after_replace(
    doc: &[Block],
    from: ModelPosition,
    to: ModelPosition,
    insert: &[InlineNode],
    inserted: usize,
) -> Option<ModelPosition> {
    let block = doc.get(from.block_index)?;
    let start = from.to_flat_offset(block)?;
    let content = replace_content(block, &from, &to, insert).ok()?;
    Some(ModelPosition::from_flat_offset(
        from.block_index,
        &Block::new(content),
        start + inserted,
    ))
}
