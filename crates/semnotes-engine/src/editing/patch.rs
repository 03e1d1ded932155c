use crate::models::{Block, ModelPosition};

/// Result of applying a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// The new, independent block sequence
    pub blocks: Vec<Block>,
    /// Caret requested by the transaction, if any
    pub selection: Option<ModelPosition>,
}
