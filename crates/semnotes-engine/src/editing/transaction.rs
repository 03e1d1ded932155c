use super::{Patch, Step, StepError};
use crate::models::{Block, ModelPosition};

/// An ordered batch of steps against one source document.
///
/// Steps run in sequence, each against the output of the previous one.
/// Applying produces a fresh block sequence and never touches the source,
/// so a failed transaction leaves the caller's document exactly as it was.
#[derive(Debug, Clone)]
pub struct Transaction<'a> {
    doc: &'a [Block],
    steps: Vec<Step>,
    selection: Option<ModelPosition>,
}

impl<'a> Transaction<'a> {
    pub fn new(doc: &'a [Block]) -> Self {
        Self {
            doc,
            steps: Vec::new(),
            selection: None,
        }
    }

    /// Builder form of [`Transaction::add_step`].
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn add_step(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Caret to report with the resulting patch. Not validated against
    /// the new document.
    pub fn set_selection(&mut self, selection: ModelPosition) -> &mut Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_selection(mut self, selection: ModelPosition) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn selection(&self) -> Option<ModelPosition> {
        self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order. The first failing step aborts the whole
    /// transaction.
    pub fn apply(&self) -> Result<Patch, StepError> {
        let mut blocks = self.doc.to_vec();
        for step in &self.steps {
            blocks = step.apply(&blocks)?;
        }
        Ok(Patch {
            blocks,
            selection: self.selection,
        })
    }
}
