/*!
 * # Editing Core
 *
 * All changes to a note's content model go through this module. The model
 * is never edited in place: a [`Transaction`] collects [`Step`]s against a
 * source document and applying it yields a [`Patch`] holding a brand new
 * block sequence plus the caret the host should restore.
 *
 * ## Flow
 *
 * 1. The host maps its selection to a [`ModelPosition`](crate::models::ModelPosition)
 *    (see [`crate::selection`]) and sends an [`Intent`]
 * 2. The intent compiles into a transaction against the current blocks
 * 3. `apply` validates and runs every step, or fails with a [`StepError`]
 *    and leaves the source untouched
 * 4. The host re-renders the patch blocks and places the caret
 *
 * ## Module Structure
 *
 * - **`step`**: the three primitive edits (replace, split, merge)
 * - **`transaction`**: ordered step batches
 * - **`intent`**: host edit intents compiled into transactions
 * - **`patch`**: result of applying a transaction
 * - **`error`**: step validation failures
 *
 * ```rust
 * use semnotes_engine::editing::{Intent, Transaction, Step};
 * use semnotes_engine::models::{Block, InlineNode, ModelPosition};
 *
 * let doc = vec![Block::new(vec![InlineNode::text("hello")])];
 * let patch = Intent::SplitBlock { at: ModelPosition::new(0, 0, 2) }
 *     .into_transaction(&doc)
 *     .apply()
 *     .unwrap();
 * assert_eq!(patch.blocks.len(), 2);
 * assert_eq!(doc.len(), 1);
 * ```
 */

pub mod error;
pub mod intent;
pub mod patch;
pub mod step;
pub mod transaction;

pub use error::StepError;
pub use intent::Intent;
pub use patch::Patch;
pub use step::Step;
pub use transaction::Transaction;
