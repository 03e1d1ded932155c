//! Core of the semnotes editor: the content model and its HTML codec, the
//! host selection mapper, the transaction/step engine and semantic
//! extraction. Everything here is synchronous and pure apart from `io`.

pub mod editing;
pub mod io;
pub mod models;
pub mod parsing;
pub mod search;
pub mod selection;
pub mod semantics;
pub mod serialize;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Intent, Patch, Step, StepError, Transaction};
pub use io::*;
pub use models::{
    Block, ComparisonOperator, InlineNode, ModelPosition, Note, NoteFile, NoteSemantics, Property,
    PropertyWidget, TagWidget, WidgetNode, assign_missing_ids,
};
pub use parsing::{parse_document, parse_html, text_content};
pub use search::filter_notes;
pub use selection::{HostPoint, HostRange, locate, map_point, map_position};
pub use semantics::{extract_semantics, match_notes};
pub use serialize::{serialize_document, serialize_to_html};
