pub mod content;
pub mod note;
pub mod note_file;
pub mod operator;
pub mod position;
pub mod semantics;

pub use content::{Block, InlineNode, PropertyWidget, TagWidget, WidgetNode, assign_missing_ids};
pub use note::Note;
pub use note_file::NoteFile;
pub use operator::ComparisonOperator;
pub use position::ModelPosition;
pub use semantics::{NoteSemantics, Property};
