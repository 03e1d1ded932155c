//! # Tolerant HTML reading
//!
//! A small, forgiving HTML front end: a cursor-based lexer and an arena
//! tree builder. It accepts whatever the editable surface hands back
//! (unbalanced tags, stray `<`, unknown elements) and never fails; the worst
//! case is that markup is read as text.
//!
//! - **`cursor`**: byte cursor used by the lexer
//! - **`lexer`**: `tokenize()` into text, start tag and end tag tokens
//! - **`tree`**: `HtmlTree` arena DOM with block grouping

pub mod cursor;
pub mod lexer;
pub mod tree;

pub use lexer::Attribute;
pub use tree::{BlockSpan, Element, HtmlTree, NodeData, NodeId};
