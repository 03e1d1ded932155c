// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use semnotes_engine::models::{Block, ComparisonOperator, InlineNode};

#[allow(dead_code)]
pub fn generate_blocks(count: usize) -> Vec<Block> {
    (0..count)
        .map(|i| {
            Block::new(vec![
                InlineNode::text(format!("Paragraph {i} with some <escaped> & plain content ")),
                InlineNode::tag(format!("topic-{}", i % 7)),
                InlineNode::text(" and a property "),
                InlineNode::property(
                    "price",
                    if i % 3 == 0 {
                        ComparisonOperator::GreaterThan
                    } else {
                        ComparisonOperator::Is
                    },
                    [format!("{}", i * 10)],
                ),
            ])
        })
        .collect()
}

#[allow(dead_code)]
pub fn generate_note_html(count: usize) -> String {
    semnotes_engine::serialize_document(&generate_blocks(count))
}
