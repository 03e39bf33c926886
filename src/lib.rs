//! Snippets for range aggregate maintenance with heap-indexed segment trees.

pub mod seg_point;
pub mod seg_range;
pub mod util;
