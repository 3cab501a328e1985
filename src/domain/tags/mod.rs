//! Tag algebra

pub mod tag;
pub mod tag_set;

// Re-export main types
pub use tag::{Tag, MARKER};
pub use tag_set::TagSet;
