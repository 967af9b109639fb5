//! Tag system

pub mod args;
pub mod extract;

// Re-export main types
pub use args::ArgumentList;
pub use extract::{extract_tags, RawTag, TagStyle};
