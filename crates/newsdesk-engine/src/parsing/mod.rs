pub mod clipboard;
pub mod words;

pub use clipboard::{MarkupLayout, clean_html, plain_lines, split_fragments};
pub use words::{TextStats, estimate, estimate_with_rate};
