//! PDF merging and inspection module

pub mod merge;
pub mod metadata;

// Re-export commonly used items
pub use merge::merge_pdfs;
pub use metadata::count_pages;
