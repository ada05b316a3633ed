//! Traxs Work Orders Library
//!
//! Downloads paginated work order PDF chunks from a Traxs WordPress site
//! and merges them into a single document. This library provides
//! functionality to:
//! - Fetch numbered PDF chunks over HTTP with basic authentication
//! - Buffer each chunk to a uniquely-named temp file
//! - Merge the chunk files, in fetch order, into one PDF
//! - Count pages in the merged result
//!
//! # Example
//!
//! ```no_run
//! use traxs_workorders::fetch::{download_chunks, FetchOptions};
//! use traxs_workorders::pdf::merge_pdfs;
//! use std::path::Path;
//!
//! let options = FetchOptions {
//!     base_url: "https://shop.example.com".to_string(),
//!     username: "admin".to_string(),
//!     password: "app-password".to_string(),
//!     chunk_size: 8,
//! };
//!
//! let chunks = download_chunks(&options).expect("Failed to download");
//! merge_pdfs(chunks.paths(), Path::new("workorders.pdf")).expect("Failed to merge");
//! chunks.cleanup().expect("Failed to remove chunk files");
//! ```

pub mod error;
pub mod fetch;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
