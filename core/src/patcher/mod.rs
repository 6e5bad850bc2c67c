#![deny(missing_docs)]

//! # Code Patching
//!
//! Applies planned tag edits to Go source.
//!
//! - **tags**: Rendering the new tag text for a region.
//! - **files**: Reverse-order application and the file read/write.
//! - **workflows**: Scan-then-write for a single file.

/// Tag pair extraction and rendering.
pub mod tags;

/// Region application over bytes and files.
pub mod files;

/// High-level per-file workflow.
pub mod workflows;

pub use files::{apply_file, apply_file_with, apply_regions};
pub use tags::{render_tag, tag_pairs, TagPair};
pub use workflows::inject_file;
