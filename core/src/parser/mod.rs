#![deny(missing_docs)]

//! # Parser Module
//!
//! Parses Go source with tree-sitter and plans tag edits from comment directives.

pub mod directives;
pub mod models;
pub mod scanner;
pub mod syntax;

pub use directives::{parse_directive, Directive, RESERVED_PREFIX};
pub use models::{EditRegion, OneofResolution, RegionKind, RegionList};
pub use scanner::{scan_file, scan_file_with, scan_source};
