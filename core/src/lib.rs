#![deny(missing_docs)]

//! # Inject Tag Core
//!
//! Rewrites the struct tags of generated Go code from `@inject_tag` comment
//! directives, without touching any other byte of the file.

/// Shared error types.
pub mod error;

/// Progress observers.
pub mod observer;

/// Go parsing and edit planning.
pub mod parser;

/// Tag patching utilities.
pub mod patcher;

pub use error::{AppError, AppResult};
pub use observer::{InjectObserver, NoopObserver, TracingObserver};
pub use parser::{
    scan_file, scan_file_with, scan_source, EditRegion, OneofResolution, RegionKind, RegionList,
};
pub use patcher::{apply_file, apply_file_with, apply_regions, inject_file};
