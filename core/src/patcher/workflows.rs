use crate::error::AppResult;
use crate::observer::InjectObserver;
use crate::parser::scan_file_with;
use crate::patcher::files::apply_file_with;
use std::path::Path;

/// Scans `path` and writes the planned tag edits back to it.
///
/// Returns the number of fields that were rewritten. A parse failure leaves
/// the file untouched.
pub fn inject_file(path: &Path, skip: &[String], observer: &dyn InjectObserver) -> AppResult<usize> {
    let regions = scan_file_with(path, skip, observer)?;
    apply_file_with(path, &regions, observer)?;
    Ok(regions.len())
}
