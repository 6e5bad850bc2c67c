//! # Patch Writer
//!
//! Rewrites tag literals inside planned regions. All offsets refer to the
//! original text, so regions are applied from the highest `start` down.

use crate::error::{AppError, AppResult};
use crate::observer::{InjectObserver, NoopObserver, TracingObserver};
use crate::parser::models::{EditRegion, RegionList};
use crate::patcher::tags::render_tag;
use regex::bytes::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Applies regions to in-memory `contents`, returning the patched bytes.
pub fn apply_regions(contents: &[u8], regions: &RegionList) -> AppResult<Vec<u8>> {
    apply_regions_with(contents, regions, Path::new(""), &NoopObserver)
}

fn apply_regions_with(
    contents: &[u8],
    regions: &RegionList,
    path: &Path,
    observer: &dyn InjectObserver,
) -> AppResult<Vec<u8>> {
    let mut patched = contents.to_vec();

    for region in regions.iter_rev() {
        if region.start >= region.end || region.end > patched.len() {
            return Err(AppError::General(format!(
                "Region {}..{} is out of bounds for a {} byte file",
                region.start,
                region.end,
                patched.len()
            )));
        }

        let expression = patch_expression(&patched[region.span()], region)?;
        observer.on_region_applied(
            path,
            region,
            &String::from_utf8_lossy(&patched[region.span()]),
        );
        patched.splice(region.span(), expression);
    }

    Ok(patched)
}

/// Rewrites the trailing tag literal of one field declaration.
fn patch_expression(expression: &[u8], region: &EditRegion) -> AppResult<Vec<u8>> {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"`[^`]*`$").expect("Invalid regex"));

    let tag = tag_re.find(expression).ok_or_else(|| {
        AppError::General(format!(
            "No tag literal found in field declaration at {}..{}",
            region.start, region.end
        ))
    })?;

    let mut patched = Vec::with_capacity(expression.len() + region.replacement_metadata.len());
    patched.extend_from_slice(&expression[..tag.start()]);
    patched.push(b'`');
    patched.extend_from_slice(render_tag(region).as_bytes());
    patched.push(b'`');
    Ok(patched)
}

/// Patches a file in place, logging through `tracing`.
pub fn apply_file(path: &Path, regions: &RegionList) -> AppResult<()> {
    apply_file_with(path, regions, &TracingObserver)
}

/// Patches a file in place, reporting progress to `observer`.
///
/// The file is always rewritten, even when `regions` is empty.
pub fn apply_file_with(
    path: &Path,
    regions: &RegionList,
    observer: &dyn InjectObserver,
) -> AppResult<()> {
    let contents = fs::read(path)?;
    let patched = apply_regions_with(&contents, regions, path, observer)?;
    fs::write(path, patched)?;
    observer.on_file_written(path, regions.len());
    Ok(())
}
