//! # Data Models
//!
//! Planned edits produced by the scanner and consumed by the patcher.

/// Which annotation style produced a region.
///
/// The patcher renders skip-list regions by merging tag pairs; every other
/// kind replaces the tag wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Bulk `name:"-"` exclusion for a reserved-prefix field.
    SkipList,
    /// `@inject_tag:` on the field itself.
    Direct,
    /// `@inject_tag_oneof:` resolved onto a generated wrapper's payload field.
    Oneof,
}

/// One planned tag substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRegion {
    /// Byte offset of the field declaration's first byte.
    pub start: usize,
    /// Byte offset one past the end of the field's tag literal.
    pub end: usize,
    /// The tag presently attached to the field, backticks stripped.
    pub current_metadata: String,
    /// The tag to attach instead. Empty means "clear".
    pub replacement_metadata: String,
    /// The annotation style that produced this region.
    pub kind: RegionKind,
}

impl EditRegion {
    /// Byte range of the field declaration in the original source.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Pending oneof injection collected in pass 1, keyed elsewhere by wrapper type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofResolution {
    /// Title-cased variable name from the directive (e.g. `Foo`).
    pub alternative_name: String,
    /// Tag to inject into the wrapper's payload field.
    pub metadata: String,
}

/// All regions for one file, ascending by `start`, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionList {
    regions: Vec<EditRegion>,
}

impl RegionList {
    /// Orders regions in emission order into a patchable list.
    ///
    /// Sorting is stable on `start`. Regions sharing a `start` target the same
    /// field; the last emitted one wins and the others are dropped.
    pub fn from_emitted(mut emitted: Vec<EditRegion>) -> Self {
        emitted.sort_by_key(|r| r.start);

        let mut regions: Vec<EditRegion> = Vec::with_capacity(emitted.len());
        for region in emitted {
            match regions.last_mut() {
                Some(last) if last.start == region.start => *last = region,
                _ => regions.push(region),
            }
        }

        Self { regions }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when the file needs no edits.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in ascending `start` order.
    pub fn iter(&self) -> std::slice::Iter<'_, EditRegion> {
        self.regions.iter()
    }

    /// Regions in the order the patcher must apply them (highest `start` first).
    pub fn iter_rev(&self) -> std::iter::Rev<std::slice::Iter<'_, EditRegion>> {
        self.regions.iter().rev()
    }

    /// Borrow the underlying ordered slice.
    pub fn as_slice(&self) -> &[EditRegion] {
        &self.regions
    }
}

impl<'a> IntoIterator for &'a RegionList {
    type Item = &'a EditRegion;
    type IntoIter = std::slice::Iter<'a, EditRegion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
