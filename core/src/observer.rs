//! # Observers
//!
//! Progress hooks for scanning and patching. The core never logs directly;
//! it reports to an `InjectObserver`, and `TracingObserver` forwards those
//! reports to `tracing`.

use crate::parser::models::EditRegion;
use std::path::Path;

/// Receives progress events while a file is scanned and patched.
///
/// Every hook defaults to a no-op.
pub trait InjectObserver {
    /// A file is about to be parsed.
    fn on_scan_started(&self, _path: &Path) {}

    /// A region was planned.
    fn on_region_found(&self, _path: &Path, _region: &EditRegion) {}

    /// Scanning completed with `count` regions.
    fn on_scan_finished(&self, _path: &Path, _count: usize) {}

    /// A region was rewritten; `expression` is the original field declaration text.
    fn on_region_applied(&self, _path: &Path, _region: &EditRegion, _expression: &str) {}

    /// The patched file was written back with `count` regions applied.
    fn on_file_written(&self, _path: &Path, _count: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl InjectObserver for NoopObserver {}

/// Emits each event as a `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl InjectObserver for TracingObserver {
    fn on_scan_started(&self, path: &Path) {
        tracing::info!(file = %path.display(), "parsing file for inject tag comments");
    }

    fn on_region_found(&self, path: &Path, region: &EditRegion) {
        tracing::debug!(
            file = %path.display(),
            start = region.start,
            end = region.end,
            kind = ?region.kind,
            current = %region.current_metadata,
            replacement = %region.replacement_metadata,
            "planned tag injection"
        );
    }

    fn on_scan_finished(&self, path: &Path, count: usize) {
        tracing::info!(
            file = %path.display(),
            fields = count,
            "parsed file, fields to inject custom tags"
        );
    }

    fn on_region_applied(&self, path: &Path, region: &EditRegion, expression: &str) {
        tracing::debug!(
            file = %path.display(),
            tag = %region.replacement_metadata,
            expression = %expression,
            "inject custom tag"
        );
    }

    fn on_file_written(&self, path: &Path, count: usize) {
        if count > 0 {
            tracing::info!(file = %path.display(), fields = count, "file injected with custom tags");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl InjectObserver for Recorder {
        fn on_scan_finished(&self, _path: &Path, count: usize) {
            self.events.borrow_mut().push(format!("scanned {}", count));
        }
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let recorder = Recorder::default();
        let observer: &dyn InjectObserver = &recorder;
        let path = Path::new("a.pb.go");

        observer.on_scan_started(path);
        observer.on_file_written(path, 3);
        observer.on_scan_finished(path, 2);

        assert_eq!(*recorder.events.borrow(), vec!["scanned 2".to_string()]);
    }

    #[test]
    fn test_builtin_observers_accept_events() {
        let path = Path::new("a.pb.go");
        for observer in [&NoopObserver as &dyn InjectObserver, &TracingObserver] {
            observer.on_scan_started(path);
            observer.on_scan_finished(path, 0);
            observer.on_file_written(path, 0);
        }
    }
}
