#![deny(missing_docs)]

//! # Inject Command
//!
//! Resolves the input files and runs scan-then-write on each one
//! independently. A failing file is logged and does not stop the others.

use crate::error::{CliError, CliResult};
use inject_tag_core::{inject_file, InjectObserver};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Arguments for the inject command.
#[derive(clap::Args, Debug, Clone)]
pub struct InjectArgs {
    /// Go files to rewrite. Directories are searched recursively for `.go` files.
    pub paths: Vec<PathBuf>,

    /// Glob pattern of files to rewrite (e.g. `api/*.pb.go`). Repeatable.
    #[clap(long, env = "INJECT_TAG_INPUT", value_delimiter = ',')]
    pub input: Vec<String>,

    /// Reserved `XXX` fields whose tag gets `name:"-"` pairs appended.
    /// Comma separated.
    #[clap(
        long = "xxx-skip",
        alias = "XXX_skip",
        env = "INJECT_TAG_XXX_SKIP",
        value_delimiter = ','
    )]
    pub xxx_skip: Vec<String>,
}

/// Executes the inject command over every resolved file.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `observer` - Receives scan and write progress for each file.
pub fn execute(args: &InjectArgs, observer: &dyn InjectObserver) -> CliResult<()> {
    let files = collect_files(args)?;
    if files.is_empty() {
        return Err(CliError::General(
            "no input files, pass paths or --input".into(),
        ));
    }

    let mut failures = 0;
    for path in &files {
        if let Err(e) = inject_file(path, &args.xxx_skip, observer) {
            tracing::error!(file = %path.display(), error = %e, "failed to inject tags");
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(CliError::Failed(failures));
    }
    Ok(())
}

/// Expands paths and glob patterns into a de-duplicated file list, in argument order.
fn collect_files(args: &InjectArgs) -> CliResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for path in &args.paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "go"))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    for pattern in &args.input {
        let entries = glob::glob(pattern)
            .map_err(|e| CliError::General(format!("invalid --input pattern {:?}: {}", pattern, e)))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "unreadable glob match"),
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}
