//! Driver
//!
//! Turns analyzed files into spec files on disk. A single file and a
//! directory walk share `process_file`; per-file problems become a
//! [`FileOutcome`] and never abort a walk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ng_testgen::TestGenerator;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::{analyze_file, AnalyzeError};
use crate::logging::Logger;

/// Directories never descended into.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", ".git", ".angular"];

/// File suffixes that are never analyzed.
const SKIPPED_SUFFIXES: &[&str] = &[".spec.ts", ".test.ts", ".d.ts"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Accept a directory target and walk it.
    pub all: bool,
    /// Replace existing spec files.
    pub force: bool,
    /// Print the spec instead of writing it.
    pub dry_run: bool,
    /// Print the class description as JSON and write nothing.
    pub print_analysis: bool,
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("cannot write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot serialise the analysis: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The class carries no Angular decorator a template exists for.
    UnsupportedKind { class_name: String },
    /// A spec file is already there and `--force` was not given.
    TestExists(PathBuf),
}

#[derive(Debug)]
pub enum FileOutcome {
    Generated(PathBuf),
    /// Output went to the logger (`--dry-run`, `--print-analysis`).
    Printed,
    Skipped(SkipReason),
    Failed(ProcessError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.processed += 1;
        match outcome {
            FileOutcome::Generated(_) | FileOutcome::Printed => self.generated += 1,
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// `user.service.ts` → `user.service.spec.ts`, next to the source.
pub fn spec_path_for(source: &Path) -> PathBuf {
    let extension = source
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ts".to_string());
    source.with_extension(format!("spec.{}", extension))
}

/// Whether a directory walk should analyze `path`.
pub fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !SKIPPED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

pub fn process_file(
    path: &Path,
    options: &DriverOptions,
    generator: &TestGenerator,
    logger: &dyn Logger,
) -> FileOutcome {
    if !path.is_file() {
        let err = ProcessError::NotFound(path.to_path_buf());
        logger.error(&err.to_string());
        return FileOutcome::Failed(err);
    }

    let desc = match analyze_file(path, logger) {
        Ok(desc) => desc,
        Err(err) => {
            logger.error(&err.to_string());
            return FileOutcome::Failed(err.into());
        }
    };

    if options.print_analysis {
        return match serde_json::to_string_pretty(&desc) {
            Ok(json) => {
                logger.output(&json);
                FileOutcome::Printed
            }
            Err(err) => {
                logger.error(&err.to_string());
                FileOutcome::Failed(err.into())
            }
        };
    }

    let content = match generator.generate(&desc) {
        Ok(content) => content,
        Err(err) => {
            logger.warn(&format!("Skipping {}: {}", path.display(), err));
            return FileOutcome::Skipped(SkipReason::UnsupportedKind {
                class_name: desc.class_name,
            });
        }
    };

    let spec_path = spec_path_for(path);
    if options.dry_run {
        logger.output(&format!("// {}", spec_path.display()));
        logger.output(&content);
        return FileOutcome::Printed;
    }

    if spec_path.exists() {
        if !options.force {
            logger.warn(&format!(
                "{} already exists, skipping (use --force to overwrite)",
                spec_path.display()
            ));
            return FileOutcome::Skipped(SkipReason::TestExists(spec_path));
        }
        logger.warn(&format!("Overwriting {}", spec_path.display()));
    }

    match fs::write(&spec_path, content) {
        Ok(()) => {
            logger.info(&format!(
                "Generated {} ({} {})",
                spec_path.display(),
                desc.kind,
                desc.class_name
            ));
            FileOutcome::Generated(spec_path)
        }
        Err(source) => {
            let err = ProcessError::Write {
                path: spec_path,
                source,
            };
            logger.error(&err.to_string());
            FileOutcome::Failed(err)
        }
    }
}

/// Depth-first, name-sorted walk over `dir`.
pub fn process_directory(
    dir: &Path,
    options: &DriverOptions,
    generator: &TestGenerator,
    logger: &dyn Logger,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                logger.warn(&err.to_string());
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }
        logger.debug(&format!("Processing {}", entry.path().display()));
        let outcome = process_file(entry.path(), options, generator, logger);
        summary.record(&outcome);
    }
    summary
}

/// Process `target` and return the process exit code.
pub fn run(target: &Path, options: &DriverOptions, generator: &TestGenerator, logger: &dyn Logger) -> i32 {
    if !target.exists() {
        logger.error(&format!("{} does not exist", target.display()));
        return 1;
    }

    if target.is_dir() {
        if !options.all {
            logger.error(&format!(
                "{} is a directory; pass --all to process every file in it",
                target.display()
            ));
            return 1;
        }
        let summary = process_directory(target, options, generator, logger);
        logger.info(&format!(
            "Processed: {}, generated: {}, skipped: {}, failed: {}",
            summary.processed,
            summary.generated,
            summary.skipped,
            summary.failed
        ));
        return 0;
    }

    process_file(target, options, generator, logger);
    0
}
