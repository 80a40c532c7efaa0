//! Source tree traversal and import execution.
//! Visits every entry of the source tree exactly once in depth-first
//! pre-order, skips reserved entries without descending into them, builds
//! a target descriptor per entry, and writes (or, in dry-run mode,
//! reports) the destination tree. Entry-level failures become counters;
//! only a missing or unreadable source root aborts the run.

use crate::attrs::{parse_relative_path, AttributeSet, TargetDescriptor};
use crate::constants::RESERVED_ENTRY_PATTERNS;
use crate::error::{Error, Result};
use crate::stats::{ImportStats, Outcome};
use crate::transpile::transpile;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Parameters for one import run, validated by the CLI before this
/// subsystem sees them.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Root of the source tree to import
    pub source_dir: PathBuf,
    /// Root of the destination tree to write
    pub output_dir: PathBuf,
    /// Report planned actions without touching the disk
    pub dry_run: bool,
}

/// Drives the import of one source tree.
pub struct Importer {
    options: ImportOptions,
    reserved: GlobSet,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Result<Self> {
        Ok(Importer { options, reserved: reserved_entry_set()? })
    }

    /// Walks the source tree and returns the run's counters.
    ///
    /// Dry-run performs identical parsing and transpilation work and
    /// increments the same counters; it only suppresses disk writes, so
    /// its stats are a faithful preview of an apply run.
    ///
    /// # Errors
    /// * `Error::SourceRootError` if the source root is missing
    /// * `Error::IoError` if the source root cannot be read
    pub fn run(&self) -> Result<ImportStats> {
        let source = &self.options.source_dir;
        if !source.is_dir() {
            return Err(Error::SourceRootError(source.clone()));
        }
        // Surfaces an unreadable root before any partial work happens.
        let _ = fs::read_dir(source)?;

        if !self.options.dry_run {
            fs::create_dir_all(&self.options.output_dir)?;
        }

        let mut stats = ImportStats::default();
        let mut walker = WalkDir::new(source).min_depth(1).into_iter();

        while let Some(next) = walker.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("cannot visit entry: {}", e);
                    stats.record(Outcome::Failed);
                    continue;
                }
            };

            if self.is_reserved(&entry) {
                debug!("skipping reserved entry '{}'", entry.path().display());
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                stats.record(Outcome::Skipped);
                continue;
            }

            let outcome = match self.process_entry(&entry) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("{}", e);
                    Outcome::Failed
                }
            };
            stats.record(outcome);
        }

        Ok(stats)
    }

    /// Reserved entries are matched on their original, unparsed name.
    fn is_reserved(&self, entry: &DirEntry) -> bool {
        self.reserved.is_match(Path::new(entry.file_name()))
    }

    fn process_entry(&self, entry: &DirEntry) -> Result<Outcome> {
        let relative = entry
            .path()
            .strip_prefix(&self.options.source_dir)
            .map_err(|e| Error::ImportError(e.to_string()))?;
        let descriptor = parse_relative_path(relative);

        if !descriptor.attributes.is_plain() {
            debug!(
                "'{}' carries attributes {:?}",
                descriptor.source_path.display(),
                descriptor.attributes
            );
        }

        if entry.file_type().is_dir() {
            self.process_dir(&descriptor)
        } else {
            self.process_file(entry.path(), &descriptor)
        }
    }

    fn process_dir(&self, descriptor: &TargetDescriptor) -> Result<Outcome> {
        let destination = self.options.output_dir.join(&descriptor.target_path);

        if self.options.dry_run {
            info!("would create directory '{}'", destination.display());
        } else {
            debug!("creating directory '{}'", destination.display());
            fs::create_dir_all(&destination)?;
            apply_permissions(&destination, &descriptor.attributes)?;
        }

        Ok(Outcome::Dir)
    }

    fn process_file(&self, source: &Path, descriptor: &TargetDescriptor) -> Result<Outcome> {
        let attrs = descriptor.attributes;
        let destination = self.options.output_dir.join(descriptor.physical_path());

        let content = if attrs.template {
            let text = fs::read_to_string(source)?;
            let transpiled = transpile(&text).map_err(|e| Error::TranspileFailed {
                path: descriptor.source_path.clone(),
                source: e,
            })?;
            transpiled.into_bytes()
        } else {
            fs::read(source)?
        };

        if attrs.symlink {
            debug!(
                "'{}' is a symlink entry; its content names the link target",
                descriptor.source_path.display()
            );
        }

        if self.options.dry_run {
            let label = if attrs.template { " (transpiled template)" } else { "" };
            info!("would write '{}'{}", destination.display(), label);
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&destination, &content)?;
            apply_permissions(&destination, &attrs)?;
            debug!("wrote '{}'", destination.display());
        }

        Ok(Outcome::File { template: attrs.template })
    }
}

/// Builds the matcher for entries that are never imported.
fn reserved_entry_set() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in RESERVED_ENTRY_PATTERNS {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::ImportError(format!("reserved pattern failed: {}", e)))?,
        );
    }
    builder
        .build()
        .map_err(|e| Error::ImportError(format!("reserved pattern failed: {}", e)))
}

/// Applies the attribute-derived permission policy.
///
/// Private entries become owner-only, executables gain execute bits, and
/// the combination stays owner-only with execute. Entries without either
/// flag keep whatever the process umask produced.
#[cfg(unix)]
fn apply_permissions(path: &Path, attrs: &AttributeSet) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if attrs.private && attrs.executable {
        0o700
    } else if attrs.private {
        if path.is_dir() {
            0o700
        } else {
            0o600
        }
    } else if attrs.executable {
        0o755
    } else {
        return Ok(());
    };

    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn apply_permissions(_path: &Path, _attrs: &AttributeSet) -> Result<()> {
    Ok(())
}
