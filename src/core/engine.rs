// src/core/engine.rs
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use super::files::{read_source, write_source};
use super::{Annotator, Category, PassStats, SourceWalker};

/// Switches for one annotation run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute annotations without writing files back
    pub dry_run: bool,

    /// Record per-file failures and continue instead of aborting the run
    pub keep_going: bool,
}

/// Outcome for one processed file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub passes: Vec<PassStats>,
}

impl FileReport {
    pub fn inserted(&self) -> usize {
        self.passes.iter().map(|p| p.inserted).sum()
    }
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn files_changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    /// Comments inserted for one category across all files
    pub fn inserted_for(&self, category: Category) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.passes.iter())
            .filter(|p| p.category == category)
            .map(|p| p.inserted)
            .sum()
    }

    pub fn total_inserted(&self) -> usize {
        self.files.iter().map(FileReport::inserted).sum()
    }
}

/// Main orchestration engine: discovery, per-file annotation and write-back
pub struct Engine {
    config: Config,
    walker: SourceWalker,
    annotator: Annotator,
}

impl Engine {
    /// Create a new engine from a config file or the default configuration
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;

        debug!("Loaded configuration: {:?}", config);

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let walker = SourceWalker::new(&config.scan);
        let annotator = Annotator::new(&config.templates)
            .context("Failed to compile comment templates")?;

        Ok(Self {
            config,
            walker,
            annotator,
        })
    }

    /// Annotate every qualifying file under `root`, one file at a time
    pub fn annotate(&self, root: &Path, options: RunOptions) -> Result<RunReport> {
        let files = self.walker.discover(root)?;
        info!("Found {} source files under {}", files.len(), root.display());

        self.annotate_files(files, options)
    }

    /// Annotate an already discovered file list in order
    fn annotate_files(&self, files: Vec<PathBuf>, options: RunOptions) -> Result<RunReport> {
        let mut report = RunReport {
            dry_run: options.dry_run,
            ..RunReport::default()
        };

        for path in files {
            let outcome = self.exceeds_size_limit(&path).and_then(|oversized| {
                if oversized {
                    return Ok(None);
                }
                info!("Processing file: {}", path.display());
                self.process_file(&path, options.dry_run).map(Some)
            });

            match outcome {
                Ok(Some(file_report)) => report.files.push(file_report),
                Ok(None) => {
                    warn!(
                        "Skipping {}: larger than {} bytes",
                        path.display(),
                        self.config.scan.max_file_size
                    );
                    report.skipped.push(path);
                }
                Err(e) if options.keep_going => {
                    warn!("Failed to process {}: {:#}", path.display(), e);
                    report.failures.push(FileFailure {
                        path,
                        error: format!("{:#}", e),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    fn process_file(&self, path: &Path, dry_run: bool) -> Result<FileReport> {
        let source = read_source(path)?;
        let annotation = self
            .annotator
            .annotate(&source)
            .with_context(|| format!("Failed to annotate {}", path.display()))?;

        let changed = annotation.text != source;
        if changed && !dry_run {
            write_source(path, &annotation.text)?;
        }

        debug!(
            "{}: {} comments {}",
            path.display(),
            annotation.total_inserted(),
            if dry_run { "would be inserted" } else { "inserted" }
        );

        Ok(FileReport {
            path: path.to_path_buf(),
            changed,
            passes: annotation.passes,
        })
    }

    fn exceeds_size_limit(&self, path: &Path) -> Result<bool> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        Ok(metadata.len() > self.config.scan.max_file_size)
    }

    /// Write the default configuration into `dir`, returning the file written
    pub fn init(dir: Option<PathBuf>, force: bool) -> Result<PathBuf> {
        let dir = dir.unwrap_or_else(|| PathBuf::from("."));
        let path = dir.join("doxyfill.toml");

        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }

        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Config::default().save(&path)?;
        info!("Wrote default configuration to {}", path.display());

        Ok(path)
    }
}
