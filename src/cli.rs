use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;
use tracing::info;

use crate::core::{Category, Engine, RunOptions, RunReport};

#[derive(Parser)]
#[command(name = "doxyfill")]
#[command(about = "Insert Doxygen comment skeletons above undocumented C and C++ declarations")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert comment blocks above undocumented declarations, in place
    Annotate {
        /// Directory (or single file) to process
        root: PathBuf,

        /// Dry run - report what would be inserted without writing
        #[arg(long)]
        dry_run: bool,

        /// Continue with the next file when one cannot be read or written
        #[arg(long)]
        keep_going: bool,

        /// Print the run report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Fail if any file would be annotated (useful for CI)
    Check {
        /// Directory (or single file) to inspect
        root: PathBuf,
    },

    /// Write a default doxyfill.toml
    Init {
        /// Target directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Annotate { root, dry_run, keep_going, json } => {
                let engine = Engine::new(self.config.as_deref())?;
                let report = engine.annotate(&root, RunOptions { dry_run, keep_going })?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    log_summary(&report);
                }
                Ok(())
            }
            Commands::Check { root } => {
                let engine = Engine::new(self.config.as_deref())?;
                let options = RunOptions { dry_run: true, keep_going: false };
                let report = engine.annotate(&root, options)?;
                log_summary(&report);

                let pending = report.files_changed();
                if pending > 0 {
                    anyhow::bail!("{} file(s) have undocumented declarations", pending);
                }
                Ok(())
            }
            Commands::Init { path, force } => {
                Engine::init(path, force)?;
                Ok(())
            }
        }
    }
}

fn log_summary(report: &RunReport) {
    let verb = if report.dry_run { "would insert" } else { "inserted" };

    info!("📊 Annotation complete:");
    info!("  - {} files processed, {} changed", report.files.len(), report.files_changed());
    for category in Category::PASS_ORDER {
        info!("  - {} {} comments {}", report.inserted_for(category), category, verb);
    }
    if !report.skipped.is_empty() {
        info!("  - {} files skipped (too large)", report.skipped.len());
    }
    if !report.failures.is_empty() {
        info!("  - {} files failed", report.failures.len());
    }
}
