//! resmerge - Resource document merge CLI tool
//!
//! Merges generated resource documents into existing ones, keeping
//! hand-written entries.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use resource_merge::config::{load_options, Manifest};
use resource_merge::merge::{merge_all, merge_file, merge_text, read_existing, MergeBehavior, OptionsOverride};
use resource_merge::{extract, logging, try_create_backup, MergeOptions};

#[derive(Debug, Parser)]
#[command(name = "resmerge", version, about = "Merge generated resource documents into existing ones")]
struct Cli {
    /// Log merge decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge a generated document into a target file
    Merge {
        /// File to merge into; created if missing
        target: PathBuf,
        /// Generated document
        source: PathBuf,
        #[command(flatten)]
        options: OptionFlags,
        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the resource records of a document
    Extract {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Copy a file to a timestamped backup
    Backup { file: PathBuf },
    /// Run every job of a YAML manifest
    Batch {
        manifest: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct OptionFlags {
    /// YAML file with merge options
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// append, replace or merge
    #[arg(short, long)]
    behavior: Option<MergeBehavior>,
    /// Let generated values replace existing ones
    #[arg(long)]
    overwrite: bool,
    /// Back up the target before writing
    #[arg(long)]
    backup: bool,
    /// Root element of a resource document
    #[arg(long)]
    container: Option<String>,
    /// Label for the append separator comment
    #[arg(long)]
    generator: Option<String>,
}

impl OptionFlags {
    fn resolve(&self) -> Result<MergeOptions, Box<dyn std::error::Error>> {
        let base = match &self.config {
            Some(path) => load_options(path)?,
            None => MergeOptions::default(),
        };
        let flags = OptionsOverride {
            preserve_existing: self.overwrite.then_some(false),
            behavior: self.behavior,
            container: self.container.clone(),
            generator: self.generator.clone(),
            backup: self.backup.then_some(true),
        };
        Ok(flags.apply(&base))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut output = io::stdout().lock();

    match command {
        Command::Merge {
            target,
            source,
            options,
            dry_run,
            json,
        } => {
            let options = options.resolve()?;
            let new_text = fs::read_to_string(&source)
                .map_err(|e| format!("Failed to read source file {:?}: {}", source, e))?;

            if dry_run {
                let existing = read_existing(&target)?;
                let merged = merge_text(existing.as_deref(), &new_text, &options);
                write!(output, "{}", merged.text)?;
                return Ok(ExitCode::SUCCESS);
            }

            let outcome = merge_file(&target, &new_text, &options)?;
            if json {
                writeln!(output, "{}", serde_json::to_string_pretty(&outcome)?)?;
            } else {
                writeln!(output, "{}: {:?}", outcome.path.display(), outcome.strategy)?;
                if let Some(backup) = &outcome.backup {
                    writeln!(output, "  backup: {}", backup.display())?;
                }
            }
        }
        Command::Extract { file, json } => {
            let text = fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;
            let records = extract(&text).map_err(|e| format!("Failed to parse {:?}: {}", file, e))?;

            if json {
                writeln!(output, "{}", serde_json::to_string_pretty(&records)?)?;
            } else {
                for record in &records {
                    writeln!(output, "{}\t{}\t{}", record.kind, record.name, record.value.trim())?;
                }
            }
        }
        Command::Backup { file } => match try_create_backup(&file)? {
            Some(backup) => writeln!(output, "{}", backup.display())?,
            None => writeln!(output, "No backup created: {:?} does not exist", file)?,
        },
        Command::Batch { manifest, json } => {
            return batch(&manifest, json, &mut output);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn batch(manifest_path: &Path, json: bool, output: &mut dyn Write) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let manifest = Manifest::load(manifest_path)?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    let jobs = manifest.jobs(base);
    let results = merge_all(&jobs);

    let mut failed = 0;
    let mut report = Vec::new();
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(outcome) => {
                if json {
                    report.push(serde_json::to_value(outcome)?);
                } else {
                    writeln!(output, "ok    {}: {:?}", outcome.path.display(), outcome.strategy)?;
                }
            }
            Err(e) => {
                failed += 1;
                if json {
                    report.push(serde_json::json!({
                        "path": job.target,
                        "error": e.to_string(),
                    }));
                } else {
                    writeln!(output, "error {}: {}", job.target.display(), e)?;
                }
            }
        }
    }

    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&report)?)?;
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
