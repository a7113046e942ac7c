//! autocomment: generate `///` XML documentation comments for C# sources.
//!
//! - `autocomment missing src/` comments declarations that have none
//! - `autocomment all Foo.cs` strips every `///` line and regenerates
//! - `autocomment on-save Foo.cs` is the editor save hook (honors `run_on_save`)
//! - `autocomment missing < Foo.cs` reads stdin and prints the rewritten source

mod buffer;
mod settings;

use anyhow::{bail, Context, Result};
use autocomment_engine::{Edit, Mode, Scanner};
use buffer::Snapshot;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use settings::{Settings, DEFAULT_SETTINGS_FILE};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, trace, warn};

#[derive(Parser)]
#[command(
    name = "autocomment",
    version,
    about = "Generate XML documentation comments for C# declarations"
)]
struct Cli {
    /// Settings file (default: ./.autocomment.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove every `///` comment and regenerate comments for all declarations
    All(RunArgs),
    /// Generate comments only for declarations that lack one
    Missing(RunArgs),
    /// Save hook: run the configured command when `run_on_save` is enabled
    OnSave {
        /// The file that was saved
        file: PathBuf,
    },
    /// Write a settings file with the default templates
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Write nothing; exit with status 1 if any file would change
    #[arg(long, conflicts_with_all = ["stdout", "edits"])]
    check: bool,

    /// Print rewritten sources to stdout instead of writing files
    #[arg(long, conflicts_with = "edits")]
    stdout: bool,

    /// Print the edit plan as JSON instead of writing files
    #[arg(long)]
    edits: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::All(args) => {
            run(&load_settings(cli.config.as_deref())?, Mode::Regenerate, &args)
        }
        Command::Missing(args) => {
            run(&load_settings(cli.config.as_deref())?, Mode::FillMissing, &args)
        }
        Command::OnSave { file } => {
            on_save(cli.config.as_deref(), &file);
            Ok(ExitCode::SUCCESS)
        }
        Command::Init { force } => {
            let path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
            init(&path, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load settings and report template warnings.
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = Settings::load(path)?;
    for warning in settings.template_warnings() {
        warn!("{warning}");
    }
    Ok(settings)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "autocomment=debug"
    } else {
        "autocomment=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// -- Generation pass ----------------------------------------------------------

/// Result of one pass over one document.
struct Outcome {
    edits: Vec<Edit>,
    text: String,
    changed: bool,
}

/// Scan `source`, then apply the resulting edits as one batch.
fn process(source: &str, settings: &Settings, mode: Mode) -> Result<Outcome> {
    let snapshot = Snapshot::new(source);
    let lines = snapshot.lines();
    let config = settings.template_config();
    let line_break = settings.line_break(snapshot.detect_line_break());

    let edits = Scanner::new(&config, mode)
        .line_break(line_break)
        .scan(&lines, |current, total| trace!(current, total, "generating"))?;
    let text = snapshot.apply(&edits)?;
    let changed = text != source;
    Ok(Outcome {
        edits,
        text,
        changed,
    })
}

/// Rewrite one file in place when generation changes it.
fn rewrite_file(path: &Path, settings: &Settings, mode: Mode) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let outcome = process(&source, settings, mode)
        .with_context(|| format!("failed to process {}", path.display()))?;
    if outcome.changed {
        fs::write(path, &outcome.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("updated {}", path.display());
    }
    Ok(())
}

#[derive(Serialize)]
struct FilePlan {
    file: String,
    edits: Vec<Edit>,
}

fn run(settings: &Settings, mode: Mode, args: &RunArgs) -> Result<ExitCode> {
    if args.files.is_empty() {
        return stdin_mode(settings, mode, args);
    }

    let files = expand_inputs(&args.files)?;
    let mut plans = Vec::new();
    let mut would_change = Vec::new();

    for path in &files {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let outcome = process(&source, settings, mode)
            .with_context(|| format!("failed to process {}", path.display()))?;

        if args.stdout {
            print!("{}", outcome.text);
        } else if args.edits {
            plans.push(FilePlan {
                file: path.to_string_lossy().to_string(),
                edits: outcome.edits,
            });
        } else if args.check {
            if outcome.changed {
                would_change.push(path.clone());
            }
        } else if outcome.changed {
            fs::write(path, &outcome.text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("updated {}", path.display());
        }
    }

    if args.edits {
        println!("{}", serde_json::to_string_pretty(&plans)?);
    }

    if args.check && !would_change.is_empty() {
        for path in &would_change {
            eprintln!("would change: {}", path.display());
        }
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// stdin mode: read C# source from stdin, write the result to stdout.
fn stdin_mode(settings: &Settings, mode: Mode, args: &RunArgs) -> Result<ExitCode> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let outcome = process(&input, settings, mode)?;
    if args.edits {
        println!("{}", serde_json::to_string_pretty(&outcome.edits)?);
    } else if args.check {
        if outcome.changed {
            eprintln!("would change: <stdin>");
            return Ok(ExitCode::FAILURE);
        }
    } else {
        print!("{}", outcome.text);
    }
    Ok(ExitCode::SUCCESS)
}

/// Save hook. Failures, including unreadable settings, are logged and never
/// propagated, so a broken run does not prevent the next save from
/// triggering again.
fn on_save(config: Option<&Path>, path: &Path) {
    let settings = match load_settings(config) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("on-save skipped: {e:#}");
            return;
        }
    };
    if !settings.run_on_save {
        debug!("run_on_save disabled, ignoring {}", path.display());
        return;
    }
    if !is_csharp(path) {
        debug!("not a C# file, ignoring {}", path.display());
        return;
    }
    let mode = Mode::from(settings.run_on_save_command);
    if let Err(e) = rewrite_file(path, &settings, mode) {
        warn!("on-save generation failed: {e:#}");
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Settings::default().save_to_file(path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

// -- Input expansion ----------------------------------------------------------

fn is_csharp(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("cs")
}

/// Expand plain paths, directories (recursively) and glob patterns into C#
/// source files. Explicit non-C# files are skipped with a warning.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            if is_csharp(path) {
                files.push(path.to_path_buf());
            } else {
                warn!("skipping {}: not a C# source file", path.display());
            }
            continue;
        }

        let glob_pattern = if path.is_dir() {
            format!("{}/**/*.cs", pattern.trim_end_matches('/'))
        } else {
            pattern.clone()
        };
        let matches: Vec<_> = glob::glob(&glob_pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && is_csharp(p))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
